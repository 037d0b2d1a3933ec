// web-server/src/lib.rs
pub mod contact;
pub mod credentials;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod session_registry;
pub mod state;
pub mod static_files;
pub mod templates;
pub mod uploads;
pub mod utils;

use actix_web::web;

pub use state::AppState;

/// Register app data, routes, static assets and the 404 fallback
pub fn configure(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.app_data(state.registry.clone())
        .app_data(state.verifier.clone())
        .app_data(state.session_config.clone())
        .app_data(state.pages.clone())
        .app_data(state.uploads.clone())
        .app_data(state.contact.clone());

    routes::configure(cfg);
    static_files::configure(cfg, &state.static_files);
    cfg.default_service(web::route().to(routes::pages::not_found));
}
