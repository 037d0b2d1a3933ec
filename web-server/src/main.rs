// web-server/src/main.rs
use std::io;
use std::sync::Arc;

use actix_web::{App, HttpServer};
use common::{setup_tracing, Config};
use portal_server::credentials::{StaticCredentialStore, DEFAULT_USERS};
use portal_server::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let config = Config::from_env();
    setup_tracing(&config.log_level);

    let credentials = StaticCredentialStore::new(DEFAULT_USERS).map_err(io::Error::other)?;
    let state = AppState::new(&config, Arc::new(credentials))?;

    let server_addr = config.web_server_addr.clone();
    tracing::info!("Starting Portal on http://{}", server_addr);

    HttpServer::new(move || {
        let state = state.clone();
        App::new().configure(move |cfg| portal_server::configure(cfg, &state))
    })
    .bind(&server_addr)?
    .run()
    .await
}
