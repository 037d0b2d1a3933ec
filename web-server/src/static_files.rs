// web-server/src/static_files.rs
use actix_files::Files;
use actix_web::web;
use common::StaticFilesConfig;

use crate::routes::pages;

/// Serve stylesheets and other assets. Missing assets get the regular 404 page.
pub fn configure(cfg: &mut web::ServiceConfig, config: &StaticFilesConfig) {
    cfg.service(
        Files::new(&config.mount, &config.path)
            .prefer_utf8(true)
            .use_etag(true)
            .use_last_modified(true)
            .default_handler(web::route().to(pages::not_found)),
    );
}
