// web-server/src/routes/mod.rs
pub mod auth;
pub mod contact;
pub mod pages;
pub mod upload;

use actix_web::{
    http::header, http::header::ContentType, web, HttpResponse, HttpResponseBuilder, Resource,
};

use crate::middleware::RequireSession;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(resource("/").route(web::get().to(pages::home)))
        .service(
            resource("/login")
                .route(web::get().to(auth::login_form))
                .route(web::post().to(auth::login)),
        )
        .service(resource("/logout").route(web::get().to(auth::logout)))
        .service(
            resource("/protected")
                .wrap(RequireSession)
                .route(web::get().to(auth::protected)),
        )
        .service(resource("/about").route(web::get().to(pages::about)))
        .service(
            resource("/contact")
                .route(web::get().to(pages::contact_form))
                .route(web::post().to(contact::submit_contact)),
        )
        .service(
            resource("/submit")
                .route(web::get().to(pages::submit_form))
                .route(web::post().to(upload::submit_upload)),
        );
}

// Wrong method on a known path is still a missing page
fn resource(path: &str) -> Resource {
    web::resource(path).default_service(web::route().to(pages::not_found))
}

/// 302 to another page of the site
pub fn redirect(location: &str) -> HttpResponse {
    redirect_to(location).finish()
}

pub(crate) fn redirect_to(location: &str) -> HttpResponseBuilder {
    let mut builder = HttpResponse::Found();
    builder.insert_header((header::LOCATION, location));
    builder
}

pub(crate) fn html(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(body)
}
