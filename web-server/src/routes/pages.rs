// web-server/src/routes/pages.rs
use actix_web::{http::header::ContentType, web, HttpResponse};

use super::html;
use crate::error::AppError;
use crate::session::CurrentUser;
use crate::templates::{Page, Pages};

pub async fn home(current: CurrentUser, pages: web::Data<Pages>) -> Result<HttpResponse, AppError> {
    Ok(html(pages.render(Page::Home, current.user())?))
}

pub async fn about(current: CurrentUser, pages: web::Data<Pages>) -> Result<HttpResponse, AppError> {
    Ok(html(pages.render(Page::About, current.user())?))
}

pub async fn contact_form(current: CurrentUser, pages: web::Data<Pages>) -> Result<HttpResponse, AppError> {
    Ok(html(pages.render(Page::Contact, current.user())?))
}

pub async fn submit_form(current: CurrentUser, pages: web::Data<Pages>) -> Result<HttpResponse, AppError> {
    Ok(html(pages.render(Page::Submit, current.user())?))
}

/// Fallback for every unmatched route
pub async fn not_found(current: CurrentUser, pages: web::Data<Pages>) -> Result<HttpResponse, AppError> {
    let body = pages.render(Page::NotFound, current.user())?;
    Ok(HttpResponse::NotFound()
        .content_type(ContentType::html())
        .body(body))
}
