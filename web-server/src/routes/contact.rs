// web-server/src/routes/contact.rs
use actix_web::{web, HttpResponse};

use super::redirect;
use crate::contact::{ContactLog, ContactSubmission};
use crate::error::AppError;

pub async fn submit_contact(
    form: web::Form<ContactSubmission>,
    log: web::Data<ContactLog>,
) -> Result<HttpResponse, AppError> {
    log.append(&form).await?;

    tracing::info!("Saved contact submission to {}", log.path().display());
    Ok(redirect("/"))
}
