// web-server/src/routes/upload.rs
use std::collections::HashMap;

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::TryStreamExt;

use super::redirect;
use crate::error::AppError;
use crate::uploads::{UploadStore, UPLOAD_FIELD};

/// Accepts the "archivo" file plus any other form fields
pub async fn submit_upload(
    mut payload: Multipart,
    store: web::Data<UploadStore>,
) -> Result<HttpResponse, AppError> {
    let mut saved = None;
    let mut fields: HashMap<String, String> = HashMap::new();

    while let Some(mut field) = payload.try_next().await? {
        let disposition = field.content_disposition();
        let name = disposition.get_name().unwrap_or_default().to_string();
        let filename = disposition
            .get_filename()
            .filter(|f| !f.is_empty())
            .map(str::to_string);

        match filename {
            Some(filename) if name == UPLOAD_FIELD && saved.is_none() => {
                saved = Some(store.save(&filename, &mut field).await?);
            }
            Some(filename) => {
                // Only the first file part is kept; drain the rest
                tracing::debug!("Ignoring extra file {:?} in field {:?}", filename, name);
                while field.try_next().await?.is_some() {}
            }
            None => {
                let mut value = Vec::new();
                while let Some(chunk) = field.try_next().await? {
                    value.extend_from_slice(&chunk);
                }
                fields.insert(name, String::from_utf8_lossy(&value).into_owned());
            }
        }
    }

    let Some(path) = saved else {
        return Err(AppError::MissingUpload);
    };

    store.verify(&path).await?;

    tracing::info!("Saved upload {}", path.display());
    tracing::debug!("Upload form fields: {:?}", fields);
    Ok(redirect("/"))
}
