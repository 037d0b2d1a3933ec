// web-server/src/error.rs
use std::io;
use std::path::PathBuf;

use actix::MailboxError;
use actix_multipart::MultipartError;
use actix_web::{
    error::BlockingError,
    http::{header::ContentType, StatusCode},
    HttpResponse, ResponseError,
};
use thiserror::Error;

/// Body sent for every failure that is not the client's fault
pub const GENERIC_FAILURE: &str = "Something went wrong!";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No file was provided")]
    MissingUpload,

    #[error("Invalid file name: {0:?}")]
    InvalidFilename(String),

    #[error("Malformed upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Error saving the file: {0}")]
    UploadWrite(#[source] io::Error),

    #[error("Uploaded file not found at {}", .0.display())]
    UploadNotFound(PathBuf),

    #[error("Error saving the data: {0}")]
    ContactWrite(#[source] io::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Session registry unavailable: {0}")]
    Session(#[from] MailboxError),

    #[error("Blocking task failed: {0}")]
    Blocking(#[from] BlockingError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Short text shown to the client
    fn public_message(&self) -> &'static str {
        match self {
            AppError::MissingUpload => "No file was provided",
            AppError::InvalidFilename(_) => "Invalid file name",
            AppError::Multipart(_) => "Malformed upload",
            AppError::UploadWrite(_) => "Error saving the file",
            AppError::UploadNotFound(_) => "Error: the file was not found in the upload directory",
            AppError::ContactWrite(_) => "Error saving the data",
            AppError::Template(_)
            | AppError::Session(_)
            | AppError::Blocking(_)
            | AppError::Serialization(_) => GENERIC_FAILURE,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingUpload | AppError::InvalidFilename(_) | AppError::Multipart(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::info!(error = %self, "Rejected request");
        }

        HttpResponse::build(status)
            .content_type(ContentType::plaintext())
            .body(self.public_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_bad_request() {
        assert_eq!(AppError::MissingUpload.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidFilename("..".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_io_failures_are_server_errors() {
        let err = AppError::ContactWrite(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Error saving the data");
    }

    #[test]
    fn test_internal_failures_hide_details() {
        let err = AppError::Session(MailboxError::Closed);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), GENERIC_FAILURE);
    }
}
