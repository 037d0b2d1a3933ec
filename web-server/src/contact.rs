// web-server/src/contact.rs
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::error::AppError;

/// A contact form submission. Nothing is required; absent fields are left
/// out of the stored record.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ContactSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl ContactSubmission {
    /// Pretty-printed JSON object followed by a newline
    pub fn to_record(&self) -> Result<String, serde_json::Error> {
        let mut record = serde_json::to_string_pretty(self)?;
        record.push('\n');
        Ok(record)
    }
}

/// Shared append-only file of contact records
#[derive(Debug, Clone)]
pub struct ContactLog {
    path: PathBuf,
}

impl ContactLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the directory holding the contact file if it does not exist yet
    pub fn ensure_parent_dir(&self) -> io::Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }

    /// Append one record. Each record goes out in a single write; appends
    /// from concurrent requests are not otherwise coordinated.
    pub async fn append(&self, submission: &ContactSubmission) -> Result<(), AppError> {
        let record = submission.to_record()?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(AppError::ContactWrite)?;
        file.write_all(record.as_bytes())
            .await
            .map_err(AppError::ContactWrite)?;
        file.flush().await.map_err(AppError::ContactWrite)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn submission(name: &str, email: &str, comments: &str) -> ContactSubmission {
        ContactSubmission {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            comments: Some(comments.to_string()),
        }
    }

    #[test]
    fn test_record_is_pretty_json_with_newline() {
        let record = submission("A", "b@x.com", "hi").to_record().unwrap();
        assert_eq!(
            record,
            "{\n  \"name\": \"A\",\n  \"email\": \"b@x.com\",\n  \"comments\": \"hi\"\n}\n"
        );
    }

    #[test]
    fn test_record_omits_missing_fields() {
        let partial = ContactSubmission {
            email: Some("b@x.com".to_string()),
            ..Default::default()
        };
        assert_eq!(partial.to_record().unwrap(), "{\n  \"email\": \"b@x.com\"\n}\n");
        assert_eq!(ContactSubmission::default().to_record().unwrap(), "{}\n");
    }

    #[actix_web::test]
    async fn test_append_keeps_earlier_records() {
        let dir = TempDir::new().unwrap();
        let log = ContactLog::new(dir.path().join("nested").join("contact_data.txt"));
        log.ensure_parent_dir().unwrap();

        log.append(&submission("A", "a@x.com", "first")).await.unwrap();
        log.append(&submission("B", "b@x.com", "second")).await.unwrap();

        let contents = std::fs::read_to_string(log.path()).unwrap();
        let first = contents.find("first").unwrap();
        let second = contents.find("second").unwrap();
        assert!(first < second);
        assert_eq!(contents.matches("}\n").count(), 2);
    }

    #[actix_web::test]
    async fn test_append_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let log = ContactLog::new(dir.path().join("absent").join("contact_data.txt"));

        let result = log.append(&submission("A", "a@x.com", "hi")).await;
        assert!(matches!(result, Err(AppError::ContactWrite(_))));
    }
}
