// web-server/src/uploads.rs
use std::io;
use std::path::{Path, PathBuf};

use actix_multipart::MultipartError;
use actix_web::web::Bytes;
use futures_util::{Stream, TryStreamExt};
use rand::distributions::{Alphanumeric, DistString};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use crate::error::AppError;

/// Multipart field that carries the uploaded file
pub const UPLOAD_FIELD: &str = "archivo";

const STAGING_EXTENSION: &str = ".part";

/// Directory receiving uploaded files, named after the client's filename
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it does not exist yet
    pub fn ensure_dir(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)
    }

    /// Map a client-supplied filename to a path inside the upload directory.
    ///
    /// Only the last path segment is kept, with both `/` and `\` treated as
    /// separators, so `../../etc/passwd` lands as `passwd`.
    pub fn resolve(&self, original_name: &str) -> Result<PathBuf, AppError> {
        let name = original_name
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or_default()
            .trim();

        if name.is_empty() || name == "." || name == ".." || name.contains('\0') {
            return Err(AppError::InvalidFilename(original_name.to_string()));
        }

        Ok(self.dir.join(name))
    }

    /// Stream the file body to disk, replacing any earlier upload with the same name.
    ///
    /// Bytes land in a hidden staging file next to the target, which is renamed
    /// over it only once the stream has ended cleanly. On any failure the
    /// staging file is removed and an existing upload keeps its contents.
    pub async fn save<S>(&self, original_name: &str, body: S) -> Result<PathBuf, AppError>
    where
        S: Stream<Item = Result<Bytes, MultipartError>> + Unpin,
    {
        let path = self.resolve(original_name)?;
        let staging = self.staging_path(&path);

        match write_stream(&staging, body).await {
            Ok(written) => {
                if let Err(e) = fs::rename(&staging, &path).await {
                    discard(&staging).await;
                    return Err(AppError::UploadWrite(e));
                }
                tracing::debug!("Wrote {} bytes to {}", written, path.display());
                Ok(path)
            }
            Err(e) => {
                discard(&staging).await;
                Err(e)
            }
        }
    }

    fn staging_path(&self, target: &Path) -> PathBuf {
        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let suffix = Alphanumeric.sample_string(&mut rand::thread_rng(), 12);
        self.dir.join(format!(".{}.{}{}", name, suffix, STAGING_EXTENSION))
    }

    /// Confirm that a saved upload is present on disk
    pub async fn verify(&self, path: &Path) -> Result<(), AppError> {
        match fs::try_exists(path).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(AppError::UploadNotFound(path.to_path_buf())),
            Err(e) => {
                tracing::error!("Could not check {}: {}", path.display(), e);
                Err(AppError::UploadNotFound(path.to_path_buf()))
            }
        }
    }
}

async fn write_stream<S>(path: &Path, mut body: S) -> Result<usize, AppError>
where
    S: Stream<Item = Result<Bytes, MultipartError>> + Unpin,
{
    let mut file = File::create(path).await.map_err(AppError::UploadWrite)?;
    let mut written = 0usize;
    while let Some(chunk) = body.try_next().await? {
        file.write_all(&chunk).await.map_err(AppError::UploadWrite)?;
        written += chunk.len();
    }
    file.flush().await.map_err(AppError::UploadWrite)?;
    Ok(written)
}

async fn discard(staging: &Path) {
    match fs::remove_file(staging).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Could not remove {}: {}", staging.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_keeps_plain_names() {
        let store = UploadStore::new("/srv/files");
        assert_eq!(
            store.resolve("report final.pdf").unwrap(),
            PathBuf::from("/srv/files/report final.pdf")
        );
    }

    #[test]
    fn test_resolve_strips_directories() {
        let store = UploadStore::new("/srv/files");
        assert_eq!(store.resolve("../../etc/passwd").unwrap(), PathBuf::from("/srv/files/passwd"));
        assert_eq!(
            store.resolve("C:\\Users\\ana\\photo.png").unwrap(),
            PathBuf::from("/srv/files/photo.png")
        );
    }

    #[test]
    fn test_resolve_rejects_empty_and_dot_names() {
        let store = UploadStore::new("/srv/files");
        for name in ["", "   ", ".", "..", "dir/", "a/..", "bad\0name"] {
            assert!(
                matches!(store.resolve(name), Err(AppError::InvalidFilename(_))),
                "{:?} should be rejected",
                name
            );
        }
    }

    #[actix_web::test]
    async fn test_save_writes_bytes_verbatim() {
        let dir = TempDir::new().unwrap();
        let store = UploadStore::new(dir.path());
        let chunks: Vec<Result<Bytes, MultipartError>> = vec![
            Ok(Bytes::from_static(&[0, 159, 146, 150])),
            Ok(Bytes::from_static(b"tail")),
        ];

        let path = store.save("blob.bin", stream::iter(chunks)).await.unwrap();
        store.verify(&path).await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"\x00\x9f\x92\x96tail");
    }

    #[actix_web::test]
    async fn test_save_overwrites_same_name() {
        let dir = TempDir::new().unwrap();
        let store = UploadStore::new(dir.path());

        for body in [&b"first version"[..], &b"second"[..]] {
            let chunks: Vec<Result<Bytes, MultipartError>> = vec![Ok(Bytes::copy_from_slice(body))];
            store.save("notes.txt", stream::iter(chunks)).await.unwrap();
        }

        assert_eq!(std::fs::read(dir.path().join("notes.txt")).unwrap(), b"second");
    }

    #[actix_web::test]
    async fn test_failed_stream_keeps_previous_upload() {
        let dir = TempDir::new().unwrap();
        let store = UploadStore::new(dir.path());
        std::fs::write(dir.path().join("notes.txt"), "previous good upload").unwrap();

        let chunks: Vec<Result<Bytes, MultipartError>> = vec![
            Ok(Bytes::from_static(b"partial")),
            Err(MultipartError::Incomplete),
        ];
        let result = store.save("notes.txt", stream::iter(chunks)).await;
        assert!(matches!(result, Err(AppError::Multipart(_))));

        assert_eq!(
            std::fs::read_to_string(dir.path().join("notes.txt")).unwrap(),
            "previous good upload"
        );
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1, "staging file left behind");
    }

    #[actix_web::test]
    async fn test_failed_first_upload_leaves_nothing() {
        let dir = TempDir::new().unwrap();
        let store = UploadStore::new(dir.path());

        let chunks: Vec<Result<Bytes, MultipartError>> = vec![Err(MultipartError::Incomplete)];
        assert!(store.save("fresh.txt", stream::iter(chunks)).await.is_err());

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[actix_web::test]
    async fn test_verify_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let store = UploadStore::new(dir.path());
        let result = store.verify(&dir.path().join("ghost.txt")).await;
        assert!(matches!(result, Err(AppError::UploadNotFound(_))));
    }
}
