use rand::Rng;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{debug, warn};

use shared_models::AppError;

/// Public URL prefix under which uploaded files are served back.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Uploaded images may not exceed 5 MiB.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Unsupported file type {0:?}: only images are accepted")]
    InvalidType(String),

    #[error("File too large: limit is {} bytes", MAX_IMAGE_BYTES)]
    TooLarge,

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::InvalidType(_) | MediaError::TooLarge => {
                AppError::ValidationError(err.to_string())
            }
            MediaError::Io(e) => AppError::Internal(e.to_string()),
        }
    }
}

/// Filesystem-backed store for uploaded images. Every record referencing an
/// uploaded file owns that file's lifecycle; rows delete their files through
/// [`MediaStore::remove`] on a best-effort basis.
#[derive(Debug, Clone)]
pub struct MediaStore {
    upload_dir: PathBuf,
}

impl MediaStore {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    /// Validate and persist one uploaded image, returning the public path to
    /// store on the owning row.
    pub async fn store(
        &self,
        original_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, MediaError> {
        if !content_type.starts_with("image/") {
            return Err(MediaError::InvalidType(content_type.to_string()));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(MediaError::TooLarge);
        }

        let filename = Self::generate_name(original_name);

        tokio::fs::create_dir_all(&self.upload_dir).await?;
        tokio::fs::write(self.upload_dir.join(&filename), bytes).await?;

        debug!("Stored uploaded image as {}", filename);
        Ok(format!("{}/{}", PUBLIC_PREFIX, filename))
    }

    /// Delete the file behind a public path. Absence is not an error and
    /// paths outside the public prefix are ignored, so the call is safe to
    /// repeat and safe against stray values stored in old rows.
    pub async fn remove(&self, public_path: &str) {
        let Some(filename) = public_path.strip_prefix(&format!("{}/", PUBLIC_PREFIX)) else {
            return;
        };
        // Reject anything that could escape the upload directory.
        if filename.contains("..") || filename.contains('/') {
            warn!("Refusing to remove suspicious media path {:?}", public_path);
            return;
        }

        match tokio::fs::remove_file(self.upload_dir.join(filename)).await {
            Ok(()) => debug!("Removed stored file {}", filename),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove stored file {}: {}", filename, e),
        }
    }

    /// Remove every file in a gallery list, best-effort.
    pub async fn remove_all(&self, public_paths: &[String]) {
        for path in public_paths {
            self.remove(path).await;
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Timestamp plus random integer keeps names collision-resistant while
    /// the original filename suffix keeps them readable.
    fn generate_name(original_name: &str) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let nonce: u32 = rand::thread_rng().gen();

        format!("{}-{}-{}", millis, nonce, sanitize(original_name))
    }
}

fn sanitize(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_rejects_non_image_mime() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());

        let result = store.store("notes.pdf", "application/pdf", b"%PDF").await;
        assert!(matches!(result, Err(MediaError::InvalidType(_))));
    }

    #[tokio::test]
    async fn store_rejects_oversized_payload() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());

        let big = vec![0u8; MAX_IMAGE_BYTES + 1];
        let result = store.store("huge.png", "image/png", &big).await;
        assert!(matches!(result, Err(MediaError::TooLarge)));
    }

    #[tokio::test]
    async fn store_keeps_original_name_as_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());

        let path = store.store("smile.png", "image/png", b"png").await.unwrap();
        assert!(path.starts_with("/uploads/"));
        assert!(path.ends_with("-smile.png"));

        let filename = path.strip_prefix("/uploads/").unwrap();
        assert!(dir.path().join(filename).exists());
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());

        let path = store.store("x.jpg", "image/jpeg", b"jpg").await.unwrap();
        store.remove(&path).await;
        let filename = path.strip_prefix("/uploads/").unwrap();
        assert!(!dir.path().join(filename).exists());

        // Second removal of a missing file is not an error.
        store.remove(&path).await;
    }

    #[tokio::test]
    async fn remove_ignores_paths_outside_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());

        store.remove("/etc/passwd").await;
        store.remove("/uploads/../escape.txt").await;
    }
}
