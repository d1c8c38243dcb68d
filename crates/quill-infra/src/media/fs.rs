//! Filesystem media store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use quill_core::ports::{MediaError, MediaStore};

/// Only images may be uploaded.
const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Stores uploads under a single directory, addressed by a uuid-prefixed
/// filename. The filename is returned only after the write completed, so a
/// post can never reference media that is not on disk.
pub struct FsMediaStore {
    dir: PathBuf,
}

impl FsMediaStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<(), MediaError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| MediaError::Io(e.to_string()))
    }

    fn extension_of(original_name: &str) -> Result<String, MediaError> {
        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(MediaError::UnsupportedType(format!(
                "only images are allowed, got '{original_name}'"
            )));
        }
        Ok(ext)
    }

    /// Keep a recognizable slice of the original name, stripped down to
    /// characters safe in a path segment.
    fn sanitized_stem(original_name: &str) -> String {
        let stem: String = Path::new(original_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("upload")
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '-'
                }
            })
            .take(40)
            .collect();
        if stem.is_empty() { "upload".to_string() } else { stem }
    }
}

#[async_trait]
impl MediaStore for FsMediaStore {
    async fn store(&self, original_name: &str, bytes: Vec<u8>) -> Result<String, MediaError> {
        let ext = Self::extension_of(original_name)?;
        let filename = format!(
            "{}-{}.{}",
            Uuid::new_v4(),
            Self::sanitized_stem(original_name),
            ext
        );

        let path = self.dir.join(&filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| MediaError::Io(e.to_string()))?;

        tracing::debug!(file = %filename, "Stored uploaded media");
        Ok(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> FsMediaStore {
        let dir = std::env::temp_dir().join(format!("quill-media-{}", Uuid::new_v4()));
        FsMediaStore::new(dir)
    }

    #[tokio::test]
    async fn stores_and_returns_stable_filename() {
        let store = temp_store();
        store.ensure_dir().await.unwrap();

        let filename = store
            .store("My Cover Photo.PNG", b"not-really-a-png".to_vec())
            .await
            .unwrap();

        assert!(filename.ends_with(".png"));
        let on_disk = tokio::fs::read(store.dir.join(&filename)).await.unwrap();
        assert_eq!(on_disk, b"not-really-a-png");
    }

    #[tokio::test]
    async fn rejects_non_image_extension() {
        let store = temp_store();
        store.ensure_dir().await.unwrap();

        let err = store
            .store("payload.exe", b"nope".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::UnsupportedType(_)));
    }

    #[tokio::test]
    async fn failed_write_returns_no_filename() {
        // Directory never created - the write must fail and nothing leaks out.
        let store = temp_store();
        let result = store.store("cover.jpg", b"data".to_vec()).await;
        assert!(matches!(result, Err(MediaError::Io(_))));
    }
}
