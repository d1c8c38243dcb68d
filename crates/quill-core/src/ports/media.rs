//! Media storage port.

use async_trait::async_trait;

/// Durable storage for uploaded media.
///
/// Implementations must not return a filename unless the bytes were fully
/// written; a post never references media that failed to store.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store a file and return the stable filename it is addressable by.
    async fn store(&self, original_name: &str, bytes: Vec<u8>) -> Result<String, MediaError>;
}

/// Media storage errors.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("Storage failed: {0}")]
    Io(String),
}
