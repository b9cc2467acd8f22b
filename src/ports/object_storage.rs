//! Object Storage Port - blob upload and delete for deck artifacts.
//!
//! Page images, narration audio and source PDFs live in a bucket. Documents
//! only keep the public URL, so the port also maps URLs back to keys when
//! artifacts are cleaned up.

use async_trait::async_trait;
use thiserror::Error;

/// Port for object storage.
///
/// # Contract
///
/// - `upload` returns the public HTTPS URL of the stored object
/// - `delete` of a missing key is not an error
/// - `key_from_url` inverts `public_url`
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stores `bytes` under `key` and returns its public URL.
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Removes the object stored under `key`.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Public URL for `key`.
    fn public_url(&self, key: &str) -> String;

    /// Recovers the key from a public URL.
    ///
    /// The default understands virtual-hosted S3 URLs.
    fn key_from_url(&self, url: &str) -> Option<String> {
        s3_key_from_url(url)
    }
}

/// Extracts the key from `https://{bucket}.s3.amazonaws.com/{key}`.
pub fn s3_key_from_url(url: &str) -> Option<String> {
    url.split_once("amazonaws.com/")
        .map(|(_, key)| key.to_string())
        .filter(|key| !key.is_empty())
}

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to upload {key}: {message}")]
    Upload { key: String, message: String },

    #[error("failed to delete {key}: {message}")]
    Delete { key: String, message: String },

    #[error("storage misconfigured: {0}")]
    Configuration(String),
}
