//! File Downloader Port - fetches a remote file to a local path.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

#[async_trait]
pub trait FileDownloader: Send + Sync {
    /// Downloads `url` into `destination` and returns the byte count.
    async fn download(&self, url: &str, destination: &Path) -> Result<u64, DownloadError>;
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("download request failed: {0}")]
    Request(String),

    #[error("download returned status {0}")]
    Status(u16),

    #[error("failed to write download: {0}")]
    Io(String),
}

impl From<std::io::Error> for DownloadError {
    fn from(err: std::io::Error) -> Self {
        DownloadError::Io(err.to_string())
    }
}
