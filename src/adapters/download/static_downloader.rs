//! Downloader writing fixed bytes.

use async_trait::async_trait;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::ports::{DownloadError, FileDownloader};

/// Writes preset bytes for every URL and records what was requested.
#[derive(Debug, Clone, Default)]
pub struct StaticDownloader {
    bytes: Vec<u8>,
    urls: Arc<Mutex<Vec<String>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl StaticDownloader {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            urls: Arc::default(),
        }
    }

    pub fn requested_urls(&self) -> Vec<String> {
        lock(&self.urls).clone()
    }
}

#[async_trait]
impl FileDownloader for StaticDownloader {
    async fn download(&self, url: &str, destination: &Path) -> Result<u64, DownloadError> {
        lock(&self.urls).push(url.to_string());
        tokio::fs::write(destination, &self.bytes).await?;
        Ok(self.bytes.len() as u64)
    }
}
