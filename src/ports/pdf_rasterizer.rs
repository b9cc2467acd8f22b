//! PDF Rasterizer Port - renders every page of a local PDF to an image.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

#[async_trait]
pub trait PdfRasterizer: Send + Sync {
    /// Renders each page of the PDF at `pdf_path`, in page order.
    async fn rasterize(&self, pdf_path: &Path) -> Result<Vec<PageImage>, RasterizeError>;
}

/// One rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    /// Zero-based page index.
    pub index: usize,
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

impl PageImage {
    pub fn png(index: usize, bytes: Vec<u8>) -> Self {
        Self {
            index,
            bytes,
            content_type: "image/png",
        }
    }
}

#[derive(Debug, Error)]
pub enum RasterizeError {
    #[error("failed to start rasterizer: {0}")]
    Spawn(String),

    #[error("rasterizer exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("rasterizer io error: {0}")]
    Io(String),

    #[error("document has no pages")]
    NoPages,
}

impl From<std::io::Error> for RasterizeError {
    fn from(err: std::io::Error) -> Self {
        RasterizeError::Io(err.to_string())
    }
}
