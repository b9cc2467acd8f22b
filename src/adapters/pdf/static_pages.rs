//! Rasterizer returning preset pages.

use async_trait::async_trait;
use std::path::Path;

use crate::ports::{PageImage, PdfRasterizer, RasterizeError};

/// Ignores the input file and returns `page_count` tiny PNG payloads.
#[derive(Debug, Clone, Default)]
pub struct StaticRasterizer {
    page_count: usize,
}

impl StaticRasterizer {
    pub fn new(page_count: usize) -> Self {
        Self { page_count }
    }
}

#[async_trait]
impl PdfRasterizer for StaticRasterizer {
    async fn rasterize(&self, _pdf_path: &Path) -> Result<Vec<PageImage>, RasterizeError> {
        if self.page_count == 0 {
            return Err(RasterizeError::NoPages);
        }
        Ok((0..self.page_count)
            .map(|index| PageImage::png(index, format!("png-{}", index).into_bytes()))
            .collect())
    }
}
