//! Page rendering through poppler's `pdftoppm` binary.
//!
//! `pdftoppm -png -r {dpi} input.pdf {dir}/page` writes one file per page
//! named `page-{n}.png`, where `n` is 1-based and zero-padded to the width
//! of the page count. Files are collected and ordered by that number.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::ports::{PageImage, PdfRasterizer, RasterizeError};

const PAGE_PREFIX: &str = "page";

pub struct PdftoppmRasterizer {
    binary: PathBuf,
    dpi: u32,
}

impl PdftoppmRasterizer {
    pub fn new(binary: impl Into<PathBuf>, dpi: u32) -> Self {
        Self {
            binary: binary.into(),
            dpi,
        }
    }
}

impl Default for PdftoppmRasterizer {
    fn default() -> Self {
        Self::new("pdftoppm", 150)
    }
}

#[async_trait]
impl PdfRasterizer for PdftoppmRasterizer {
    async fn rasterize(&self, pdf_path: &Path) -> Result<Vec<PageImage>, RasterizeError> {
        let out_dir = tempfile::tempdir()?;
        let prefix = out_dir.path().join(PAGE_PREFIX);

        let output = Command::new(&self.binary)
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg(pdf_path)
            .arg(&prefix)
            .output()
            .await
            .map_err(|e| RasterizeError::Spawn(format!("{}: {}", self.binary.display(), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::error!(
                path = %pdf_path.display(),
                status = %output.status,
                stderr = %stderr,
                "pdftoppm exited with non-zero code"
            );
            return Err(RasterizeError::Failed {
                status: output.status.to_string(),
                stderr,
            });
        }

        let mut pages = Vec::new();
        let mut entries = tokio::fs::read_dir(out_dir.path()).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            if let Some(number) = page_number(&name.to_string_lossy()) {
                pages.push((number, entry.path()));
            }
        }
        pages.sort_by_key(|(number, _)| *number);

        if pages.is_empty() {
            return Err(RasterizeError::NoPages);
        }

        let mut images = Vec::with_capacity(pages.len());
        for (index, (_, path)) in pages.into_iter().enumerate() {
            images.push(PageImage::png(index, tokio::fs::read(&path).await?));
        }

        tracing::debug!(path = %pdf_path.display(), pages = images.len(), "Rasterized PDF");
        Ok(images)
    }
}

/// Parses `page-07.png` into `7`.
fn page_number(file_name: &str) -> Option<u32> {
    file_name
        .strip_prefix(PAGE_PREFIX)?
        .strip_prefix('-')?
        .strip_suffix(".png")?
        .parse()
        .ok()
}
