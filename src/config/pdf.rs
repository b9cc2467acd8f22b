//! PDF rasterization configuration

use serde::Deserialize;

use super::error::ValidationError;

/// PDF rasterization configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PdfConfig {
    /// Path or name of the `pdftoppm` binary
    #[serde(default = "default_binary")]
    pub pdftoppm_path: String,

    /// Render resolution
    #[serde(default = "default_dpi")]
    pub dpi: u32,

    /// Timeout for downloading the source PDF, in seconds
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,
}

impl PdfConfig {
    /// Validate rasterization configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.pdftoppm_path.is_empty() {
            return Err(ValidationError::MissingRequired("PDF__PDFTOPPM_PATH"));
        }
        if !(36..=600).contains(&self.dpi) {
            return Err(ValidationError::InvalidDpi);
        }
        if self.download_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            pdftoppm_path: default_binary(),
            dpi: default_dpi(),
            download_timeout_secs: default_download_timeout(),
        }
    }
}

fn default_binary() -> String {
    "pdftoppm".to_string()
}

fn default_dpi() -> u32 {
    150
}

fn default_download_timeout() -> u64 {
    120
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_defaults() {
        let config = PdfConfig::default();
        assert_eq!(config.pdftoppm_path, "pdftoppm");
        assert_eq!(config.dpi, 150);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_dpi_bounds() {
        let config = PdfConfig {
            dpi: 2400,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidDpi));
    }
}
