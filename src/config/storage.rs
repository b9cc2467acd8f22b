//! Object storage configuration

use secrecy::Secret;
use serde::Deserialize;

use super::error::ValidationError;

/// Object storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Bucket holding page images, audio and source PDFs
    pub bucket: Option<String>,

    /// Bucket region
    #[serde(default = "default_region")]
    pub region: String,

    /// Endpoint of an S3-compatible store
    pub endpoint: Option<String>,

    /// Static access key. The AWS default chain is used when absent.
    pub access_key_id: Option<String>,

    /// Static secret key
    pub secret_access_key: Option<Secret<String>>,

    /// Public URL prefix. Defaults to `https://{bucket}.s3.amazonaws.com`.
    pub public_base_url: Option<String>,
}

impl StorageConfig {
    /// Validate object storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bucket.as_deref().map_or(true, str::is_empty) {
            return Err(ValidationError::MissingRequired("STORAGE__BUCKET"));
        }
        if let Some(endpoint) = &self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ValidationError::InvalidStorageEndpoint);
            }
        }
        if self.access_key_id.is_some() != self.secret_access_key.is_some() {
            return Err(ValidationError::MissingRequired(
                "STORAGE__ACCESS_KEY_ID and STORAGE__SECRET_ACCESS_KEY",
            ));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: None,
            region: default_region(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            public_base_url: None,
        }
    }
}

fn default_region() -> String {
    "us-east-1".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_bucket() -> StorageConfig {
        StorageConfig {
            bucket: Some("lectures".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_bucket_is_required() {
        assert_eq!(
            StorageConfig::default().validate(),
            Err(ValidationError::MissingRequired("STORAGE__BUCKET"))
        );
        assert!(with_bucket().validate().is_ok());
    }

    #[test]
    fn test_endpoint_must_be_http() {
        let config = StorageConfig {
            endpoint: Some("minio:9000".to_string()),
            ..with_bucket()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidStorageEndpoint));
    }

    #[test]
    fn test_credentials_come_in_pairs() {
        let config = StorageConfig {
            access_key_id: Some("AKIA".to_string()),
            ..with_bucket()
        };
        assert!(config.validate().is_err());
    }
}
