//! S3 Object Storage Adapter
//!
//! Stores page images, narration audio and uploaded PDFs in an S3 bucket
//! (or any S3-compatible endpoint) through `rust-s3`. Objects are read by
//! clients and by the vision model through their public URL, so the
//! bucket is expected to allow public reads.

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use secrecy::{ExposeSecret, Secret};

use crate::ports::{s3_key_from_url, ObjectStorage, StorageError};

/// Connection settings for an S3 bucket.
#[derive(Debug, Clone)]
pub struct S3StorageConfig {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible stores. Enables path-style URLs.
    pub endpoint: Option<String>,
    access_key_id: Option<String>,
    secret_access_key: Option<Secret<String>>,
    /// Overrides the `https://{bucket}.s3.amazonaws.com` URL prefix.
    pub public_base_url: Option<String>,
}

impl S3StorageConfig {
    pub fn new(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            public_base_url: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Static credentials. Without them the AWS default chain is used.
    pub fn with_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(Secret::new(secret_access_key.into()));
        self
    }

    pub fn with_public_base_url(mut self, url: impl Into<String>) -> Self {
        self.public_base_url = Some(url.into());
        self
    }

    /// Prefix every public URL starts with, without trailing slash.
    fn url_prefix(&self) -> String {
        match &self.public_base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://{}.s3.amazonaws.com", self.bucket),
        }
    }
}

/// S3-backed object storage
pub struct S3ObjectStorage {
    bucket: Box<Bucket>,
    url_prefix: String,
}

impl S3ObjectStorage {
    pub fn new(config: S3StorageConfig) -> Result<Self, StorageError> {
        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config
                .region
                .parse::<Region>()
                .map_err(|e| StorageError::Configuration(format!("invalid region: {}", e)))?,
        };

        let credentials = match (&config.access_key_id, &config.secret_access_key) {
            (Some(key), Some(secret)) => Credentials::new(
                Some(key.as_str()),
                Some(secret.expose_secret().as_str()),
                None,
                None,
                None,
            ),
            _ => Credentials::default(),
        }
        .map_err(|e| StorageError::Configuration(format!("invalid credentials: {}", e)))?;

        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| StorageError::Configuration(e.to_string()))?;
        if config.endpoint.is_some() {
            bucket = bucket.with_path_style();
        }

        Ok(Self {
            bucket,
            url_prefix: config.url_prefix(),
        })
    }
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let response = self
            .bucket
            .put_object_with_content_type(key, &bytes, content_type)
            .await
            .map_err(|e| StorageError::Upload {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(StorageError::Upload {
                key: key.to_string(),
                message: format!("bucket returned status {}", status),
            });
        }

        tracing::debug!(key, bytes = bytes.len(), "Uploaded object");
        Ok(self.public_url(key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let response = self
            .bucket
            .delete_object(key)
            .await
            .map_err(|e| StorageError::Delete {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status_code();
        if !(200..300).contains(&status) && status != 404 {
            return Err(StorageError::Delete {
                key: key.to_string(),
                message: format!("bucket returned status {}", status),
            });
        }
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.url_prefix, key)
    }

    fn key_from_url(&self, url: &str) -> Option<String> {
        url.strip_prefix(&format!("{}/", self.url_prefix))
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .or_else(|| s3_key_from_url(url))
    }
}
