//! In-Memory Object Storage Adapter
//!
//! Keeps uploaded objects in memory and hands out S3-style URLs for a
//! fictional bucket. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{ObjectStorage, StorageError};

/// A stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// In-memory object storage
#[derive(Debug, Clone)]
pub struct InMemoryObjectStorage {
    bucket: String,
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
    deleted: Arc<RwLock<Vec<String>>>,
}

impl InMemoryObjectStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self::with_bucket("memory")
    }

    /// Create a storage whose URLs name `bucket`
    pub fn with_bucket(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: Arc::new(RwLock::new(HashMap::new())),
            deleted: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Get a stored object
    pub async fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }

    /// Sorted keys of every stored object
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Keys passed to `delete`, in call order
    pub async fn deleted_keys(&self) -> Vec<String> {
        self.deleted.read().await.clone()
    }
}

impl Default for InMemoryObjectStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        if key.is_empty() {
            return Err(StorageError::Upload {
                key: key.to_string(),
                message: "empty key".to_string(),
            });
        }

        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(self.public_url(key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.objects.write().await.remove(key);
        self.deleted.write().await.push(key.to_string());
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://{}.s3.amazonaws.com/{}", self.bucket, key)
    }
}
