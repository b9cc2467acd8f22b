//! Object Storage Adapters
//!
//! Implementations of the ObjectStorage port for deck artifacts.
//!
//! ## Available Adapters
//!
//! - **S3ObjectStorage** - Stores objects in an S3-compatible bucket
//! - **InMemoryObjectStorage** - Stores objects in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryObjectStorage, S3ObjectStorage, S3StorageConfig};
//!
//! // Production: S3 bucket
//! let storage = S3ObjectStorage::new(S3StorageConfig::new("lectures", "us-east-1"))?;
//!
//! // Testing: in-memory storage
//! let storage = InMemoryObjectStorage::new();
//! ```

mod in_memory_object_storage;
mod s3_object_storage;

pub use in_memory_object_storage::InMemoryObjectStorage;
pub use s3_object_storage::{S3ObjectStorage, S3StorageConfig};
