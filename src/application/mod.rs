//! Application layer - handlers orchestrating domain operations over ports.
//!
//! Handlers depend only on port traits; adapters are injected as
//! `Arc<dyn Port>` by the HTTP layer.

pub mod error;
pub mod handlers;
pub mod progress;

pub use error::ServiceError;
pub use progress::{ProgressEvent, ProgressReporter};
