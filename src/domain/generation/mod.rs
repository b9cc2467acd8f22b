//! Generation module - pure helpers behind the generation workflows.
//!
//! - `prompts` - fixed instruction text
//! - `context` - narration and chunk context assembly
//! - `batching` - fixed-size image batches
//! - `payload` - decoding of structured completion output
//! - `keys` - object storage key layout

pub mod batching;
pub mod context;
pub mod keys;
pub mod payload;
pub mod prompts;

pub use context::MissingText;
pub use payload::PayloadError;
