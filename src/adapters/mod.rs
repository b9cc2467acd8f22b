//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `postgres` / `memory` - repository implementations
//! - `ai` - chat and vision completions
//! - `speech` - text-to-speech providers
//! - `storage` - object storage for PDFs, page images and audio
//! - `pdf` - page rasterization
//! - `download` - remote file fetch
//! - `http` - the axum API

pub mod ai;
pub mod download;
pub mod http;
pub mod memory;
pub mod pdf;
pub mod postgres;
pub mod speech;
pub mod storage;
