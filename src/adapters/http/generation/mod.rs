//! HTTP adapter for the generation workflows.
//!
//! Long-running workflows have a server-sent event variant that reports
//! progress; the rest answer with a single JSON body.

mod dto;
mod handlers;
mod routes;

pub use dto::{GenerateAudioRequest, SearchRequest, StatusMessageResponse, UpdateQuery};
pub use routes::generation_router;
