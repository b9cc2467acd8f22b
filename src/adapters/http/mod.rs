//! HTTP adapter - the axum REST and server-sent event API.
//!
//! Each area has its own DTOs, handlers and routes; [`app_router`] merges
//! them and adds the middleware stack.

pub mod account;
pub mod catalog;
pub mod generation;
pub mod study;

mod error;
mod response;
mod router;
mod sse;
mod state;

pub use error::{parse_id, ApiError, ErrorResponse};
pub use response::{DataResponse, MessageResponse};
pub use router::{app_router, MAX_UPLOAD_BYTES};
pub use sse::{stream_workflow, terminal_event, EventStream, StreamEnd, DONE_SENTINEL};
pub use state::{AppState, Repositories, Services};
