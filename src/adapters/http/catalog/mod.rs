//! HTTP adapter for spaces, slides and page images.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateSlideRequest, CreateSpaceRequest};
pub use routes::catalog_router;
