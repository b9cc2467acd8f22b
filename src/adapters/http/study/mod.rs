//! HTTP adapter for stored quiz questions and flashcards.

mod handlers;
mod routes;

pub use routes::study_router;
