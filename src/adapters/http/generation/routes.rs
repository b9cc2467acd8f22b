//! Route configuration for generation endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    convert_pdf, generate_all_audio, generate_audio, generate_flashcards, generate_notes,
    generate_page_flashcards, generate_page_quiz, generate_quiz, search, stream_all_image_text,
    stream_audio, stream_convert_pdf, stream_image_text,
};
use crate::adapters::http::state::AppState;

/// Creates the generation router.
///
/// Streaming routes (server-sent events):
/// - `GET /convert-pdf-to-images/:slide_id`
/// - `GET /generate-image-text/:slide_image_id?update=bool`
/// - `GET /generate-all-image-text/:slide_id`
/// - `GET /generate-audio/:slide_image_id?update=bool`
///
/// JSON routes:
/// - `POST /convert-pdf-to-images/:slide_id`
/// - `POST /generate-notes/:slide_id`
/// - `POST /generate-audio`, `POST /generate-all-audio/:slide_id`
/// - `POST /generate-quiz/:slide_id[/:slide_image_id]`
/// - `GET /generate-flashcards/:slide_id[/:slide_image_id]`
/// - `POST /search`
pub fn generation_router() -> Router<AppState> {
    Router::new()
        .route(
            "/convert-pdf-to-images/:slide_id",
            get(stream_convert_pdf).post(convert_pdf),
        )
        .route("/generate-image-text/:slide_image_id", get(stream_image_text))
        .route("/generate-all-image-text/:slide_id", get(stream_all_image_text))
        .route("/generate-notes/:slide_id", post(generate_notes))
        .route("/generate-audio/:slide_image_id", get(stream_audio))
        .route("/generate-audio", post(generate_audio))
        .route("/generate-all-audio/:slide_id", post(generate_all_audio))
        .route("/generate-quiz/:slide_id", post(generate_quiz))
        .route(
            "/generate-quiz/:slide_id/:slide_image_id",
            post(generate_page_quiz),
        )
        .route("/generate-flashcards/:slide_id", get(generate_flashcards))
        .route(
            "/generate-flashcards/:slide_id/:slide_image_id",
            get(generate_page_flashcards),
        )
        .route("/search", post(search))
}
