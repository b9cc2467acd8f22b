//! Route configuration for study endpoints.

use axum::routing::{delete, get};
use axum::Router;

use super::handlers::{
    delete_flashcard, delete_quiz_question, list_flashcards, list_page_flashcards,
    list_page_quiz_questions, list_quiz_questions, slides_with_flashcards,
    slides_with_quiz_questions,
};
use crate::adapters::http::state::AppState;

/// Creates the study router.
pub fn study_router() -> Router<AppState> {
    Router::new()
        .route("/quiz-questions/:slide_id", get(list_quiz_questions))
        .route(
            "/quiz-questions/:slide_id/:slide_image_id",
            get(list_page_quiz_questions),
        )
        .route("/slides-with-quiz-questions", get(slides_with_quiz_questions))
        .route("/quiz-question/:quiz_id", delete(delete_quiz_question))
        .route("/flashcards/:slide_id", get(list_flashcards))
        .route(
            "/flashcards/:slide_id/:slide_image_id",
            get(list_page_flashcards),
        )
        .route("/slides-with-flashcards", get(slides_with_flashcards))
        .route("/flashcard/:flashcard_id", delete(delete_flashcard))
}
