//! HTTP handlers for study endpoints.

use axum::extract::{Path, State};
use axum::response::IntoResponse;

use crate::domain::foundation::{FlashcardId, QuizQuestionId, SlideId, SlideImageId};

use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::response::{DataResponse, MessageResponse};
use crate::adapters::http::state::AppState;

// ════════════════════════════════════════════════════════════════════════════════
// Quiz questions
// ════════════════════════════════════════════════════════════════════════════════

/// GET /quiz-questions/:slide_id
pub async fn list_quiz_questions(
    State(state): State<AppState>,
    Path(slide_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let slide_id: SlideId = parse_id(&slide_id, "slide ID")?;
    let questions = state.quiz_question_handler().list_by_slide(&slide_id).await?;
    Ok(DataResponse::ok(questions))
}

/// GET /quiz-questions/:slide_id/:slide_image_id
pub async fn list_page_quiz_questions(
    State(state): State<AppState>,
    Path((slide_id, slide_image_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let slide_id: SlideId = parse_id(&slide_id, "slide ID")?;
    let slide_image_id: SlideImageId = parse_id(&slide_image_id, "slide image ID")?;
    let questions = state
        .quiz_question_handler()
        .list_by_image(&slide_id, &slide_image_id)
        .await?;
    Ok(DataResponse::ok(questions))
}

/// GET /slides-with-quiz-questions
pub async fn slides_with_quiz_questions(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let slides = state.quiz_question_handler().slides_with_questions().await?;
    Ok(DataResponse::ok(slides))
}

/// DELETE /quiz-question/:quiz_id
pub async fn delete_quiz_question(
    State(state): State<AppState>,
    Path(quiz_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let quiz_id: QuizQuestionId = parse_id(&quiz_id, "quiz question ID")?;
    state.quiz_question_handler().delete(&quiz_id).await?;
    Ok(MessageResponse::ok("Quiz question deleted successfully"))
}

// ════════════════════════════════════════════════════════════════════════════════
// Flashcards
// ════════════════════════════════════════════════════════════════════════════════

/// GET /flashcards/:slide_id
pub async fn list_flashcards(
    State(state): State<AppState>,
    Path(slide_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let slide_id: SlideId = parse_id(&slide_id, "slide ID")?;
    let cards = state.flashcard_handler().list_by_slide(&slide_id).await?;
    Ok(DataResponse::ok(cards))
}

/// GET /flashcards/:slide_id/:slide_image_id
pub async fn list_page_flashcards(
    State(state): State<AppState>,
    Path((slide_id, slide_image_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let slide_id: SlideId = parse_id(&slide_id, "slide ID")?;
    let slide_image_id: SlideImageId = parse_id(&slide_image_id, "slide image ID")?;
    let cards = state
        .flashcard_handler()
        .list_by_image(&slide_id, &slide_image_id)
        .await?;
    Ok(DataResponse::ok(cards))
}

/// GET /slides-with-flashcards
pub async fn slides_with_flashcards(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let slides = state.flashcard_handler().slides_with_flashcards().await?;
    Ok(DataResponse::ok(slides))
}

/// DELETE /flashcard/:flashcard_id
pub async fn delete_flashcard(
    State(state): State<AppState>,
    Path(flashcard_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let flashcard_id: FlashcardId = parse_id(&flashcard_id, "flashcard ID")?;
    state.flashcard_handler().delete(&flashcard_id).await?;
    Ok(MessageResponse::ok("Flashcard deleted successfully"))
}
