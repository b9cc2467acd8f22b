//! HTTP handlers for generation endpoints.
//!
//! Streaming handlers validate their path parameters up front, then hand the
//! workflow to [`stream_workflow`]. Anything that fails after that point is
//! reported inside the stream.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::application::handlers::{
    AnswerQuestionCommand, CompileNotesCommand, ConvertPdfCommand, GenerateAllAudioCommand,
    GenerateAllImageTextCommand, GenerateAudioCommand, GenerateFlashcardsCommand,
    GenerateImageTextCommand, GenerateQuizCommand, GenerationScope,
};
use crate::application::ProgressReporter;
use crate::domain::foundation::{SlideId, SlideImageId};
use crate::domain::study::{Flashcard, QuizQuestion};

use super::dto::{GenerateAudioRequest, SearchRequest, StatusMessageResponse, UpdateQuery};
use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::response::{DataResponse, MessageResponse};
use crate::adapters::http::sse::{stream_workflow, EventStream, StreamEnd};
use crate::adapters::http::state::AppState;

fn scope_for(image: Option<String>) -> Result<GenerationScope, ApiError> {
    match image {
        Some(raw) => Ok(GenerationScope::Page(parse_id(&raw, "slide image ID")?)),
        None => Ok(GenerationScope::Deck),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// PDF conversion
// ════════════════════════════════════════════════════════════════════════════════

/// GET /convert-pdf-to-images/:slide_id - streams conversion progress
pub async fn stream_convert_pdf(
    State(state): State<AppState>,
    Path(slide_id): Path<String>,
) -> Result<EventStream, ApiError> {
    let slide_id: SlideId = parse_id(&slide_id, "slide ID")?;
    let handler = state.convert_pdf_handler();
    Ok(stream_workflow(
        move |progress| async move {
            handler
                .handle(ConvertPdfCommand { slide_id }, &progress)
                .await
        },
        StreamEnd::Close,
    ))
}

/// POST /convert-pdf-to-images/:slide_id
pub async fn convert_pdf(
    State(state): State<AppState>,
    Path(slide_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let slide_id: SlideId = parse_id(&slide_id, "slide ID")?;
    state
        .convert_pdf_handler()
        .handle(ConvertPdfCommand { slide_id }, &ProgressReporter::silent())
        .await?;
    Ok(MessageResponse::ok("PDF converted to images"))
}

// ════════════════════════════════════════════════════════════════════════════════
// Narration text and notes
// ════════════════════════════════════════════════════════════════════════════════

/// GET /generate-image-text/:slide_image_id?update=bool
pub async fn stream_image_text(
    State(state): State<AppState>,
    Path(slide_image_id): Path<String>,
    Query(query): Query<UpdateQuery>,
) -> Result<EventStream, ApiError> {
    let slide_image_id: SlideImageId = parse_id(&slide_image_id, "slide image ID")?;
    let handler = state.generate_image_text_handler();
    let cmd = GenerateImageTextCommand {
        slide_image_id,
        update: query.update,
    };
    Ok(stream_workflow(
        move |progress| async move { handler.handle(cmd, &progress).await },
        StreamEnd::Close,
    ))
}

/// GET /generate-all-image-text/:slide_id - ends with `[DONE]`
pub async fn stream_all_image_text(
    State(state): State<AppState>,
    Path(slide_id): Path<String>,
) -> Result<EventStream, ApiError> {
    let slide_id: SlideId = parse_id(&slide_id, "slide ID")?;
    let handler = state.generate_all_image_text_handler();
    Ok(stream_workflow(
        move |progress| async move {
            handler
                .handle(GenerateAllImageTextCommand { slide_id }, &progress)
                .await
        },
        StreamEnd::DoneSentinel,
    ))
}

/// POST /generate-notes/:slide_id
pub async fn generate_notes(
    State(state): State<AppState>,
    Path(slide_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let slide_id: SlideId = parse_id(&slide_id, "slide ID")?;
    let notes = state
        .compile_notes_handler()
        .handle(CompileNotesCommand { slide_id })
        .await?;
    Ok(DataResponse::ok(notes))
}

// ════════════════════════════════════════════════════════════════════════════════
// Audio
// ════════════════════════════════════════════════════════════════════════════════

/// GET /generate-audio/:slide_image_id?update=bool
pub async fn stream_audio(
    State(state): State<AppState>,
    Path(slide_image_id): Path<String>,
    Query(query): Query<UpdateQuery>,
) -> Result<EventStream, ApiError> {
    let slide_image_id: SlideImageId = parse_id(&slide_image_id, "slide image ID")?;
    let handler = state.generate_audio_handler();
    let cmd = GenerateAudioCommand {
        slide_image_id,
        update: query.update,
    };
    Ok(stream_workflow(
        move |progress| async move { handler.handle(cmd, &progress).await },
        StreamEnd::Close,
    ))
}

/// POST /generate-audio
pub async fn generate_audio(
    State(state): State<AppState>,
    payload: Result<Json<GenerateAudioRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let cmd = GenerateAudioCommand {
        slide_image_id: parse_id(&request.slide_image_id, "slide image ID")?,
        update: request.update,
    };
    let url = state
        .generate_audio_handler()
        .handle(cmd, &ProgressReporter::silent())
        .await?;
    Ok(DataResponse::ok(url))
}

/// POST /generate-all-audio/:slide_id
pub async fn generate_all_audio(
    State(state): State<AppState>,
    Path(slide_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let slide_id: SlideId = parse_id(&slide_id, "slide ID")?;
    state
        .generate_all_audio_handler()
        .handle(GenerateAllAudioCommand { slide_id })
        .await?;
    Ok(Json(StatusMessageResponse::success(
        "Audio generated for all slide images",
    )))
}

// ════════════════════════════════════════════════════════════════════════════════
// Quiz and flashcards
// ════════════════════════════════════════════════════════════════════════════════

/// POST /generate-quiz/:slide_id
pub async fn generate_quiz(
    State(state): State<AppState>,
    Path(slide_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    quiz(state, slide_id, None).await
}

/// POST /generate-quiz/:slide_id/:slide_image_id
pub async fn generate_page_quiz(
    State(state): State<AppState>,
    Path((slide_id, slide_image_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    quiz(state, slide_id, Some(slide_image_id)).await
}

async fn quiz(
    state: AppState,
    slide_id: String,
    slide_image_id: Option<String>,
) -> Result<DataResponse<Vec<QuizQuestion>>, ApiError> {
    let cmd = GenerateQuizCommand {
        slide_id: parse_id(&slide_id, "slide ID")?,
        scope: scope_for(slide_image_id)?,
    };
    let questions = state.generate_quiz_handler().handle(cmd).await?;
    Ok(DataResponse::ok(questions))
}

/// GET /generate-flashcards/:slide_id
pub async fn generate_flashcards(
    State(state): State<AppState>,
    Path(slide_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    flashcards(state, slide_id, None).await
}

/// GET /generate-flashcards/:slide_id/:slide_image_id
pub async fn generate_page_flashcards(
    State(state): State<AppState>,
    Path((slide_id, slide_image_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    flashcards(state, slide_id, Some(slide_image_id)).await
}

async fn flashcards(
    state: AppState,
    slide_id: String,
    slide_image_id: Option<String>,
) -> Result<DataResponse<Vec<Flashcard>>, ApiError> {
    let cmd = GenerateFlashcardsCommand {
        slide_id: parse_id(&slide_id, "slide ID")?,
        scope: scope_for(slide_image_id)?,
    };
    let cards = state.generate_flashcards_handler().handle(cmd).await?;
    Ok(DataResponse::ok(cards))
}

// ════════════════════════════════════════════════════════════════════════════════
// Search
// ════════════════════════════════════════════════════════════════════════════════

/// POST /search
pub async fn search(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let cmd = AnswerQuestionCommand {
        question: request.question,
        context: request.context,
    };
    let answer = state.answer_question_handler().handle(cmd).await?;
    Ok(DataResponse::ok(answer))
}
