//! HTTP handlers for catalog endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::application::handlers::{CreateSlideCommand, DeleteSlideCommand, UploadSlideCommand};
use crate::domain::catalog::{SlidePatch, SpacePatch};
use crate::domain::foundation::{SlideId, SpaceId};

use super::dto::{CreateSlideRequest, CreateSpaceRequest};
use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::response::{DataResponse, MessageResponse};
use crate::adapters::http::state::AppState;

/// Empty or absent space ids mean "no space".
fn optional_space_id(raw: Option<&str>) -> Result<Option<SpaceId>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => parse_id(raw, "space ID").map(Some),
        None => Ok(None),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Spaces
// ════════════════════════════════════════════════════════════════════════════════

/// POST /space
pub async fn create_space(
    State(state): State<AppState>,
    payload: Result<Json<CreateSpaceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let space = state.space_handler().create(request.name).await?;
    Ok(DataResponse::ok(space))
}

/// GET /spaces
pub async fn list_spaces(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let spaces = state.space_handler().list().await?;
    Ok(DataResponse::ok(spaces))
}

/// GET /space/:id
pub async fn get_space(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: SpaceId = parse_id(&id, "space ID")?;
    let space = state.space_handler().get(&id).await?;
    Ok(DataResponse::ok(space))
}

/// PUT /space/:id
pub async fn update_space(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SpacePatch>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id: SpaceId = parse_id(&id, "space ID")?;
    let Json(patch) = payload?;
    let space = state.space_handler().update(&id, patch).await?;
    Ok(DataResponse::ok(space))
}

/// DELETE /space/:id
pub async fn delete_space(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: SpaceId = parse_id(&id, "space ID")?;
    state.space_handler().delete(&id).await?;
    Ok(MessageResponse::ok("Space deleted successfully"))
}

/// GET /space-slides/:space_id
pub async fn list_space_slides(
    State(state): State<AppState>,
    Path(space_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let space_id: SpaceId = parse_id(&space_id, "space ID")?;
    let slides = state.space_handler().list_slides(&space_id).await?;
    Ok(DataResponse::ok(slides))
}

// ════════════════════════════════════════════════════════════════════════════════
// Slides
// ════════════════════════════════════════════════════════════════════════════════

/// POST /slide
pub async fn create_slide(
    State(state): State<AppState>,
    payload: Result<Json<CreateSlideRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let cmd = CreateSlideCommand {
        name: request.name,
        pdf_url: request.pdf_url,
        space_id: optional_space_id(request.space_id.as_deref())?,
    };
    let slide = state.slide_handler().create(cmd).await?;
    Ok(DataResponse::ok(slide))
}

/// POST /slide/upload
///
/// Multipart fields: `file` (the PDF), `name`, and optionally `space_id`.
pub async fn upload_slide(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut name = String::new();
    let mut space_id = None;
    let mut pdf = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(str::to_owned);
        match field_name.as_deref() {
            Some("file") => pdf = field.bytes().await?.to_vec(),
            Some("name") => name = field.text().await?,
            Some("space_id") => space_id = optional_space_id(Some(&field.text().await?))?,
            _ => {}
        }
    }

    let cmd = UploadSlideCommand {
        name,
        space_id,
        pdf,
    };
    let slide = state.slide_handler().upload(cmd).await?;
    Ok(DataResponse::ok(slide))
}

/// GET /slides
pub async fn list_slides(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let slides = state.slide_handler().list().await?;
    Ok(DataResponse::ok(slides))
}

/// GET /slide/:id
pub async fn get_slide(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: SlideId = parse_id(&id, "slide ID")?;
    let slide = state.slide_handler().get(&id).await?;
    Ok(DataResponse::ok(slide))
}

/// PUT /slide/:id
pub async fn update_slide(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SlidePatch>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id: SlideId = parse_id(&id, "slide ID")?;
    let Json(patch) = payload?;
    let slide = state.slide_handler().update(&id, patch).await?;
    Ok(DataResponse::ok(slide))
}

/// DELETE /slide/:id - removes the slide, its pages and their blobs
pub async fn delete_slide(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let slide_id: SlideId = parse_id(&id, "slide ID")?;
    state
        .delete_slide_handler()
        .handle(DeleteSlideCommand { slide_id })
        .await?;
    Ok(MessageResponse::ok("Slide deleted successfully"))
}

/// GET /slide/images/:slide_id
pub async fn list_slide_images(
    State(state): State<AppState>,
    Path(slide_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let slide_id: SlideId = parse_id(&slide_id, "slide ID")?;
    let images = state.slide_handler().list_images(&slide_id).await?;
    Ok(DataResponse::ok(images))
}
