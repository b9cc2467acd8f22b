//! Route configuration for catalog endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    create_slide, create_space, delete_slide, delete_space, get_slide, get_space,
    list_slide_images, list_slides, list_space_slides, list_spaces, update_slide, update_space,
    upload_slide,
};
use crate::adapters::http::state::AppState;

/// Creates the catalog router.
///
/// Routes:
/// - `POST /space`, `GET /spaces`
/// - `GET|PUT|DELETE /space/:id`
/// - `GET /space-slides/:space_id`
/// - `POST /slide`, `POST /slide/upload`, `GET /slides`
/// - `GET|PUT|DELETE /slide/:id`
/// - `GET /slide/images/:slide_id`
pub fn catalog_router() -> Router<AppState> {
    Router::new()
        .route("/space", post(create_space))
        .route("/spaces", get(list_spaces))
        .route(
            "/space/:id",
            get(get_space).put(update_space).delete(delete_space),
        )
        .route("/space-slides/:space_id", get(list_space_slides))
        .route("/slide", post(create_slide))
        .route("/slide/upload", post(upload_slide))
        .route("/slides", get(list_slides))
        .route(
            "/slide/:id",
            get(get_slide).put(update_slide).delete(delete_slide),
        )
        .route("/slide/images/:slide_id", get(list_slide_images))
}
