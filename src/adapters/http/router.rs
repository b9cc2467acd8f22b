//! Top-level router: area routers plus the middleware stack.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::{Json, Router};
use http::{HeaderName, HeaderValue};
use serde_json::{json, Value};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::account::account_router;
use super::catalog::catalog_router;
use super::generation::generation_router;
use super::state::AppState;
use super::study::study_router;
use crate::config::ServerConfig;

/// Largest accepted request body (PDF uploads).
pub const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Creates the application router.
///
/// CRUD routes run under the configured request timeout. Generation routes
/// call external APIs for minutes at a time and are not bounded.
pub fn app_router(state: AppState, server: &ServerConfig) -> Router {
    let bounded = Router::new()
        .merge(catalog_router())
        .merge(account_router())
        .merge(study_router())
        .layer(TimeoutLayer::new(server.request_timeout()));

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/health", get(health))
        .merge(bounded)
        .merge(generation_router())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CompressionLayer::new())
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .with_state(state)
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Permissive when no origins are configured.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(allowed))
    }
}

