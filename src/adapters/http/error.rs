//! HTTP error mapping.
//!
//! Every endpoint returns `Result<_, ApiError>`. The wrapped
//! [`ServiceError`] decides the status code and the JSON error body.

use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::application::ServiceError;

/// Error body sent for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<i64>,
}

/// HTTP-facing wrapper around [`ServiceError`].
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::InsufficientCredits { .. } => StatusCode::BAD_REQUEST,
            ServiceError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(ServiceError::invalid_input(rejection.body_text()))
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError(ServiceError::invalid_input(format!(
            "Invalid multipart body: {}",
            err
        )))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(error = %self.0, status = status.as_u16(), "Request rejected");
        }

        let credits = match &self.0 {
            ServiceError::InsufficientCredits { balance } => Some(*balance),
            _ => None,
        };
        let body = ErrorResponse {
            error: self.0.to_string(),
            status_code: status.as_u16(),
            credits,
        };
        (status, Json(body)).into_response()
    }
}

/// Parses an identifier taken from the request path.
pub fn parse_id<T: FromStr>(raw: &str, label: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError(ServiceError::invalid_input(format!("Invalid {} format", label))))
}
