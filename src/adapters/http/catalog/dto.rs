//! HTTP DTOs for catalog endpoints.

use serde::Deserialize;

/// Request to create a space.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSpaceRequest {
    #[serde(default)]
    pub name: String,
}

/// Request to create a slide that points at a hosted PDF.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSlideRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pdf_url: String,
    #[serde(default)]
    pub space_id: Option<String>,
}
