//! HTTP DTOs for generation endpoints.

use serde::{Deserialize, Serialize};

/// `?update=true` forces regeneration of an existing artifact.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct UpdateQuery {
    #[serde(default)]
    pub update: bool,
}

/// Body of the non-streaming audio endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateAudioRequest {
    #[serde(default)]
    pub slide_image_id: String,
    #[serde(default)]
    pub update: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub context: Option<String>,
}

/// `{"status":"success","message":..}`
#[derive(Debug, Clone, Serialize)]
pub struct StatusMessageResponse {
    pub status: &'static str,
    pub message: String,
}

impl StatusMessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
        }
    }
}
