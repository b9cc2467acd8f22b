//! OpenAI text-to-speech adapter.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time::Duration;

use super::{audio_bytes, request_error};
use crate::ports::{SpeechError, SpeechSynthesizer, SynthesizedAudio};

/// Configuration for OpenAI speech.
#[derive(Debug, Clone)]
pub struct OpenAISpeechConfig {
    api_key: Secret<String>,
    pub model: String,
    pub voice: String,
    pub speed: f32,
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenAISpeechConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "tts-1".to_string(),
            voice: "alloy".to_string(),
            speed: 1.0,
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Synthesizes narration through `POST /audio/speech`.
pub struct OpenAISpeech {
    config: OpenAISpeechConfig,
    client: Client,
}

impl OpenAISpeech {
    pub fn new(config: OpenAISpeechConfig) -> Result<Self, SpeechError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SpeechError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn speech_url(&self) -> String {
        format!("{}/audio/speech", self.config.base_url.trim_end_matches('/'))
    }

    fn to_request<'a>(&'a self, text: &'a str) -> SpeechRequest<'a> {
        SpeechRequest {
            model: &self.config.model,
            input: text,
            voice: &self.config.voice,
            speed: self.config.speed,
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAISpeech {
    async fn synthesize(&self, text: &str) -> Result<SynthesizedAudio, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }

        let response = self
            .client
            .post(self.speech_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&self.to_request(text))
            .send()
            .await
            .map_err(|e| request_error(e, self.config.timeout.as_secs() as u32))?;

        Ok(SynthesizedAudio::mp3(audio_bytes(response).await?))
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    speed: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_matches_api_shape() {
        let speech = OpenAISpeech::new(OpenAISpeechConfig::new("k")).unwrap();
        let body = serde_json::to_value(speech.to_request("Welcome to lecture one")).unwrap();

        assert_eq!(
            body,
            json!({"model": "tts-1", "input": "Welcome to lecture one", "voice": "alloy", "speed": 1.0})
        );
    }

    #[test]
    fn speech_url_uses_base() {
        let speech = OpenAISpeech::new(
            OpenAISpeechConfig::new("k").with_base_url("http://localhost:8080/v1/"),
        )
        .unwrap();
        assert_eq!(speech.speech_url(), "http://localhost:8080/v1/audio/speech");
    }

    #[tokio::test]
    async fn blank_text_is_rejected_before_any_request() {
        let speech = OpenAISpeech::new(OpenAISpeechConfig::new("k")).unwrap();
        assert!(matches!(
            speech.synthesize("   ").await,
            Err(SpeechError::EmptyText)
        ));
    }
}
