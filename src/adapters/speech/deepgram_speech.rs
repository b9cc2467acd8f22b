//! Deepgram Aura text-to-speech adapter.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time::Duration;

use super::{audio_bytes, request_error};
use crate::ports::{SpeechError, SpeechSynthesizer, SynthesizedAudio};

/// Configuration for Deepgram speech.
#[derive(Debug, Clone)]
pub struct DeepgramSpeechConfig {
    api_key: Secret<String>,
    /// Aura voice model, e.g. `aura-athena-en`.
    pub voice: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl DeepgramSpeechConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            voice: "aura-athena-en".to_string(),
            base_url: "https://api.deepgram.com/v1".to_string(),
            timeout: Duration::from_secs(120),
        }
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

/// Synthesizes narration through `POST /speak?model={voice}`.
pub struct DeepgramSpeech {
    config: DeepgramSpeechConfig,
    client: Client,
}

impl DeepgramSpeech {
    pub fn new(config: DeepgramSpeechConfig) -> Result<Self, SpeechError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SpeechError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn speak_url(&self) -> String {
        format!(
            "{}/speak?model={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.voice
        )
    }
}

#[async_trait]
impl SpeechSynthesizer for DeepgramSpeech {
    async fn synthesize(&self, text: &str) -> Result<SynthesizedAudio, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }

        let response = self
            .client
            .post(self.speak_url())
            .header(
                "Authorization",
                format!("Token {}", self.config.api_key.expose_secret()),
            )
            .json(&SpeakRequest { text })
            .send()
            .await
            .map_err(|e| request_error(e, self.config.timeout.as_secs() as u32))?;

        Ok(SynthesizedAudio::mp3(audio_bytes(response).await?))
    }

    fn provider_name(&self) -> &'static str {
        "deepgram"
    }
}

#[derive(Debug, Serialize)]
struct SpeakRequest<'a> {
    text: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speak_url_carries_voice_model() {
        let speech = DeepgramSpeech::new(DeepgramSpeechConfig::new("k")).unwrap();
        assert_eq!(
            speech.speak_url(),
            "https://api.deepgram.com/v1/speak?model=aura-athena-en"
        );
    }

    #[test]
    fn custom_voice_is_used() {
        let speech =
            DeepgramSpeech::new(DeepgramSpeechConfig::new("k").with_voice("aura-orion-en"))
                .unwrap();
        assert!(speech.speak_url().ends_with("model=aura-orion-en"));
    }

    #[test]
    fn body_is_single_text_field() {
        let body = serde_json::to_string(&SpeakRequest { text: "hi" }).unwrap();
        assert_eq!(body, r#"{"text":"hi"}"#);
    }
}
