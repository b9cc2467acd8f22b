//! Speech synthesis configuration

use secrecy::Secret;
use serde::Deserialize;

use super::error::ValidationError;

/// Speech synthesis configuration
///
/// The OpenAI voice reuses `ai.openai_api_key`.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    /// Which synthesizer narrates pages
    #[serde(default)]
    pub provider: SpeechProvider,

    /// OpenAI speech model
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// OpenAI voice
    #[serde(default = "default_openai_voice")]
    pub openai_voice: String,

    /// OpenAI playback speed
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// Deepgram API key
    pub deepgram_api_key: Option<Secret<String>>,

    /// Deepgram voice model
    #[serde(default = "default_deepgram_model")]
    pub deepgram_model: String,
}

/// Speech synthesis provider
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpeechProvider {
    #[default]
    OpenAI,
    Deepgram,
}

impl SpeechConfig {
    /// Validate speech configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.provider == SpeechProvider::Deepgram && self.deepgram_api_key.is_none() {
            return Err(ValidationError::MissingRequired("SPEECH__DEEPGRAM_API_KEY"));
        }
        if !(0.25..=4.0).contains(&self.speed) {
            return Err(ValidationError::InvalidSpeechSpeed);
        }
        Ok(())
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            provider: SpeechProvider::default(),
            openai_model: default_openai_model(),
            openai_voice: default_openai_voice(),
            speed: default_speed(),
            deepgram_api_key: None,
            deepgram_model: default_deepgram_model(),
        }
    }
}

fn default_openai_model() -> String {
    "tts-1".to_string()
}

fn default_openai_voice() -> String {
    "alloy".to_string()
}

fn default_speed() -> f32 {
    1.0
}

fn default_deepgram_model() -> String {
    "aura-athena-en".to_string()
}
