//! Speech Synthesizer Port - text-to-speech for page narration.
//!
//! Implementations send narration text to a speech API and hand back the
//! encoded audio. The caller decides where the audio is stored.

use async_trait::async_trait;
use thiserror::Error;

/// Port for text-to-speech providers.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesizes `text` into a single audio clip.
    ///
    /// # Errors
    ///
    /// - `EmptyText` when there is nothing to read
    /// - `Upstream` when the provider rejects the request
    async fn synthesize(&self, text: &str) -> Result<SynthesizedAudio, SpeechError>;

    /// Short provider name for logs.
    fn provider_name(&self) -> &'static str;
}

/// Encoded audio returned by a synthesizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAudio {
    pub bytes: Vec<u8>,
    pub content_type: String,
    /// File extension without the dot.
    pub extension: String,
}

impl SynthesizedAudio {
    /// MP3 audio, the format every supported provider returns.
    pub fn mp3(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            content_type: "audio/mpeg".to_string(),
            extension: "mp3".to_string(),
        }
    }
}

/// Speech synthesis errors.
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("no text to synthesize")]
    EmptyText,

    #[error("speech provider authentication failed")]
    AuthenticationFailed,

    #[error("speech provider returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("speech request failed: {0}")]
    Network(String),

    #[error("speech request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mp3_sets_content_type_and_extension() {
        let audio = SynthesizedAudio::mp3(vec![0xFF, 0xFB]);
        assert_eq!(audio.content_type, "audio/mpeg");
        assert_eq!(audio.extension, "mp3");
    }

    #[test]
    fn speech_synthesizer_is_object_safe() {
        fn _accepts_dyn(_s: &dyn SpeechSynthesizer) {}
    }
}
