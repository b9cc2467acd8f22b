//! Speech Synthesizer Adapters.
//!
//! - `OpenAISpeech` - OpenAI text-to-speech
//! - `DeepgramSpeech` - Deepgram Aura voices
//! - `MockSpeechSynthesizer` - Canned audio for tests

mod deepgram_speech;
mod mock;
mod openai_speech;

pub use deepgram_speech::{DeepgramSpeech, DeepgramSpeechConfig};
pub use mock::MockSpeechSynthesizer;
pub use openai_speech::{OpenAISpeech, OpenAISpeechConfig};

use reqwest::Response;

use crate::ports::SpeechError;

/// Maps a transport failure to a speech error.
fn request_error(err: reqwest::Error, timeout_secs: u32) -> SpeechError {
    if err.is_timeout() {
        SpeechError::Timeout { timeout_secs }
    } else {
        SpeechError::Network(err.to_string())
    }
}

/// Reads the audio body, or turns a non-success status into an error.
async fn audio_bytes(response: Response) -> Result<Vec<u8>, SpeechError> {
    let status = response.status();

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(match status.as_u16() {
            401 | 403 => SpeechError::AuthenticationFailed,
            code => SpeechError::Upstream {
                status: code,
                message,
            },
        });
    }

    response
        .bytes()
        .await
        .map(|bytes| bytes.to_vec())
        .map_err(|e| SpeechError::Network(format!("Failed to read audio body: {}", e)))
}
