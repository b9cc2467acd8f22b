//! Canned speech synthesizer for tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::ports::{SpeechError, SpeechSynthesizer, SynthesizedAudio};

/// Returns fixed bytes and records every input text.
#[derive(Debug, Clone, Default)]
pub struct MockSpeechSynthesizer {
    texts: Arc<Mutex<Vec<String>>>,
    fail_with: Option<u16>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockSpeechSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with an upstream error carrying `status`.
    pub fn failing(status: u16) -> Self {
        Self {
            fail_with: Some(status),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        lock(&self.texts).len()
    }

    pub fn texts(&self) -> Vec<String> {
        lock(&self.texts).clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSpeechSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<SynthesizedAudio, SpeechError> {
        lock(&self.texts).push(text.to_string());

        if let Some(status) = self.fail_with {
            return Err(SpeechError::Upstream {
                status,
                message: "mock failure".to_string(),
            });
        }
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }

        Ok(SynthesizedAudio::mp3(b"ID3mock".to_vec()))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
