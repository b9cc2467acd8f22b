//! Generation workflow tunables

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::handlers::GenerationSettings;

/// Generation workflow tunables
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_quiz_chunk_size")]
    pub quiz_chunk_size: usize,

    #[serde(default = "default_quiz_questions_per_chunk")]
    pub quiz_questions_per_chunk: usize,

    #[serde(default = "default_quiz_questions_per_image")]
    pub quiz_questions_per_image: usize,

    #[serde(default = "default_flashcard_chunk_size")]
    pub flashcard_chunk_size: usize,

    /// Preceding pages given to the narrator
    #[serde(default = "default_context_window")]
    pub context_window: usize,
}

impl GenerationConfig {
    pub fn settings(&self) -> GenerationSettings {
        GenerationSettings {
            quiz_chunk_size: self.quiz_chunk_size,
            quiz_questions_per_chunk: self.quiz_questions_per_chunk,
            quiz_questions_per_image: self.quiz_questions_per_image,
            flashcard_chunk_size: self.flashcard_chunk_size,
            context_window: self.context_window,
        }
    }

    /// Validate generation tunables. A zero context window is allowed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let positive = [
            ("quiz_chunk_size", self.quiz_chunk_size),
            ("quiz_questions_per_chunk", self.quiz_questions_per_chunk),
            ("quiz_questions_per_image", self.quiz_questions_per_image),
            ("flashcard_chunk_size", self.flashcard_chunk_size),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(ValidationError::InvalidGenerationSetting(name));
            }
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            quiz_chunk_size: default_quiz_chunk_size(),
            quiz_questions_per_chunk: default_quiz_questions_per_chunk(),
            quiz_questions_per_image: default_quiz_questions_per_image(),
            flashcard_chunk_size: default_flashcard_chunk_size(),
            context_window: default_context_window(),
        }
    }
}

fn default_quiz_chunk_size() -> usize {
    5
}

fn default_quiz_questions_per_chunk() -> usize {
    10
}

fn default_quiz_questions_per_image() -> usize {
    3
}

fn default_flashcard_chunk_size() -> usize {
    10
}

fn default_context_window() -> usize {
    2
}
