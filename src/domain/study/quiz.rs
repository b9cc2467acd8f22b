//! QuizQuestion - a multiple-choice review question generated from slides.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{QuizQuestionId, SlideId, SlideImageId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: QuizQuestionId,
    pub question: String,
    pub answer_choices: Vec<String>,
    pub answer: String,
    pub rationale: String,
    pub slide_id: SlideId,
    pub slide_image_id: SlideImageId,
}

/// A question as returned by the completion API, before it is tagged with
/// its origin.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedQuizQuestion {
    pub question: String,
    #[serde(default)]
    pub answer_choices: Vec<String>,
    pub answer: String,
    #[serde(default)]
    pub rationale: String,
}

impl GeneratedQuizQuestion {
    /// Assigns a fresh id and the originating slide and image.
    pub fn into_question(self, slide_id: SlideId, slide_image_id: SlideImageId) -> QuizQuestion {
        QuizQuestion {
            id: QuizQuestionId::new(),
            question: self.question,
            answer_choices: self.answer_choices,
            answer: self.answer,
            rationale: self.rationale,
            slide_id,
            slide_image_id,
        }
    }
}
