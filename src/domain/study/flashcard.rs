//! Flashcard - a question/answer review card generated from slides.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{FlashcardId, SlideId, SlideImageId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: FlashcardId,
    pub question: String,
    pub answer: String,
    pub slide_id: SlideId,
    pub slide_image_id: SlideImageId,
}

/// A card as returned by the completion API. Extra fields such as a
/// rationale are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedFlashcard {
    pub question: String,
    pub answer: String,
}

impl GeneratedFlashcard {
    pub fn into_flashcard(self, slide_id: SlideId, slide_image_id: SlideImageId) -> Flashcard {
        Flashcard {
            id: FlashcardId::new(),
            question: self.question,
            answer: self.answer,
            slide_id,
            slide_image_id,
        }
    }
}
