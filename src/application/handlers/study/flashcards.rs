//! FlashcardHandler - queries over stored flashcards.

use std::sync::Arc;

use crate::application::ServiceError;
use crate::domain::catalog::Slide;
use crate::domain::foundation::{FlashcardId, SlideId, SlideImageId};
use crate::domain::study::Flashcard;
use crate::ports::{FlashcardRepository, SlideRepository};

pub struct FlashcardHandler {
    flashcards: Arc<dyn FlashcardRepository>,
    slides: Arc<dyn SlideRepository>,
}

impl FlashcardHandler {
    pub fn new(flashcards: Arc<dyn FlashcardRepository>, slides: Arc<dyn SlideRepository>) -> Self {
        Self { flashcards, slides }
    }

    pub async fn list_by_slide(&self, slide_id: &SlideId) -> Result<Vec<Flashcard>, ServiceError> {
        Ok(self.flashcards.find_by_slide(slide_id).await?)
    }

    pub async fn list_by_image(
        &self,
        slide_id: &SlideId,
        slide_image_id: &SlideImageId,
    ) -> Result<Vec<Flashcard>, ServiceError> {
        Ok(self
            .flashcards
            .find_by_slide_image(slide_id, slide_image_id)
            .await?)
    }

    pub async fn slides_with_flashcards(&self) -> Result<Vec<Slide>, ServiceError> {
        let ids = self.flashcards.distinct_slide_ids().await?;
        Ok(self.slides.find_by_ids(&ids).await?)
    }

    pub async fn delete(&self, id: &FlashcardId) -> Result<(), ServiceError> {
        self.flashcards.delete(id).await?;
        tracing::info!(flashcard_id = %id, "Flashcard deleted");
        Ok(())
    }
}
