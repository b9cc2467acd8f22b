//! Flashcard repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, FlashcardId, SlideId, SlideImageId};
use crate::domain::study::Flashcard;

#[async_trait]
pub trait FlashcardRepository: Send + Sync {
    /// Insert a batch of generated cards.
    async fn save_all(&self, cards: &[Flashcard]) -> Result<(), DomainError>;

    async fn find_by_slide(&self, slide_id: &SlideId) -> Result<Vec<Flashcard>, DomainError>;

    async fn find_by_slide_image(
        &self,
        slide_id: &SlideId,
        slide_image_id: &SlideImageId,
    ) -> Result<Vec<Flashcard>, DomainError>;

    /// Distinct decks that have at least one card.
    async fn distinct_slide_ids(&self) -> Result<Vec<SlideId>, DomainError>;

    /// # Errors
    ///
    /// - `FlashcardNotFound` if the card doesn't exist
    async fn delete(&self, id: &FlashcardId) -> Result<(), DomainError>;
}
