//! QuizQuestion repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, QuizQuestionId, SlideId, SlideImageId};
use crate::domain::study::QuizQuestion;

#[async_trait]
pub trait QuizQuestionRepository: Send + Sync {
    /// Insert a batch of generated questions.
    async fn save_all(&self, questions: &[QuizQuestion]) -> Result<(), DomainError>;

    async fn find_by_slide(&self, slide_id: &SlideId) -> Result<Vec<QuizQuestion>, DomainError>;

    async fn find_by_slide_image(
        &self,
        slide_id: &SlideId,
        slide_image_id: &SlideImageId,
    ) -> Result<Vec<QuizQuestion>, DomainError>;

    /// Distinct decks that have at least one question.
    async fn distinct_slide_ids(&self) -> Result<Vec<SlideId>, DomainError>;

    /// # Errors
    ///
    /// - `QuizQuestionNotFound` if the question doesn't exist
    async fn delete(&self, id: &QuizQuestionId) -> Result<(), DomainError>;
}
