//! In-memory quiz questions and flashcards.

use async_trait::async_trait;
use std::sync::Mutex;

use super::lock;
use crate::domain::foundation::{
    DomainError, ErrorCode, FlashcardId, QuizQuestionId, SlideId, SlideImageId,
};
use crate::domain::study::{distinct_slide_ids, Flashcard, QuizQuestion};
use crate::ports::{FlashcardRepository, QuizQuestionRepository};

#[derive(Default)]
pub struct InMemoryQuizQuestionRepository {
    questions: Mutex<Vec<QuizQuestion>>,
}

impl InMemoryQuizQuestionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        lock(&self.questions).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.questions).is_empty()
    }
}

#[async_trait]
impl QuizQuestionRepository for InMemoryQuizQuestionRepository {
    async fn save_all(&self, questions: &[QuizQuestion]) -> Result<(), DomainError> {
        lock(&self.questions).extend_from_slice(questions);
        Ok(())
    }

    async fn find_by_slide(&self, slide_id: &SlideId) -> Result<Vec<QuizQuestion>, DomainError> {
        Ok(lock(&self.questions)
            .iter()
            .filter(|q| &q.slide_id == slide_id)
            .cloned()
            .collect())
    }

    async fn find_by_slide_image(
        &self,
        slide_id: &SlideId,
        slide_image_id: &SlideImageId,
    ) -> Result<Vec<QuizQuestion>, DomainError> {
        Ok(lock(&self.questions)
            .iter()
            .filter(|q| &q.slide_id == slide_id && &q.slide_image_id == slide_image_id)
            .cloned()
            .collect())
    }

    async fn distinct_slide_ids(&self) -> Result<Vec<SlideId>, DomainError> {
        Ok(distinct_slide_ids(
            lock(&self.questions).iter().map(|q| q.slide_id),
        ))
    }

    async fn delete(&self, id: &QuizQuestionId) -> Result<(), DomainError> {
        let mut questions = lock(&self.questions);
        let before = questions.len();
        questions.retain(|q| &q.id != id);
        if questions.len() == before {
            return Err(DomainError::new(
                ErrorCode::QuizQuestionNotFound,
                format!("Quiz question not found: {}", id),
            ));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryFlashcardRepository {
    cards: Mutex<Vec<Flashcard>>,
}

impl InMemoryFlashcardRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        lock(&self.cards).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.cards).is_empty()
    }
}

#[async_trait]
impl FlashcardRepository for InMemoryFlashcardRepository {
    async fn save_all(&self, cards: &[Flashcard]) -> Result<(), DomainError> {
        lock(&self.cards).extend_from_slice(cards);
        Ok(())
    }

    async fn find_by_slide(&self, slide_id: &SlideId) -> Result<Vec<Flashcard>, DomainError> {
        Ok(lock(&self.cards)
            .iter()
            .filter(|c| &c.slide_id == slide_id)
            .cloned()
            .collect())
    }

    async fn find_by_slide_image(
        &self,
        slide_id: &SlideId,
        slide_image_id: &SlideImageId,
    ) -> Result<Vec<Flashcard>, DomainError> {
        Ok(lock(&self.cards)
            .iter()
            .filter(|c| &c.slide_id == slide_id && &c.slide_image_id == slide_image_id)
            .cloned()
            .collect())
    }

    async fn distinct_slide_ids(&self) -> Result<Vec<SlideId>, DomainError> {
        Ok(distinct_slide_ids(lock(&self.cards).iter().map(|c| c.slide_id)))
    }

    async fn delete(&self, id: &FlashcardId) -> Result<(), DomainError> {
        let mut cards = lock(&self.cards);
        let before = cards.len();
        cards.retain(|c| &c.id != id);
        if cards.len() == before {
            return Err(DomainError::new(
                ErrorCode::FlashcardNotFound,
                format!("Flashcard not found: {}", id),
            ));
        }
        Ok(())
    }
}
