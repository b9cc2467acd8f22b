//! QuizQuestionHandler - queries over stored quiz questions.

use std::sync::Arc;

use crate::application::ServiceError;
use crate::domain::catalog::Slide;
use crate::domain::foundation::{QuizQuestionId, SlideId, SlideImageId};
use crate::domain::study::QuizQuestion;
use crate::ports::{QuizQuestionRepository, SlideRepository};

pub struct QuizQuestionHandler {
    questions: Arc<dyn QuizQuestionRepository>,
    slides: Arc<dyn SlideRepository>,
}

impl QuizQuestionHandler {
    pub fn new(questions: Arc<dyn QuizQuestionRepository>, slides: Arc<dyn SlideRepository>) -> Self {
        Self { questions, slides }
    }

    pub async fn list_by_slide(&self, slide_id: &SlideId) -> Result<Vec<QuizQuestion>, ServiceError> {
        Ok(self.questions.find_by_slide(slide_id).await?)
    }

    pub async fn list_by_image(
        &self,
        slide_id: &SlideId,
        slide_image_id: &SlideImageId,
    ) -> Result<Vec<QuizQuestion>, ServiceError> {
        Ok(self
            .questions
            .find_by_slide_image(slide_id, slide_image_id)
            .await?)
    }

    /// Slides that have at least one question. Slides deleted since are
    /// left out.
    pub async fn slides_with_questions(&self) -> Result<Vec<Slide>, ServiceError> {
        let ids = self.questions.distinct_slide_ids().await?;
        Ok(self.slides.find_by_ids(&ids).await?)
    }

    pub async fn delete(&self, id: &QuizQuestionId) -> Result<(), ServiceError> {
        self.questions.delete(id).await?;
        tracing::info!(quiz_question_id = %id, "Quiz question deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryQuizQuestionRepository, InMemorySlideRepository};
    use crate::domain::study::GeneratedQuizQuestion;

    fn question(slide_id: SlideId, slide_image_id: SlideImageId) -> QuizQuestion {
        GeneratedQuizQuestion {
            question: "Evaluate".to_string(),
            answer_choices: vec!["a".to_string(), "b".to_string()],
            answer: "a".to_string(),
            rationale: String::new(),
        }
        .into_question(slide_id, slide_image_id)
    }

    #[tokio::test]
    async fn lists_distinct_slides_with_questions() {
        let questions = Arc::new(InMemoryQuizQuestionRepository::new());
        let slides = Arc::new(InMemorySlideRepository::new());
        let first = Slide::new("First", "", None).unwrap();
        let second = Slide::new("Second", "", None).unwrap();
        let bare = Slide::new("Bare", "", None).unwrap();
        for slide in [&first, &second, &bare] {
            slides.save(slide).await.unwrap();
        }
        questions
            .save_all(&[
                question(first.id, SlideImageId::new()),
                question(second.id, SlideImageId::new()),
                question(first.id, SlideImageId::new()),
            ])
            .await
            .unwrap();
        let handler = QuizQuestionHandler::new(questions, slides);

        let names: Vec<String> = handler
            .slides_with_questions()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();

        assert_eq!(names, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn filters_by_image_and_deletes() {
        let questions = Arc::new(InMemoryQuizQuestionRepository::new());
        let slide = SlideId::new();
        let image = SlideImageId::new();
        let kept = question(slide, image);
        let other = question(slide, SlideImageId::new());
        questions.save_all(&[kept.clone(), other]).await.unwrap();
        let handler =
            QuizQuestionHandler::new(questions, Arc::new(InMemorySlideRepository::new()));

        assert_eq!(handler.list_by_slide(&slide).await.unwrap().len(), 2);
        assert_eq!(
            handler.list_by_image(&slide, &image).await.unwrap(),
            vec![kept.clone()]
        );

        handler.delete(&kept.id).await.unwrap();
        assert!(handler.list_by_image(&slide, &image).await.unwrap().is_empty());
        assert!(matches!(
            handler.delete(&kept.id).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
