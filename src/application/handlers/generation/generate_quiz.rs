//! GenerateQuizHandler - evaluate-level multiple-choice questions from page
//! narration.

use std::sync::Arc;

use super::{GenerationScope, GenerationSettings};
use crate::application::ServiceError;
use crate::domain::catalog::SlideImage;
use crate::domain::foundation::SlideId;
use crate::domain::generation::batching::chunk_images;
use crate::domain::generation::context::{chunk_context, quiz_image_context};
use crate::domain::generation::payload::decode_quiz_questions;
use crate::domain::generation::prompts::quiz_prompt;
use crate::domain::study::QuizQuestion;
use crate::ports::{
    AIProvider, CompletionRequest, Message, QuizQuestionRepository, SlideImageRepository,
};

const QUIZ_MAX_TOKENS: u32 = 4000;

#[derive(Debug, Clone)]
pub struct GenerateQuizCommand {
    pub slide_id: SlideId,
    pub scope: GenerationScope,
}

pub struct GenerateQuizHandler {
    images: Arc<dyn SlideImageRepository>,
    questions: Arc<dyn QuizQuestionRepository>,
    ai: Arc<dyn AIProvider>,
    settings: GenerationSettings,
}

impl GenerateQuizHandler {
    pub fn new(
        images: Arc<dyn SlideImageRepository>,
        questions: Arc<dyn QuizQuestionRepository>,
        ai: Arc<dyn AIProvider>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            images,
            questions,
            ai,
            settings,
        }
    }

    /// Generates, stores and returns new questions.
    pub async fn handle(&self, cmd: GenerateQuizCommand) -> Result<Vec<QuizQuestion>, ServiceError> {
        match cmd.scope {
            GenerationScope::Deck => self.for_deck(cmd.slide_id).await,
            GenerationScope::Page(image_id) => {
                let image = self
                    .images
                    .find_by_id(&image_id)
                    .await?
                    .filter(|image| image.slide_id == cmd.slide_id)
                    .ok_or_else(|| ServiceError::not_found("Slide image not found"))?;
                self.for_page(&image).await
            }
        }
    }

    /// One completion per chunk of consecutive pages.
    async fn for_deck(&self, slide_id: SlideId) -> Result<Vec<QuizQuestion>, ServiceError> {
        let deck = self.images.find_by_slide(&slide_id).await?;

        let mut all = Vec::new();
        for chunk in chunk_images(&deck, self.settings.quiz_chunk_size) {
            // Chunks are never empty.
            let Some(last) = chunk.last() else { continue };
            let context = chunk_context(chunk)?;
            let prompt = quiz_prompt(self.settings.quiz_questions_per_chunk, &context);

            let questions = self.generate(&prompt, slide_id, last).await?;
            self.questions.save_all(&questions).await?;
            all.extend(questions);
        }

        tracing::info!(slide_id = %slide_id, questions = all.len(), "Quiz generated");
        Ok(all)
    }

    /// A few more questions for one page, steering away from existing ones.
    async fn for_page(&self, image: &SlideImage) -> Result<Vec<QuizQuestion>, ServiceError> {
        let existing = self
            .questions
            .find_by_slide_image(&image.slide_id, &image.id)
            .await?;
        let context = quiz_image_context(image, &existing)?;
        let prompt = quiz_prompt(self.settings.quiz_questions_per_image, &context);

        let questions = self.generate(&prompt, image.slide_id, image).await?;
        self.questions.save_all(&questions).await?;
        Ok(questions)
    }

    async fn generate(
        &self,
        prompt: &str,
        slide_id: SlideId,
        anchor: &SlideImage,
    ) -> Result<Vec<QuizQuestion>, ServiceError> {
        let request = CompletionRequest::new()
            .with_message(Message::user(prompt))
            .with_max_tokens(QUIZ_MAX_TOKENS)
            .with_json_output();
        let response = self.ai.complete(request).await?;

        let generated = decode_quiz_questions(&response.content)?;
        Ok(generated
            .into_iter()
            .map(|q| q.into_question(slide_id, anchor.id))
            .collect())
    }
}
