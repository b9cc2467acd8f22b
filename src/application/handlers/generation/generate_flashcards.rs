//! GenerateFlashcardsHandler - question/answer cards from page narration.

use std::sync::Arc;

use super::{GenerationScope, GenerationSettings};
use crate::application::ServiceError;
use crate::domain::catalog::SlideImage;
use crate::domain::foundation::SlideId;
use crate::domain::generation::batching::chunk_images;
use crate::domain::generation::context::{chunk_context, flashcard_image_context};
use crate::domain::generation::payload::decode_flashcards;
use crate::domain::generation::prompts::flashcard_prompt;
use crate::domain::study::Flashcard;
use crate::ports::{
    AIProvider, CompletionRequest, FlashcardRepository, Message, SlideImageRepository,
};

const FLASHCARD_MAX_TOKENS: u32 = 4000;

#[derive(Debug, Clone)]
pub struct GenerateFlashcardsCommand {
    pub slide_id: SlideId,
    pub scope: GenerationScope,
}

pub struct GenerateFlashcardsHandler {
    images: Arc<dyn SlideImageRepository>,
    flashcards: Arc<dyn FlashcardRepository>,
    ai: Arc<dyn AIProvider>,
    settings: GenerationSettings,
}

impl GenerateFlashcardsHandler {
    pub fn new(
        images: Arc<dyn SlideImageRepository>,
        flashcards: Arc<dyn FlashcardRepository>,
        ai: Arc<dyn AIProvider>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            images,
            flashcards,
            ai,
            settings,
        }
    }

    pub async fn handle(&self, cmd: GenerateFlashcardsCommand) -> Result<Vec<Flashcard>, ServiceError> {
        match cmd.scope {
            GenerationScope::Deck => {
                let deck = self.images.find_by_slide(&cmd.slide_id).await?;
                let mut all = Vec::new();
                for chunk in chunk_images(&deck, self.settings.flashcard_chunk_size) {
                    let Some(last) = chunk.last() else { continue };
                    let context = chunk_context(chunk)?;
                    let cards = self.generate(&context, cmd.slide_id, last).await?;
                    self.flashcards.save_all(&cards).await?;
                    all.extend(cards);
                }
                tracing::info!(slide_id = %cmd.slide_id, flashcards = all.len(), "Flashcards generated");
                Ok(all)
            }
            GenerationScope::Page(image_id) => {
                let image = self
                    .images
                    .find_by_id(&image_id)
                    .await?
                    .filter(|image| image.slide_id == cmd.slide_id)
                    .ok_or_else(|| ServiceError::not_found("Slide image not found"))?;
                let existing = self
                    .flashcards
                    .find_by_slide_image(&image.slide_id, &image.id)
                    .await?;
                let context = flashcard_image_context(&image, &existing)?;
                let cards = self.generate(&context, image.slide_id, &image).await?;
                self.flashcards.save_all(&cards).await?;
                Ok(cards)
            }
        }
    }

    async fn generate(
        &self,
        context: &str,
        slide_id: SlideId,
        anchor: &SlideImage,
    ) -> Result<Vec<Flashcard>, ServiceError> {
        let request = CompletionRequest::new()
            .with_message(Message::user(flashcard_prompt(context)))
            .with_max_tokens(FLASHCARD_MAX_TOKENS);
        let response = self.ai.complete(request).await?;

        Ok(decode_flashcards(&response.content)?
            .into_iter()
            .map(|card| card.into_flashcard(slide_id, anchor.id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::memory::{InMemoryFlashcardRepository, InMemorySlideImageRepository};
    use crate::ports::ResponseFormat;

    const TWO_CARDS: &str = "```json\n{\"flashcards\":[{\"question\":\"Q1\",\"answer\":\"A1\"},{\"question\":\"Q2\",\"answer\":\"A2\"}]}\n```";

    async fn seeded(pages: usize) -> (Arc<InMemorySlideImageRepository>, Vec<SlideImage>) {
        let images = Arc::new(InMemorySlideImageRepository::new());
        let slide = SlideId::new();
        let mut deck = Vec::new();
        for order in 0..pages {
            let mut image = SlideImage::new(slide, "url", order as i32);
            image.set_generated_text(format!("page {}", order));
            images.save(&image).await.unwrap();
            deck.push(image);
        }
        (images, deck)
    }

    #[tokio::test]
    async fn batch_uses_chunks_of_ten_without_json_mode() {
        let (images, deck) = seeded(12).await;
        let cards = Arc::new(InMemoryFlashcardRepository::new());
        let ai = MockAIProvider::new()
            .with_response(TWO_CARDS)
            .with_response(TWO_CARDS);
        let handler = GenerateFlashcardsHandler::new(
            images,
            cards.clone(),
            Arc::new(ai.clone()),
            GenerationSettings::default(),
        );

        let created = handler
            .handle(GenerateFlashcardsCommand {
                slide_id: deck[0].slide_id,
                scope: GenerationScope::Deck,
            })
            .await
            .unwrap();

        let calls = ai.get_calls();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|c| c.response_format == ResponseFormat::Text));
        assert!(calls.iter().all(|c| c.max_tokens == Some(4000)));
        assert!(calls[1].messages[0].text().contains("\npage 11\n"));
        assert!(!calls[1].messages[0].text().contains("\npage 9\n"));

        assert_eq!(created.len(), 4);
        assert_eq!(created[0].slide_image_id, deck[9].id);
        assert_eq!(created[3].slide_image_id, deck[11].id);
        assert_eq!(cards.len(), 4);
    }

    #[tokio::test]
    async fn single_page_mentions_existing_cards() {
        let (images, deck) = seeded(1).await;
        let cards = Arc::new(InMemoryFlashcardRepository::new());
        let ai = MockAIProvider::new()
            .with_response(TWO_CARDS)
            .with_response(TWO_CARDS);
        let handler = GenerateFlashcardsHandler::new(
            images,
            cards.clone(),
            Arc::new(ai.clone()),
            GenerationSettings::default(),
        );
        let cmd = GenerateFlashcardsCommand {
            slide_id: deck[0].slide_id,
            scope: GenerationScope::Page(deck[0].id),
        };

        handler.handle(cmd.clone()).await.unwrap();
        handler.handle(cmd).await.unwrap();

        let second = ai.get_calls()[1].messages[0].text();
        assert!(second.contains("page 0\n\nExisting Flashcards:\nQ: Q1\nA: A1\nQ: Q2\nA: A2\n"));
        assert_eq!(cards.len(), 4);
    }
}
