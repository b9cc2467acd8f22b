//! Page narration: the vision model explains one page image at a time,
//! with the narration of the preceding pages as context.

use serde_json::json;
use std::sync::Arc;

use crate::application::{ProgressReporter, ServiceError};
use crate::domain::catalog::SlideImage;
use crate::domain::foundation::{SlideId, SlideImageId};
use crate::domain::generation::context::narration_context;
use crate::domain::generation::prompts::LECTURE_NARRATION_PROMPT;
use crate::ports::{AIProvider, CompletionRequest, Message, SlideImageRepository};

const NARRATION_MAX_TOKENS: u32 = 3000;

/// Asks the vision model to narrate `image` after `context`.
async fn narrate(
    ai: &dyn AIProvider,
    image: &SlideImage,
    context: String,
) -> Result<String, ServiceError> {
    let prompt = format!("{}{}", context, LECTURE_NARRATION_PROMPT);
    let request = CompletionRequest::new()
        .with_message(Message::user_with_image(prompt, &image.image_url))
        .with_max_tokens(NARRATION_MAX_TOKENS);

    let response = ai.complete(request).await?;
    tracing::debug!(
        slide_image_id = %image.id,
        tokens = response.usage.total_tokens,
        "Page narrated"
    );
    Ok(response.content)
}

// ════════════════════════════════════════════════════════════════════════════
// Single page
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct GenerateImageTextCommand {
    pub slide_image_id: SlideImageId,
    /// Regenerate even when the page already has text.
    pub update: bool,
}

pub struct GenerateImageTextHandler {
    images: Arc<dyn SlideImageRepository>,
    ai: Arc<dyn AIProvider>,
    context_window: usize,
}

impl GenerateImageTextHandler {
    pub fn new(
        images: Arc<dyn SlideImageRepository>,
        ai: Arc<dyn AIProvider>,
        context_window: usize,
    ) -> Self {
        Self {
            images,
            ai,
            context_window,
        }
    }

    /// Returns the page's narration, generating it if needed.
    pub async fn handle(
        &self,
        cmd: GenerateImageTextCommand,
        progress: &ProgressReporter,
    ) -> Result<String, ServiceError> {
        // 1. Load page
        let mut image = self
            .images
            .find_by_id(&cmd.slide_image_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Slide image not found"))?;
        if image.image_url.is_empty() {
            return Err(ServiceError::not_found("Image not found"));
        }

        // 2. Existing narration wins unless regeneration was asked for
        if image.has_text() && !cmd.update {
            return Ok(image.generated_text);
        }

        // 3. Build context from the preceding pages
        let deck = self.images.find_by_slide(&image.slide_id).await?;
        let context = narration_context(&deck, &image, self.context_window);

        // 4. Narrate
        progress.status("Processing image to generate text");
        let text = narrate(self.ai.as_ref(), &image, context).await?;

        // 5. Persist
        progress.status("Updating generated text in the database");
        image.set_generated_text(text.clone());
        self.images.update(&image).await?;

        Ok(text)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Whole deck
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct GenerateAllImageTextCommand {
    pub slide_id: SlideId,
}

pub struct GenerateAllImageTextHandler {
    images: Arc<dyn SlideImageRepository>,
    ai: Arc<dyn AIProvider>,
    context_window: usize,
}

impl GenerateAllImageTextHandler {
    pub fn new(
        images: Arc<dyn SlideImageRepository>,
        ai: Arc<dyn AIProvider>,
        context_window: usize,
    ) -> Self {
        Self {
            images,
            ai,
            context_window,
        }
    }

    /// Narrates every page without text, in order, and returns the deck.
    ///
    /// Every page, narrated now or earlier, is reported as processed.
    ///
    /// Each page sees the narration produced for the pages before it in the
    /// same run.
    pub async fn handle(
        &self,
        cmd: GenerateAllImageTextCommand,
        progress: &ProgressReporter,
    ) -> Result<Vec<SlideImage>, ServiceError> {
        let mut deck = self.images.find_by_slide(&cmd.slide_id).await?;
        progress.data(json!({ "totalImages": deck.len() }));

        for index in 0..deck.len() {
            let order = deck[index].order;
            if !deck[index].has_text() {
                if deck[index].image_url.is_empty() {
                    return Err(ServiceError::not_found("Image URL not found"));
                }
                progress.status(format!("Processing image for slide order {}", order));

                let context = narration_context(&deck, &deck[index], self.context_window);
                let text = narrate(self.ai.as_ref(), &deck[index], context).await?;

                deck[index].set_generated_text(text);
                self.images.update(&deck[index]).await?;
            }
            progress.data(json!({ "processedImage": order }));
        }

        tracing::info!(slide_id = %cmd.slide_id, pages = deck.len(), "Deck narrated");
        Ok(deck)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::memory::InMemorySlideImageRepository;
    use crate::ports::ContentPart;

    async fn seed(repo: &InMemorySlideImageRepository, texts: &[&str]) -> Vec<SlideImage> {
        let slide = SlideId::new();
        let mut images = Vec::new();
        for (order, text) in texts.iter().enumerate() {
            let mut image = SlideImage::new(slide, format!("https://b/p{}.png", order), order as i32);
            image.set_generated_text(*text);
            repo.save(&image).await.unwrap();
            images.push(image);
        }
        images
    }

    #[tokio::test]
    async fn narrates_with_preceding_pages_and_image() {
        let repo = Arc::new(InMemorySlideImageRepository::new());
        let images = seed(&repo, &["intro", "cells", "mitosis", ""]).await;
        let ai = MockAIProvider::new().with_response("Meiosis halves the chromosomes.");
        let handler = GenerateImageTextHandler::new(repo.clone(), Arc::new(ai.clone()), 2);

        let text = handler
            .handle(
                GenerateImageTextCommand {
                    slide_image_id: images[3].id,
                    update: false,
                },
                &ProgressReporter::silent(),
            )
            .await
            .unwrap();

        assert_eq!(text, "Meiosis halves the chromosomes.");
        let call = &ai.get_calls()[0];
        assert_eq!(call.max_tokens, Some(3000));
        let message = &call.messages[0];
        assert!(message
            .text()
            .starts_with("SLIDE 2: \ncells\n\nSLIDE 3: \nmitosis\n\nSLIDE 4: \n"));
        assert!(matches!(
            &message.parts[1],
            ContentPart::ImageUrl { url, .. } if url == "https://b/p3.png"
        ));
        let stored = repo.find_by_id(&images[3].id).await.unwrap().unwrap();
        assert_eq!(stored.generated_text, "Meiosis halves the chromosomes.");
    }

    #[tokio::test]
    async fn existing_text_short_circuits() {
        let repo = Arc::new(InMemorySlideImageRepository::new());
        let images = seed(&repo, &["already here"]).await;
        let ai = MockAIProvider::new();
        let handler = GenerateImageTextHandler::new(repo, Arc::new(ai.clone()), 2);

        let text = handler
            .handle(
                GenerateImageTextCommand {
                    slide_image_id: images[0].id,
                    update: false,
                },
                &ProgressReporter::silent(),
            )
            .await
            .unwrap();

        assert_eq!(text, "already here");
        assert_eq!(ai.call_count(), 0);
    }

    #[tokio::test]
    async fn update_flag_forces_regeneration() {
        let repo = Arc::new(InMemorySlideImageRepository::new());
        let images = seed(&repo, &["stale"]).await;
        let ai = MockAIProvider::new().with_response("fresh");
        let handler = GenerateImageTextHandler::new(repo, Arc::new(ai.clone()), 2);

        let text = handler
            .handle(
                GenerateImageTextCommand {
                    slide_image_id: images[0].id,
                    update: true,
                },
                &ProgressReporter::silent(),
            )
            .await
            .unwrap();

        assert_eq!(text, "fresh");
        assert_eq!(ai.call_count(), 1);
    }

    #[tokio::test]
    async fn batch_reports_every_page_and_chains_context() {
        let repo = Arc::new(InMemorySlideImageRepository::new());
        let images = seed(&repo, &["done", "", ""]).await;
        let ai = MockAIProvider::new()
            .with_response("second")
            .with_response("third");
        let handler = GenerateAllImageTextHandler::new(repo.clone(), Arc::new(ai.clone()), 2);
        let (reporter, mut rx) = ProgressReporter::channel();

        let deck = handler
            .handle(
                GenerateAllImageTextCommand {
                    slide_id: images[0].slide_id,
                },
                &reporter,
            )
            .await
            .unwrap();
        drop(reporter);

        let texts: Vec<&str> = deck.iter().map(|i| i.generated_text.as_str()).collect();
        assert_eq!(texts, vec!["done", "second", "third"]);
        assert_eq!(ai.call_count(), 2);
        assert!(ai.get_calls()[1].messages[0]
            .text()
            .starts_with("SLIDE 1: \ndone\n\nSLIDE 2: \nsecond\n\nSLIDE 3: \n"));

        let mut payloads = Vec::new();
        while let Some(event) = rx.recv().await {
            payloads.push(event.to_payload());
        }
        assert_eq!(
            payloads,
            vec![
                r#"{"totalImages":3}"#,
                r#"{"processedImage":0}"#,
                "Processing image for slide order 1",
                r#"{"processedImage":1}"#,
                "Processing image for slide order 2",
                r#"{"processedImage":2}"#,
            ]
        );
    }

    #[tokio::test]
    async fn batch_stops_at_first_failure() {
        let repo = Arc::new(InMemorySlideImageRepository::new());
        let images = seed(&repo, &["", ""]).await;
        let ai = MockAIProvider::new().with_error(MockError::Unavailable {
            message: "overloaded".to_string(),
        });
        let handler = GenerateAllImageTextHandler::new(repo.clone(), Arc::new(ai.clone()), 2);

        let err = handler
            .handle(
                GenerateAllImageTextCommand {
                    slide_id: images[0].slide_id,
                },
                &ProgressReporter::silent(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Upstream(_)));
        assert_eq!(ai.call_count(), 1);
        assert!(repo
            .find_by_slide(&images[0].slide_id)
            .await
            .unwrap()
            .iter()
            .all(|i| !i.has_text()));
    }
}
