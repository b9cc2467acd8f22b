//! CompileNotesHandler - gathers page narration into the slide's notes.

use std::sync::Arc;

use crate::application::ServiceError;
use crate::domain::foundation::SlideId;
use crate::domain::generation::MissingText;
use crate::ports::{SlideImageRepository, SlideRepository};

#[derive(Debug, Clone)]
pub struct CompileNotesCommand {
    pub slide_id: SlideId,
}

pub struct CompileNotesHandler {
    slides: Arc<dyn SlideRepository>,
    images: Arc<dyn SlideImageRepository>,
}

impl CompileNotesHandler {
    pub fn new(slides: Arc<dyn SlideRepository>, images: Arc<dyn SlideImageRepository>) -> Self {
        Self { slides, images }
    }

    /// Stores and returns the narration of every page in reading order.
    pub async fn handle(&self, cmd: CompileNotesCommand) -> Result<Vec<String>, ServiceError> {
        // 1. Load slide and pages
        let mut slide = self
            .slides
            .find_by_id(&cmd.slide_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Slide not found"))?;
        let images = self.images.find_by_slide(&slide.id).await?;

        // 2. Every page must be narrated
        let mut notes = Vec::with_capacity(images.len());
        for image in images {
            if !image.has_text() {
                return Err(MissingText {
                    image_id: image.id,
                    order: image.order,
                }
                .into());
            }
            notes.push(image.generated_text);
        }

        // 3. Persist
        slide.set_notes(notes.clone());
        self.slides.update(&slide).await?;

        tracing::info!(slide_id = %slide.id, pages = notes.len(), "Notes compiled");
        Ok(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemorySlideImageRepository, InMemorySlideRepository};
    use crate::domain::catalog::{Slide, SlideImage};

    async fn fixture(
        texts: &[&str],
    ) -> (
        Arc<InMemorySlideRepository>,
        Arc<InMemorySlideImageRepository>,
        Slide,
    ) {
        let slides = Arc::new(InMemorySlideRepository::new());
        let images = Arc::new(InMemorySlideImageRepository::new());
        let slide = Slide::new("Genetics", "", None).unwrap();
        slides.save(&slide).await.unwrap();
        // Saved out of order on purpose.
        for (order, text) in texts.iter().enumerate().rev() {
            let mut image = SlideImage::new(slide.id, "url", order as i32);
            image.set_generated_text(*text);
            images.save(&image).await.unwrap();
        }
        (slides, images, slide)
    }

    #[tokio::test]
    async fn collects_narration_in_reading_order() {
        let (slides, images, slide) = fixture(&["one", "two", "three"]).await;
        let handler = CompileNotesHandler::new(slides.clone(), images);

        let notes = handler
            .handle(CompileNotesCommand { slide_id: slide.id })
            .await
            .unwrap();

        assert_eq!(notes, vec!["one", "two", "three"]);
        let stored = slides.find_by_id(&slide.id).await.unwrap().unwrap();
        assert_eq!(stored.generated_notes, notes);
    }

    #[tokio::test]
    async fn page_without_text_is_not_found() {
        let (slides, images, slide) = fixture(&["one", ""]).await;
        let handler = CompileNotesHandler::new(slides.clone(), images);

        let err = handler
            .handle(CompileNotesCommand { slide_id: slide.id })
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(_)));
        let stored = slides.find_by_id(&slide.id).await.unwrap().unwrap();
        assert!(stored.generated_notes.is_empty());
    }

    #[tokio::test]
    async fn unknown_slide_is_not_found() {
        let handler = CompileNotesHandler::new(
            Arc::new(InMemorySlideRepository::new()),
            Arc::new(InMemorySlideImageRepository::new()),
        );
        let err = handler
            .handle(CompileNotesCommand {
                slide_id: SlideId::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::NotFound("Slide not found".to_string()));
    }
}
