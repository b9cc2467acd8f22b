//! DeleteSlideHandler - removes a slide and everything derived from it.
//!
//! The document goes first. Blob cleanup is best effort: a failed storage
//! delete is logged and counted, and the page documents are removed
//! regardless.

use std::sync::Arc;

use crate::application::ServiceError;
use crate::domain::foundation::SlideId;
use crate::ports::{ObjectStorage, SlideImageRepository, SlideRepository};

#[derive(Debug, Clone)]
pub struct DeleteSlideCommand {
    pub slide_id: SlideId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteSlideResult {
    pub images_removed: u64,
    /// Storage deletes that were attempted and failed.
    pub blob_failures: usize,
}

pub struct DeleteSlideHandler {
    slides: Arc<dyn SlideRepository>,
    images: Arc<dyn SlideImageRepository>,
    storage: Arc<dyn ObjectStorage>,
}

impl DeleteSlideHandler {
    pub fn new(
        slides: Arc<dyn SlideRepository>,
        images: Arc<dyn SlideImageRepository>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            slides,
            images,
            storage,
        }
    }

    pub async fn handle(&self, cmd: DeleteSlideCommand) -> Result<DeleteSlideResult, ServiceError> {
        // 1. Load slide
        let slide = self
            .slides
            .find_by_id(&cmd.slide_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Slide not found"))?;

        // 2. Delete the document; nothing else is touched if this fails
        self.slides.delete(&slide.id).await?;

        // 3. Source PDF
        let mut blob_failures = 0;
        if slide.has_pdf() && !self.delete_blob(&slide.pdf_url).await {
            blob_failures += 1;
        }

        // 4. Page images and narration audio
        let images = self.images.find_by_slide(&slide.id).await?;
        for image in &images {
            for url in [&image.image_url, &image.audio_url] {
                if !url.is_empty() && !self.delete_blob(url).await {
                    blob_failures += 1;
                }
            }
        }

        // 5. Page documents
        let images_removed = self.images.delete_by_slide(&slide.id).await?;

        tracing::info!(
            slide_id = %slide.id,
            images_removed,
            blob_failures,
            "Slide deleted"
        );

        Ok(DeleteSlideResult {
            images_removed,
            blob_failures,
        })
    }

    /// Returns false when the delete was attempted and failed.
    async fn delete_blob(&self, url: &str) -> bool {
        let Some(key) = self.storage.key_from_url(url) else {
            tracing::warn!(url, "Cannot derive storage key from URL");
            return true;
        };

        match self.storage.delete(&key).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to delete blob");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemorySlideImageRepository, InMemorySlideRepository};
    use crate::adapters::storage::InMemoryObjectStorage;
    use crate::domain::catalog::{Slide, SlideImage};
    use crate::ports::StorageError;
    use async_trait::async_trait;

    const BASE: &str = "https://lectures.s3.amazonaws.com";

    struct Fixture {
        handler: DeleteSlideHandler,
        slides: Arc<InMemorySlideRepository>,
        images: Arc<InMemorySlideImageRepository>,
    }

    fn fixture(storage: Arc<dyn ObjectStorage>) -> Fixture {
        let slides = Arc::new(InMemorySlideRepository::new());
        let images = Arc::new(InMemorySlideImageRepository::new());
        Fixture {
            handler: DeleteSlideHandler::new(slides.clone(), images.clone(), storage),
            slides,
            images,
        }
    }

    async fn seed(f: &Fixture, pages: i32) -> Slide {
        let slide = Slide::new("Deck", format!("{}/slides/deck.pdf", BASE), None).unwrap();
        f.slides.save(&slide).await.unwrap();
        for order in 0..pages {
            let mut image =
                SlideImage::new(slide.id, format!("{}/slides/p{}.png", BASE, order), order);
            if order == 0 {
                image.set_audio_url(format!("{}/slides/audio/a0.mp3", BASE));
            }
            f.images.save(&image).await.unwrap();
        }
        slide
    }

    #[tokio::test]
    async fn deletes_documents_and_every_blob() {
        let storage = Arc::new(InMemoryObjectStorage::with_bucket("lectures"));
        let f = fixture(storage.clone());
        let slide = seed(&f, 3).await;

        let result = f
            .handler
            .handle(DeleteSlideCommand { slide_id: slide.id })
            .await
            .unwrap();

        assert_eq!(result.images_removed, 3);
        assert_eq!(result.blob_failures, 0);
        assert!(f.slides.find_by_id(&slide.id).await.unwrap().is_none());
        assert!(f.images.is_empty());

        let deleted = storage.deleted_keys().await;
        assert_eq!(deleted.len(), 5);
        assert!(deleted.contains(&"slides/deck.pdf".to_string()));
        assert!(deleted.contains(&"slides/audio/a0.mp3".to_string()));
    }

    #[tokio::test]
    async fn missing_slide_is_not_found_and_deletes_nothing() {
        let storage = Arc::new(InMemoryObjectStorage::new());
        let f = fixture(storage.clone());

        let err = f
            .handler
            .handle(DeleteSlideCommand {
                slide_id: SlideId::new(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, ServiceError::NotFound("Slide not found".to_string()));
        assert!(storage.deleted_keys().await.is_empty());
    }

    struct FailingStorage;

    #[async_trait]
    impl ObjectStorage for FailingStorage {
        async fn upload(&self, key: &str, _: Vec<u8>, _: &str) -> Result<String, StorageError> {
            Ok(self.public_url(key))
        }

        async fn delete(&self, key: &str) -> Result<(), StorageError> {
            Err(StorageError::Delete {
                key: key.to_string(),
                message: "access denied".to_string(),
            })
        }

        fn public_url(&self, key: &str) -> String {
            format!("{}/{}", BASE, key)
        }
    }

    #[tokio::test]
    async fn storage_failures_do_not_stop_the_cascade() {
        let f = fixture(Arc::new(FailingStorage));
        let slide = seed(&f, 2).await;

        let result = f
            .handler
            .handle(DeleteSlideCommand { slide_id: slide.id })
            .await
            .unwrap();

        assert_eq!(result.images_removed, 2);
        assert_eq!(result.blob_failures, 4);
        assert!(f.images.is_empty());
    }
}
