//! SlideHandler - CRUD over slides, PDF upload, and page listing.

use std::sync::Arc;

use crate::application::ServiceError;
use crate::domain::catalog::{Slide, SlideImage, SlidePatch};
use crate::domain::foundation::{SlideId, SpaceId};
use crate::domain::generation::keys;
use crate::ports::{ObjectStorage, SlideImageRepository, SlideRepository};

/// Create a slide that points at an already-hosted PDF.
#[derive(Debug, Clone)]
pub struct CreateSlideCommand {
    pub name: String,
    pub pdf_url: String,
    pub space_id: Option<SpaceId>,
}

/// Create a slide from raw PDF bytes.
#[derive(Debug, Clone)]
pub struct UploadSlideCommand {
    pub name: String,
    pub space_id: Option<SpaceId>,
    pub pdf: Vec<u8>,
}

pub struct SlideHandler {
    slides: Arc<dyn SlideRepository>,
    images: Arc<dyn SlideImageRepository>,
    storage: Arc<dyn ObjectStorage>,
}

impl SlideHandler {
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

    pub async fn create(&self, cmd: CreateSlideCommand) -> Result<Slide, ServiceError> {
        let slide = Slide::new(cmd.name, cmd.pdf_url, cmd.space_id)?;
        self.slides.save(&slide).await?;
        tracing::info!(slide_id = %slide.id, "Slide created");
        Ok(slide)
    }

    pub async fn upload(&self, cmd: UploadSlideCommand) -> Result<Slide, ServiceError> {
        if cmd.pdf.is_empty() {
            return Err(ServiceError::invalid_input("No file uploaded"));
        }

        // 1. Validate before anything reaches storage
        let mut slide = Slide::with_id(SlideId::new(), cmd.name, "", cmd.space_id)?;

        // 2. Store the source PDF under the slide's prefix
        let key = keys::source_pdf_key(&slide.id);
        slide.pdf_url = self
            .storage
            .upload(&key, cmd.pdf, "application/pdf")
            .await?;

        // 3. Persist
        self.slides.save(&slide).await?;
        tracing::info!(slide_id = %slide.id, key = %key, "Slide uploaded");
        Ok(slide)
    }

    pub async fn get(&self, id: &SlideId) -> Result<Slide, ServiceError> {
        self.slides
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Slide not found"))
    }

    pub async fn list(&self) -> Result<Vec<Slide>, ServiceError> {
        Ok(self.slides.find_all().await?)
    }

    pub async fn update(&self, id: &SlideId, patch: SlidePatch) -> Result<Slide, ServiceError> {
        let mut slide = self.get(id).await?;
        slide.apply(patch);
        self.slides.update(&slide).await?;
        Ok(slide)
    }

    /// Page images of a slide in reading order.
    pub async fn list_images(&self, id: &SlideId) -> Result<Vec<SlideImage>, ServiceError> {
        Ok(self.images.find_by_slide(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemorySlideImageRepository, InMemorySlideRepository};
    use crate::adapters::storage::InMemoryObjectStorage;

    struct Fixture {
        handler: SlideHandler,
        images: Arc<InMemorySlideImageRepository>,
        storage: Arc<InMemoryObjectStorage>,
    }

    fn fixture() -> Fixture {
        let images = Arc::new(InMemorySlideImageRepository::new());
        let storage = Arc::new(InMemoryObjectStorage::with_bucket("lectures"));
        Fixture {
            handler: SlideHandler::new(
                Arc::new(InMemorySlideRepository::new()),
                images.clone(),
                storage.clone(),
            ),
            images,
            storage,
        }
    }

    fn create_cmd(name: &str) -> CreateSlideCommand {
        CreateSlideCommand {
            name: name.to_string(),
            pdf_url: "https://lectures.s3.amazonaws.com/deck.pdf".to_string(),
            space_id: Some(SpaceId::new()),
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let f = fixture();
        let created = f.handler.create(create_cmd("Lecture 3")).await.unwrap();
        assert_eq!(f.handler.get(&created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn upload_stores_pdf_under_slide_prefix() {
        let f = fixture();

        let slide = f
            .handler
            .upload(UploadSlideCommand {
                name: "Lecture 4".to_string(),
                space_id: None,
                pdf: b"%PDF-1.7".to_vec(),
            })
            .await
            .unwrap();

        let keys = f.storage.keys().await;
        assert_eq!(keys.len(), 1);
        assert!(keys[0].starts_with(&format!("slides/{}/", slide.id)));
        assert_eq!(
            f.storage.get(&keys[0]).await.unwrap().content_type,
            "application/pdf"
        );
        assert_eq!(slide.pdf_url, format!("https://lectures.s3.amazonaws.com/{}", keys[0]));
    }

    #[tokio::test]
    async fn upload_without_name_stores_nothing() {
        let f = fixture();

        let err = f
            .handler
            .upload(UploadSlideCommand {
                name: String::new(),
                space_id: None,
                pdf: b"%PDF".to_vec(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert!(f.storage.keys().await.is_empty());
    }

    #[tokio::test]
    async fn upload_requires_file_bytes() {
        let f = fixture();
        let err = f
            .handler
            .upload(UploadSlideCommand {
                name: "Deck".to_string(),
                space_id: None,
                pdf: Vec::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::InvalidInput("No file uploaded".to_string()));
    }

    #[tokio::test]
    async fn update_merges_only_provided_fields() {
        let f = fixture();
        let slide = f.handler.create(create_cmd("Old")).await.unwrap();

        let updated = f
            .handler
            .update(
                &slide.id,
                SlidePatch {
                    name: Some("New".to_string()),
                    ..SlidePatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "New");
        assert_eq!(updated.pdf_url, slide.pdf_url);
        assert_eq!(updated.space_id, slide.space_id);
    }

    #[tokio::test]
    async fn list_images_returns_reading_order() {
        let f = fixture();
        let slide = f.handler.create(create_cmd("Deck")).await.unwrap();
        f.images.save(&SlideImage::new(slide.id, "b", 1)).await.unwrap();
        f.images.save(&SlideImage::new(slide.id, "a", 0)).await.unwrap();

        let urls: Vec<String> = f
            .handler
            .list_images(&slide.id)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.image_url)
            .collect();

        assert_eq!(urls, vec!["a".to_string(), "b".to_string()]);
    }
}
