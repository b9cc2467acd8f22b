//! ConvertPdfHandler - rasterizes a slide's PDF into page images.

use serde_json::json;
use std::sync::Arc;

use crate::application::{ProgressReporter, ServiceError};
use crate::domain::catalog::SlideImage;
use crate::domain::foundation::SlideId;
use crate::domain::generation::keys;
use crate::ports::{
    FileDownloader, ObjectStorage, PdfRasterizer, SlideImageRepository, SlideRepository,
};

#[derive(Debug, Clone)]
pub struct ConvertPdfCommand {
    pub slide_id: SlideId,
}

pub struct ConvertPdfHandler {
    slides: Arc<dyn SlideRepository>,
    images: Arc<dyn SlideImageRepository>,
    storage: Arc<dyn ObjectStorage>,
    downloader: Arc<dyn FileDownloader>,
    rasterizer: Arc<dyn PdfRasterizer>,
}

impl ConvertPdfHandler {
    pub fn new(
        slides: Arc<dyn SlideRepository>,
        images: Arc<dyn SlideImageRepository>,
        storage: Arc<dyn ObjectStorage>,
        downloader: Arc<dyn FileDownloader>,
        rasterizer: Arc<dyn PdfRasterizer>,
    ) -> Self {
        Self {
            slides,
            images,
            storage,
            downloader,
            rasterizer,
        }
    }

    /// Returns the created page images in order.
    ///
    /// A slide that already has pages is rejected before anything is
    /// downloaded, so page orders stay unique within the slide.
    pub async fn handle(
        &self,
        cmd: ConvertPdfCommand,
        progress: &ProgressReporter,
    ) -> Result<Vec<SlideImage>, ServiceError> {
        // 1. Resolve the PDF
        let slide = self
            .slides
            .find_by_id(&cmd.slide_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Slide not found"))?;
        if !slide.has_pdf() {
            return Err(ServiceError::not_found("PDF URL not found"));
        }
        if !self.images.find_by_slide(&slide.id).await?.is_empty() {
            return Err(ServiceError::invalid_input("Slide already converted"));
        }

        // 2. Download into scratch space
        progress.status("Downloading PDF");
        let scratch = tempfile::tempdir().map_err(|e| {
            ServiceError::upstream(format!("Failed to create scratch directory: {}", e))
        })?;
        let pdf_path = scratch.path().join("document.pdf");
        let size = self.downloader.download(&slide.pdf_url, &pdf_path).await?;
        tracing::debug!(slide_id = %slide.id, bytes = size, "PDF downloaded");

        // 3. Rasterize
        progress.status("Converting PDF to images");
        let pages = self.rasterizer.rasterize(&pdf_path).await?;
        let total = pages.len();
        progress.data(json!({ "totalImages": total }));

        // 4. Upload and record each page
        let mut created = Vec::with_capacity(total);
        for page in pages {
            let key = keys::page_image_key(&slide.id);
            let url = self
                .storage
                .upload(&key, page.bytes, page.content_type)
                .await?;

            let image = SlideImage::new(slide.id, url, page.index as i32);
            self.images.save(&image).await?;

            progress.status(format!("Uploaded image {} of {}", page.index + 1, total));
            created.push(image);
        }

        tracing::info!(slide_id = %slide.id, pages = total, "PDF converted to images");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::download::StaticDownloader;
    use crate::adapters::memory::{InMemorySlideImageRepository, InMemorySlideRepository};
    use crate::adapters::pdf::StaticRasterizer;
    use crate::adapters::storage::InMemoryObjectStorage;
    use crate::application::ProgressEvent;
    use crate::domain::catalog::Slide;

    struct Fixture {
        slides: Arc<InMemorySlideRepository>,
        images: Arc<InMemorySlideImageRepository>,
        storage: Arc<InMemoryObjectStorage>,
        downloader: StaticDownloader,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                slides: Arc::new(InMemorySlideRepository::new()),
                images: Arc::new(InMemorySlideImageRepository::new()),
                storage: Arc::new(InMemoryObjectStorage::with_bucket("lectures")),
                downloader: StaticDownloader::new(b"%PDF-1.7".to_vec()),
            }
        }

        fn handler(&self, pages: usize) -> ConvertPdfHandler {
            ConvertPdfHandler::new(
                self.slides.clone(),
                self.images.clone(),
                self.storage.clone(),
                Arc::new(self.downloader.clone()),
                Arc::new(StaticRasterizer::new(pages)),
            )
        }

        async fn slide(&self, pdf_url: &str) -> Slide {
            let slide = Slide::new("Deck", pdf_url, None).unwrap();
            self.slides.save(&slide).await.unwrap();
            slide
        }
    }

    #[tokio::test]
    async fn creates_one_image_per_page_in_order() {
        let f = Fixture::new();
        let slide = f.slide("https://lectures.s3.amazonaws.com/deck.pdf").await;

        let created = f
            .handler(3)
            .handle(
                ConvertPdfCommand { slide_id: slide.id },
                &ProgressReporter::silent(),
            )
            .await
            .unwrap();

        let orders: Vec<i32> = created.iter().map(|i| i.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert_eq!(f.images.find_by_slide(&slide.id).await.unwrap().len(), 3);
        assert_eq!(f.storage.keys().await.len(), 3);
        assert_eq!(
            f.downloader.requested_urls(),
            vec!["https://lectures.s3.amazonaws.com/deck.pdf".to_string()]
        );
        for image in &created {
            assert!(image
                .image_url
                .starts_with(&format!("https://lectures.s3.amazonaws.com/slides/{}/", slide.id)));
        }
    }

    #[tokio::test]
    async fn reports_progress_through_every_step() {
        let f = Fixture::new();
        let slide = f.slide("https://lectures.s3.amazonaws.com/deck.pdf").await;
        let (reporter, mut rx) = ProgressReporter::channel();

        f.handler(2)
            .handle(ConvertPdfCommand { slide_id: slide.id }, &reporter)
            .await
            .unwrap();
        drop(reporter);

        let mut payloads = Vec::new();
        while let Some(event) = rx.recv().await {
            payloads.push(event.to_payload());
        }
        assert_eq!(
            payloads,
            vec![
                "Downloading PDF",
                "Converting PDF to images",
                r#"{"totalImages":2}"#,
                "Uploaded image 1 of 2",
                "Uploaded image 2 of 2",
            ]
        );
    }

    #[tokio::test]
    async fn slide_without_pdf_is_not_found() {
        let f = Fixture::new();
        let slide = f.slide("").await;

        let err = f
            .handler(1)
            .handle(
                ConvertPdfCommand { slide_id: slide.id },
                &ProgressReporter::silent(),
            )
            .await
            .unwrap_err();

        assert_eq!(err, ServiceError::NotFound("PDF URL not found".to_string()));
        assert!(f.downloader.requested_urls().is_empty());
    }

    #[tokio::test]
    async fn rasterizer_failure_stops_before_any_upload() {
        let f = Fixture::new();
        let slide = f.slide("https://lectures.s3.amazonaws.com/deck.pdf").await;
        let (reporter, mut rx) = ProgressReporter::channel();

        let err = f
            .handler(0)
            .handle(ConvertPdfCommand { slide_id: slide.id }, &reporter)
            .await
            .unwrap_err();
        drop(reporter);

        assert!(matches!(err, ServiceError::Upstream(_)));
        assert!(f.storage.keys().await.is_empty());
        let mut last = None;
        while let Some(event) = rx.recv().await {
            last = Some(event);
        }
        assert_eq!(
            last,
            Some(ProgressEvent::Status("Converting PDF to images".to_string()))
        );
    }

    #[tokio::test]
    async fn converting_twice_is_rejected_and_keeps_orders_unique() {
        let f = Fixture::new();
        let slide = f.slide("https://lectures.s3.amazonaws.com/deck.pdf").await;
        let cmd = ConvertPdfCommand { slide_id: slide.id };

        f.handler(3)
            .handle(cmd.clone(), &ProgressReporter::silent())
            .await
            .unwrap();
        let err = f
            .handler(3)
            .handle(cmd, &ProgressReporter::silent())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ServiceError::InvalidInput("Slide already converted".to_string())
        );
        let orders: Vec<i32> = f
            .images
            .find_by_slide(&slide.id)
            .await
            .unwrap()
            .iter()
            .map(|i| i.order)
            .collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert_eq!(f.storage.keys().await.len(), 3);
        assert_eq!(f.downloader.requested_urls().len(), 1);
    }
}
