//! Narration audio: text-to-speech for a page, stored next to the deck.

use std::sync::Arc;

use crate::application::{ProgressReporter, ServiceError};
use crate::domain::catalog::SlideImage;
use crate::domain::foundation::{SlideId, SlideImageId};
use crate::domain::generation::keys;
use crate::ports::{ObjectStorage, SlideImageRepository, SpeechSynthesizer};

/// Synthesizes, uploads and records audio for one page.
async fn voice_page(
    speech: &dyn SpeechSynthesizer,
    storage: &dyn ObjectStorage,
    images: &dyn SlideImageRepository,
    image: &mut SlideImage,
    progress: &ProgressReporter,
) -> Result<String, ServiceError> {
    if !image.has_text() {
        return Err(ServiceError::not_found("Generated text not found"));
    }

    progress.status("Generating audio file");
    let audio = speech.synthesize(&image.generated_text).await?;
    progress.status("Audio file generated");

    let key = keys::narration_audio_key(&image.slide_id, &audio.extension);
    let url = storage
        .upload(&key, audio.bytes, &audio.content_type)
        .await?;
    progress.status("Audio uploaded to storage");

    image.set_audio_url(url.clone());
    images.update(image).await?;
    progress.status("Slide image updated with audio URL");

    tracing::debug!(
        slide_image_id = %image.id,
        provider = speech.provider_name(),
        "Narration audio stored"
    );
    Ok(url)
}

// ════════════════════════════════════════════════════════════════════════════
// Single page
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct GenerateAudioCommand {
    pub slide_image_id: SlideImageId,
    /// Regenerate even when the page already has audio.
    pub update: bool,
}

pub struct GenerateAudioHandler {
    images: Arc<dyn SlideImageRepository>,
    speech: Arc<dyn SpeechSynthesizer>,
    storage: Arc<dyn ObjectStorage>,
}

impl GenerateAudioHandler {
    pub fn new(
        images: Arc<dyn SlideImageRepository>,
        speech: Arc<dyn SpeechSynthesizer>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            images,
            speech,
            storage,
        }
    }

    /// Returns the page's audio URL, generating it if needed.
    pub async fn handle(
        &self,
        cmd: GenerateAudioCommand,
        progress: &ProgressReporter,
    ) -> Result<String, ServiceError> {
        let mut image = self
            .images
            .find_by_id(&cmd.slide_image_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Slide image not found"))?;

        if image.has_audio() && !cmd.update {
            return Ok(image.audio_url);
        }

        voice_page(
            self.speech.as_ref(),
            self.storage.as_ref(),
            self.images.as_ref(),
            &mut image,
            progress,
        )
        .await
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Whole deck
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct GenerateAllAudioCommand {
    pub slide_id: SlideId,
}

pub struct GenerateAllAudioHandler {
    images: Arc<dyn SlideImageRepository>,
    speech: Arc<dyn SpeechSynthesizer>,
    storage: Arc<dyn ObjectStorage>,
}

impl GenerateAllAudioHandler {
    pub fn new(
        images: Arc<dyn SlideImageRepository>,
        speech: Arc<dyn SpeechSynthesizer>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            images,
            speech,
            storage,
        }
    }

    /// Voices every page without audio and returns how many were generated.
    pub async fn handle(&self, cmd: GenerateAllAudioCommand) -> Result<usize, ServiceError> {
        let deck = self.images.find_by_slide(&cmd.slide_id).await?;
        let silent = ProgressReporter::silent();

        let mut generated = 0;
        for mut image in deck.into_iter().filter(|image| !image.has_audio()) {
            let image_id = image.id;
            voice_page(
                self.speech.as_ref(),
                self.storage.as_ref(),
                self.images.as_ref(),
                &mut image,
                &silent,
            )
            .await
            .map_err(|err| {
                tracing::error!(slide_image_id = %image_id, error = %err, "Audio generation failed");
                ServiceError::upstream("Error generating audio for slide image")
            })?;
            generated += 1;
        }

        tracing::info!(slide_id = %cmd.slide_id, generated, "Deck audio generated");
        Ok(generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySlideImageRepository;
    use crate::adapters::speech::MockSpeechSynthesizer;
    use crate::adapters::storage::InMemoryObjectStorage;

    struct Fixture {
        images: Arc<InMemorySlideImageRepository>,
        storage: Arc<InMemoryObjectStorage>,
        speech: MockSpeechSynthesizer,
    }

    impl Fixture {
        fn new(speech: MockSpeechSynthesizer) -> Self {
            Self {
                images: Arc::new(InMemorySlideImageRepository::new()),
                storage: Arc::new(InMemoryObjectStorage::with_bucket("lectures")),
                speech,
            }
        }

        fn single(&self) -> GenerateAudioHandler {
            GenerateAudioHandler::new(
                self.images.clone(),
                Arc::new(self.speech.clone()),
                self.storage.clone(),
            )
        }

        fn batch(&self) -> GenerateAllAudioHandler {
            GenerateAllAudioHandler::new(
                self.images.clone(),
                Arc::new(self.speech.clone()),
                self.storage.clone(),
            )
        }

        async fn page(&self, slide_id: SlideId, order: i32, text: &str, audio: &str) -> SlideImage {
            let mut image = SlideImage::new(slide_id, "https://b/p.png", order);
            image.set_generated_text(text);
            image.set_audio_url(audio);
            self.images.save(&image).await.unwrap();
            image
        }
    }

    #[tokio::test]
    async fn voices_page_and_reports_each_step() {
        let f = Fixture::new(MockSpeechSynthesizer::new());
        let image = f.page(SlideId::new(), 0, "Photosynthesis.", "").await;
        let (reporter, mut rx) = ProgressReporter::channel();

        let url = f
            .single()
            .handle(
                GenerateAudioCommand {
                    slide_image_id: image.id,
                    update: false,
                },
                &reporter,
            )
            .await
            .unwrap();
        drop(reporter);

        let prefix = format!(
            "https://lectures.s3.amazonaws.com/slides/{}/audio/",
            image.slide_id
        );
        assert!(url.starts_with(&prefix));
        assert!(url.ends_with(".mp3"));
        assert_eq!(f.speech.texts(), vec!["Photosynthesis.".to_string()]);

        let stored = f.images.find_by_id(&image.id).await.unwrap().unwrap();
        assert_eq!(stored.audio_url, url);

        let mut steps = Vec::new();
        while let Some(event) = rx.recv().await {
            steps.push(event.to_payload());
        }
        assert_eq!(
            steps,
            vec![
                "Generating audio file",
                "Audio file generated",
                "Audio uploaded to storage",
                "Slide image updated with audio URL",
            ]
        );
    }

    #[tokio::test]
    async fn existing_audio_short_circuits_without_calls() {
        let f = Fixture::new(MockSpeechSynthesizer::new());
        let image = f
            .page(SlideId::new(), 0, "text", "https://lectures.s3.amazonaws.com/a.mp3")
            .await;

        let url = f
            .single()
            .handle(
                GenerateAudioCommand {
                    slide_image_id: image.id,
                    update: false,
                },
                &ProgressReporter::silent(),
            )
            .await
            .unwrap();

        assert_eq!(url, "https://lectures.s3.amazonaws.com/a.mp3");
        assert_eq!(f.speech.call_count(), 0);
        assert!(f.storage.keys().await.is_empty());
    }

    #[tokio::test]
    async fn page_without_text_is_not_found() {
        let f = Fixture::new(MockSpeechSynthesizer::new());
        let image = f.page(SlideId::new(), 0, "", "").await;

        let err = f
            .single()
            .handle(
                GenerateAudioCommand {
                    slide_image_id: image.id,
                    update: false,
                },
                &ProgressReporter::silent(),
            )
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ServiceError::NotFound("Generated text not found".to_string())
        );
        assert_eq!(f.speech.call_count(), 0);
    }

    #[tokio::test]
    async fn batch_skips_pages_with_audio() {
        let f = Fixture::new(MockSpeechSynthesizer::new());
        let slide = SlideId::new();
        f.page(slide, 0, "a", "https://lectures.s3.amazonaws.com/done.mp3")
            .await;
        f.page(slide, 1, "b", "").await;
        f.page(slide, 2, "c", "").await;

        let generated = f
            .batch()
            .handle(GenerateAllAudioCommand { slide_id: slide })
            .await
            .unwrap();

        assert_eq!(generated, 2);
        assert_eq!(f.speech.texts(), vec!["b".to_string(), "c".to_string()]);
        let deck = f.images.find_by_slide(&slide).await.unwrap();
        assert!(deck.iter().all(|image| image.has_audio()));
    }

    #[tokio::test]
    async fn batch_aborts_on_first_failure() {
        let f = Fixture::new(MockSpeechSynthesizer::failing(503));
        let slide = SlideId::new();
        f.page(slide, 0, "a", "").await;
        f.page(slide, 1, "b", "").await;

        let err = f
            .batch()
            .handle(GenerateAllAudioCommand { slide_id: slide })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ServiceError::Upstream("Error generating audio for slide image".to_string())
        );
        assert_eq!(f.speech.call_count(), 1);
    }
}
