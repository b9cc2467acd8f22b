//! SlideImage - one rasterized page of a slide deck.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SlideId, SlideImageId, Timestamp};

/// A single page of a deck, positioned by its zero-based `order`.
///
/// `generated_text` and `audio_url` stay empty until the corresponding
/// generation step succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideImage {
    pub id: SlideImageId,
    pub slide_id: SlideId,
    pub image_url: String,
    pub order: i32,
    pub generated_text: String,
    pub audio_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SlideImage {
    /// Creates the image document for page `order` of a deck.
    pub fn new(slide_id: SlideId, image_url: impl Into<String>, order: i32) -> Self {
        let now = Timestamp::now();
        Self {
            id: SlideImageId::new(),
            slide_id,
            image_url: image_url.into(),
            order,
            generated_text: String::new(),
            audio_url: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_text(&self) -> bool {
        !self.generated_text.is_empty()
    }

    pub fn has_audio(&self) -> bool {
        !self.audio_url.is_empty()
    }

    /// One-based page number used in prompts and progress messages.
    pub fn display_number(&self) -> i32 {
        self.order + 1
    }

    pub fn set_generated_text(&mut self, text: impl Into<String>) {
        self.generated_text = text.into();
        self.updated_at = Timestamp::now();
    }

    pub fn set_audio_url(&mut self, url: impl Into<String>) {
        self.audio_url = url.into();
        self.updated_at = Timestamp::now();
    }
}

/// Sorts images into reading order.
pub fn sort_by_order(images: &mut [SlideImage]) {
    images.sort_by_key(|image| image.order);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_image_has_no_derived_artifacts() {
        let image = SlideImage::new(SlideId::new(), "https://b.s3.amazonaws.com/k", 0);
        assert!(!image.has_text());
        assert!(!image.has_audio());
        assert_eq!(image.display_number(), 1);
    }

    #[test]
    fn setters_record_artifacts() {
        let mut image = SlideImage::new(SlideId::new(), "url", 3);
        image.set_generated_text("**Photosynthesis** converts light");
        image.set_audio_url("https://b.s3.amazonaws.com/a.mp3");
        assert!(image.has_text());
        assert!(image.has_audio());
    }

    #[test]
    fn sort_by_order_restores_reading_order() {
        let slide = SlideId::new();
        let mut images = vec![
            SlideImage::new(slide, "c", 2),
            SlideImage::new(slide, "a", 0),
            SlideImage::new(slide, "b", 1),
        ];
        sort_by_order(&mut images);
        let urls: Vec<_> = images.iter().map(|i| i.image_url.as_str()).collect();
        assert_eq!(urls, vec!["a", "b", "c"]);
    }
}
