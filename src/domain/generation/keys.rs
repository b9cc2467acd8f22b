//! Object storage key layout for deck artifacts.

use uuid::Uuid;

use crate::domain::foundation::SlideId;

/// `slides/{slide_id}/{uuid}.png`
pub fn page_image_key(slide_id: &SlideId) -> String {
    format!("slides/{}/{}.png", slide_id, Uuid::new_v4())
}

/// `slides/{slide_id}/audio/{uuid}.mp3`
pub fn narration_audio_key(slide_id: &SlideId, extension: &str) -> String {
    format!("slides/{}/audio/{}.{}", slide_id, Uuid::new_v4(), extension)
}

/// `slides/{slide_id}/{uuid}.pdf`
pub fn source_pdf_key(slide_id: &SlideId) -> String {
    format!("slides/{}/{}.pdf", slide_id, Uuid::new_v4())
}
