//! Slide - one uploaded lecture deck and its derived notes.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SlideId, SpaceId, Timestamp, ValidationError};

/// An uploaded lecture deck.
///
/// `pdf_url` points at the source PDF in object storage. `generated_notes`
/// holds the ordered per-page explanations once notes have been compiled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub id: SlideId,
    pub name: String,
    pub pdf_url: String,
    pub space_id: Option<SpaceId>,
    pub generated_notes: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Explicit partial update for a slide.
///
/// Each field is applied only when present and non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SlidePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub space_id: Option<SpaceId>,
    #[serde(default)]
    pub generated_notes: Option<Vec<String>>,
}

impl Slide {
    /// Creates a new slide with a fresh identifier and no notes.
    pub fn new(
        name: impl Into<String>,
        pdf_url: impl Into<String>,
        space_id: Option<SpaceId>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        let now = Timestamp::now();
        Ok(Self {
            id: SlideId::new(),
            name,
            pdf_url: pdf_url.into(),
            space_id,
            generated_notes: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Creates a slide with a caller-chosen identifier.
    ///
    /// Used by uploads, where the storage key embeds the id before the
    /// document exists.
    pub fn with_id(
        id: SlideId,
        name: impl Into<String>,
        pdf_url: impl Into<String>,
        space_id: Option<SpaceId>,
    ) -> Result<Self, ValidationError> {
        let mut slide = Self::new(name, pdf_url, space_id)?;
        slide.id = id;
        Ok(slide)
    }

    /// Returns true if a source PDF has been attached.
    pub fn has_pdf(&self) -> bool {
        !self.pdf_url.is_empty()
    }

    /// Merges the provided fields and bumps `updated_at`.
    pub fn apply(&mut self, patch: SlidePatch) {
        if let Some(name) = patch.name.filter(|v| !v.is_empty()) {
            self.name = name;
        }
        if let Some(pdf_url) = patch.pdf_url.filter(|v| !v.is_empty()) {
            self.pdf_url = pdf_url;
        }
        if let Some(space_id) = patch.space_id {
            self.space_id = Some(space_id);
        }
        if let Some(notes) = patch.generated_notes.filter(|v| !v.is_empty()) {
            self.generated_notes = notes;
        }
        self.updated_at = Timestamp::now();
    }

    /// Replaces the compiled notes.
    pub fn set_notes(&mut self, notes: Vec<String>) {
        self.generated_notes = notes;
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck() -> Slide {
        Slide::new(
            "Lecture 1",
            "https://bucket.s3.amazonaws.com/slides/a.pdf",
            None,
        )
        .unwrap()
    }

    #[test]
    fn new_slide_starts_without_notes() {
        let slide = deck();
        assert!(slide.generated_notes.is_empty());
        assert!(slide.has_pdf());
    }

    #[test]
    fn slide_without_pdf_reports_missing() {
        let slide = Slide::new("Draft", "", None).unwrap();
        assert!(!slide.has_pdf());
    }

    #[test]
    fn apply_merges_only_provided_fields() {
        let mut slide = deck();
        let space = SpaceId::new();
        slide.apply(SlidePatch {
            name: Some("Lecture 1 (revised)".to_string()),
            pdf_url: Some(String::new()),
            space_id: Some(space),
            generated_notes: None,
        });

        assert_eq!(slide.name, "Lecture 1 (revised)");
        assert_eq!(slide.pdf_url, "https://bucket.s3.amazonaws.com/slides/a.pdf");
        assert_eq!(slide.space_id, Some(space));
    }

    #[test]
    fn apply_ignores_empty_notes() {
        let mut slide = deck();
        slide.set_notes(vec!["first".to_string()]);
        slide.apply(SlidePatch {
            generated_notes: Some(Vec::new()),
            ..Default::default()
        });
        assert_eq!(slide.generated_notes, vec!["first".to_string()]);
    }

    #[test]
    fn with_id_keeps_requested_id() {
        let id = SlideId::new();
        let slide = Slide::with_id(id, "Upload", "", None).unwrap();
        assert_eq!(slide.id, id);
    }
}
