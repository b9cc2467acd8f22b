//! Slide repository port.

use async_trait::async_trait;

use crate::domain::catalog::Slide;
use crate::domain::foundation::{DomainError, SlideId, SpaceId};

/// Repository port for Slide persistence.
///
/// Deleting a slide here removes only the slide document. Page images and
/// stored blobs are cleaned up by the delete workflow.
#[async_trait]
pub trait SlideRepository: Send + Sync {
    /// Save a new slide.
    async fn save(&self, slide: &Slide) -> Result<(), DomainError>;

    /// Update an existing slide.
    ///
    /// # Errors
    ///
    /// - `SlideNotFound` if the slide doesn't exist
    async fn update(&self, slide: &Slide) -> Result<(), DomainError>;

    /// Find a slide by its ID.
    async fn find_by_id(&self, id: &SlideId) -> Result<Option<Slide>, DomainError>;

    /// All slides, oldest first.
    async fn find_all(&self) -> Result<Vec<Slide>, DomainError>;

    /// Slides filed under a space.
    async fn find_by_space(&self, space_id: &SpaceId) -> Result<Vec<Slide>, DomainError>;

    /// Slides matching `ids`, in the order of `ids`. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[SlideId]) -> Result<Vec<Slide>, DomainError>;

    /// Delete a slide document.
    ///
    /// # Errors
    ///
    /// - `SlideNotFound` if nothing was deleted
    async fn delete(&self, id: &SlideId) -> Result<(), DomainError>;
}
