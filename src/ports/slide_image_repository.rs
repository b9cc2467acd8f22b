//! SlideImage repository port.

use async_trait::async_trait;

use crate::domain::catalog::SlideImage;
use crate::domain::foundation::{DomainError, SlideId, SlideImageId};

/// Repository port for page image persistence.
#[async_trait]
pub trait SlideImageRepository: Send + Sync {
    /// Save a new page image.
    async fn save(&self, image: &SlideImage) -> Result<(), DomainError>;

    /// Update an existing page image.
    ///
    /// # Errors
    ///
    /// - `SlideImageNotFound` if the image doesn't exist
    async fn update(&self, image: &SlideImage) -> Result<(), DomainError>;

    /// Find a page image by its ID.
    async fn find_by_id(&self, id: &SlideImageId) -> Result<Option<SlideImage>, DomainError>;

    /// Every page image of a deck in ascending `order`.
    async fn find_by_slide(&self, slide_id: &SlideId) -> Result<Vec<SlideImage>, DomainError>;

    /// Delete every page image of a deck. Returns the number removed.
    async fn delete_by_slide(&self, slide_id: &SlideId) -> Result<u64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slide_image_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn SlideImageRepository) {}
    }
}
