//! In-memory spaces, slides and page images.

use async_trait::async_trait;
use std::sync::Mutex;

use super::lock;
use crate::domain::catalog::{sort_by_order, Slide, SlideImage, Space};
use crate::domain::foundation::{
    DomainError, ErrorCode, SlideId, SlideImageId, SpaceId,
};
use crate::ports::{SlideImageRepository, SlideRepository, SpaceRepository};

#[derive(Default)]
pub struct InMemorySpaceRepository {
    spaces: Mutex<Vec<Space>>,
}

impl InMemorySpaceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SpaceRepository for InMemorySpaceRepository {
    async fn save(&self, space: &Space) -> Result<(), DomainError> {
        lock(&self.spaces).push(space.clone());
        Ok(())
    }

    async fn update(&self, space: &Space) -> Result<(), DomainError> {
        let mut spaces = lock(&self.spaces);
        match spaces.iter_mut().find(|s| s.id == space.id) {
            Some(existing) => {
                *existing = space.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::SpaceNotFound,
                format!("Space not found: {}", space.id),
            )),
        }
    }

    async fn find_by_id(&self, id: &SpaceId) -> Result<Option<Space>, DomainError> {
        Ok(lock(&self.spaces).iter().find(|s| &s.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Space>, DomainError> {
        Ok(lock(&self.spaces).clone())
    }

    async fn find_by_ids(&self, ids: &[SpaceId]) -> Result<Vec<Space>, DomainError> {
        let spaces = lock(&self.spaces);
        Ok(ids
            .iter()
            .filter_map(|id| spaces.iter().find(|s| &s.id == id).cloned())
            .collect())
    }

    async fn delete(&self, id: &SpaceId) -> Result<(), DomainError> {
        let mut spaces = lock(&self.spaces);
        let before = spaces.len();
        spaces.retain(|s| &s.id != id);
        if spaces.len() == before {
            return Err(DomainError::new(
                ErrorCode::SpaceNotFound,
                format!("Space not found: {}", id),
            ));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySlideRepository {
    slides: Mutex<Vec<Slide>>,
}

impl InMemorySlideRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SlideRepository for InMemorySlideRepository {
    async fn save(&self, slide: &Slide) -> Result<(), DomainError> {
        lock(&self.slides).push(slide.clone());
        Ok(())
    }

    async fn update(&self, slide: &Slide) -> Result<(), DomainError> {
        let mut slides = lock(&self.slides);
        match slides.iter_mut().find(|s| s.id == slide.id) {
            Some(existing) => {
                *existing = slide.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::SlideNotFound,
                format!("Slide not found: {}", slide.id),
            )),
        }
    }

    async fn find_by_id(&self, id: &SlideId) -> Result<Option<Slide>, DomainError> {
        Ok(lock(&self.slides).iter().find(|s| &s.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Slide>, DomainError> {
        Ok(lock(&self.slides).clone())
    }

    async fn find_by_space(&self, space_id: &SpaceId) -> Result<Vec<Slide>, DomainError> {
        Ok(lock(&self.slides)
            .iter()
            .filter(|s| s.space_id.as_ref() == Some(space_id))
            .cloned()
            .collect())
    }

    async fn find_by_ids(&self, ids: &[SlideId]) -> Result<Vec<Slide>, DomainError> {
        let slides = lock(&self.slides);
        Ok(ids
            .iter()
            .filter_map(|id| slides.iter().find(|s| &s.id == id).cloned())
            .collect())
    }

    async fn delete(&self, id: &SlideId) -> Result<(), DomainError> {
        let mut slides = lock(&self.slides);
        let before = slides.len();
        slides.retain(|s| &s.id != id);
        if slides.len() == before {
            return Err(DomainError::new(
                ErrorCode::SlideNotFound,
                format!("Slide not found: {}", id),
            ));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySlideImageRepository {
    images: Mutex<Vec<SlideImage>>,
}

impl InMemorySlideImageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored images across all decks.
    pub fn len(&self) -> usize {
        lock(&self.images).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.images).is_empty()
    }
}

#[async_trait]
impl SlideImageRepository for InMemorySlideImageRepository {
    async fn save(&self, image: &SlideImage) -> Result<(), DomainError> {
        let mut images = lock(&self.images);
        if images
            .iter()
            .any(|i| i.slide_id == image.slide_id && i.order == image.order)
        {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!(
                    "Slide image order {} already exists for slide {}",
                    image.order, image.slide_id
                ),
            ));
        }
        images.push(image.clone());
        Ok(())
    }

    async fn update(&self, image: &SlideImage) -> Result<(), DomainError> {
        let mut images = lock(&self.images);
        match images.iter_mut().find(|i| i.id == image.id) {
            Some(existing) => {
                *existing = image.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::SlideImageNotFound,
                format!("Slide image not found: {}", image.id),
            )),
        }
    }

    async fn find_by_id(&self, id: &SlideImageId) -> Result<Option<SlideImage>, DomainError> {
        Ok(lock(&self.images).iter().find(|i| &i.id == id).cloned())
    }

    async fn find_by_slide(&self, slide_id: &SlideId) -> Result<Vec<SlideImage>, DomainError> {
        let mut images: Vec<SlideImage> = lock(&self.images)
            .iter()
            .filter(|i| &i.slide_id == slide_id)
            .cloned()
            .collect();
        sort_by_order(&mut images);
        Ok(images)
    }

    async fn delete_by_slide(&self, slide_id: &SlideId) -> Result<u64, DomainError> {
        let mut images = lock(&self.images);
        let before = images.len();
        images.retain(|i| &i.slide_id != slide_id);
        Ok((before - images.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn slide_images_come_back_in_order() {
        let repo = InMemorySlideImageRepository::new();
        let slide = SlideId::new();
        for order in [2, 0, 1] {
            repo.save(&SlideImage::new(slide, format!("p{}", order), order))
                .await
                .unwrap();
        }
        let orders: Vec<i32> = repo
            .find_by_slide(&slide)
            .await
            .unwrap()
            .iter()
            .map(|i| i.order)
            .collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn delete_by_slide_only_touches_that_deck() {
        let repo = InMemorySlideImageRepository::new();
        let doomed = SlideId::new();
        let kept = SlideId::new();
        repo.save(&SlideImage::new(doomed, "a", 0)).await.unwrap();
        repo.save(&SlideImage::new(doomed, "b", 1)).await.unwrap();
        repo.save(&SlideImage::new(kept, "c", 0)).await.unwrap();

        assert_eq!(repo.delete_by_slide(&doomed).await.unwrap(), 2);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn deleting_missing_slide_is_not_found() {
        let repo = InMemorySlideRepository::new();
        let err = repo.delete(&SlideId::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SlideNotFound);
    }

    #[tokio::test]
    async fn find_by_ids_preserves_requested_order() {
        let repo = InMemorySpaceRepository::new();
        let a = Space::new("A").unwrap();
        let b = Space::new("B").unwrap();
        repo.save(&a).await.unwrap();
        repo.save(&b).await.unwrap();

        let found = repo.find_by_ids(&[b.id, SpaceId::new(), a.id]).await.unwrap();
        let names: Vec<_> = found.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[tokio::test]
    async fn duplicate_order_within_a_deck_is_refused() {
        let repo = InMemorySlideImageRepository::new();
        let slide = SlideId::new();
        repo.save(&SlideImage::new(slide, "p0", 0)).await.unwrap();

        let err = repo
            .save(&SlideImage::new(slide, "p0-again", 0))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(repo.len(), 1);
        repo.save(&SlideImage::new(SlideId::new(), "other-deck", 0))
            .await
            .unwrap();
    }
}
