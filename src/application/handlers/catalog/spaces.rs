//! SpaceHandler - CRUD over spaces and the slides they group.

use std::sync::Arc;

use crate::application::ServiceError;
use crate::domain::catalog::{Slide, Space, SpacePatch};
use crate::domain::foundation::SpaceId;
use crate::ports::{SlideRepository, SpaceRepository};

pub struct SpaceHandler {
    spaces: Arc<dyn SpaceRepository>,
    slides: Arc<dyn SlideRepository>,
}

impl SpaceHandler {
    pub fn new(spaces: Arc<dyn SpaceRepository>, slides: Arc<dyn SlideRepository>) -> Self {
        Self { spaces, slides }
    }

    pub async fn create(&self, name: String) -> Result<Space, ServiceError> {
        let space = Space::new(name)?;
        self.spaces.save(&space).await?;
        tracing::info!(space_id = %space.id, "Space created");
        Ok(space)
    }

    pub async fn get(&self, id: &SpaceId) -> Result<Space, ServiceError> {
        self.spaces
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Space not found"))
    }

    pub async fn list(&self) -> Result<Vec<Space>, ServiceError> {
        Ok(self.spaces.find_all().await?)
    }

    pub async fn update(&self, id: &SpaceId, patch: SpacePatch) -> Result<Space, ServiceError> {
        let mut space = self.get(id).await?;
        space.apply(patch);
        self.spaces.update(&space).await?;
        Ok(space)
    }

    pub async fn delete(&self, id: &SpaceId) -> Result<(), ServiceError> {
        self.spaces.delete(id).await?;
        tracing::info!(space_id = %id, "Space deleted");
        Ok(())
    }

    /// Slides grouped under the space. An unknown space simply has none.
    pub async fn list_slides(&self, id: &SpaceId) -> Result<Vec<Slide>, ServiceError> {
        Ok(self.slides.find_by_space(id).await?)
    }
}
