//! Space repository port.

use async_trait::async_trait;

use crate::domain::catalog::Space;
use crate::domain::foundation::{DomainError, SpaceId};

/// Repository port for Space persistence.
#[async_trait]
pub trait SpaceRepository: Send + Sync {
    /// Save a new space.
    async fn save(&self, space: &Space) -> Result<(), DomainError>;

    /// Update an existing space.
    ///
    /// # Errors
    ///
    /// - `SpaceNotFound` if the space doesn't exist
    async fn update(&self, space: &Space) -> Result<(), DomainError>;

    /// Find a space by its ID.
    async fn find_by_id(&self, id: &SpaceId) -> Result<Option<Space>, DomainError>;

    /// All spaces, oldest first.
    async fn find_all(&self) -> Result<Vec<Space>, DomainError>;

    /// Spaces matching `ids`. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[SpaceId]) -> Result<Vec<Space>, DomainError>;

    /// Delete a space.
    ///
    /// # Errors
    ///
    /// - `SpaceNotFound` if the space doesn't exist
    async fn delete(&self, id: &SpaceId) -> Result<(), DomainError>;
}
