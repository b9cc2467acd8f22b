//! AccessCode repository port.

use async_trait::async_trait;

use crate::domain::account::AccessCode;
use crate::domain::foundation::{AccessCodeId, DomainError};

#[async_trait]
pub trait AccessCodeRepository: Send + Sync {
    async fn save(&self, code: &AccessCode) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `AccessCodeNotFound` if the code doesn't exist
    async fn update(&self, code: &AccessCode) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &AccessCodeId) -> Result<Option<AccessCode>, DomainError>;

    /// Find by the code value a user types in.
    async fn find_by_code(&self, code: &str) -> Result<Option<AccessCode>, DomainError>;

    async fn find_all(&self) -> Result<Vec<AccessCode>, DomainError>;

    /// # Errors
    ///
    /// - `AccessCodeNotFound` if the code doesn't exist
    async fn delete(&self, id: &AccessCodeId) -> Result<(), DomainError>;
}
