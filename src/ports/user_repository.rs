//! User repository port.
//!
//! Users are addressed by the auth provider's id. Balance and space-list
//! changes are read-modify-write; the last writer wins.

use async_trait::async_trait;

use crate::domain::account::User;
use crate::domain::foundation::{DomainError, UserId};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Save a new user.
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    /// Overwrite an existing user.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    /// Find a user by auth provider id.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<User>, DomainError>;

    /// All users, oldest first.
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn UserRepository) {}
    }
}
