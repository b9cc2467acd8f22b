//! UserHandler - accounts addressed by their external auth key.

use std::sync::Arc;

use crate::application::ServiceError;
use crate::domain::account::{User, UserPatch, UserProfile};
use crate::domain::catalog::Space;
use crate::domain::foundation::{SpaceId, UserId};
use crate::ports::{SpaceRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    pub user_id: String,
    pub profile: UserProfile,
}

/// Result of attaching a space to a user.
#[derive(Debug, Clone, PartialEq)]
pub enum AddSpaceOutcome {
    Added(User),
    AlreadyPresent,
}

pub struct UserHandler {
    users: Arc<dyn UserRepository>,
    spaces: Arc<dyn SpaceRepository>,
}

impl UserHandler {
    pub fn new(users: Arc<dyn UserRepository>, spaces: Arc<dyn SpaceRepository>) -> Self {
        Self { users, spaces }
    }

    /// Creates an account with the starting balance and no spaces.
    pub async fn create(&self, cmd: CreateUserCommand) -> Result<User, ServiceError> {
        let user_id = UserId::new(cmd.user_id)?;
        if self.users.find_by_user_id(&user_id).await?.is_some() {
            return Err(ServiceError::invalid_input("User already exists"));
        }

        let user = User::new(user_id, cmd.profile);
        self.users.save(&user).await?;
        tracing::info!(user_id = %user.user_id, "User created");
        Ok(user)
    }

    pub async fn get(&self, user_id: &UserId) -> Result<User, ServiceError> {
        self.users
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User not found"))
    }

    pub async fn list(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.users.find_all().await?)
    }

    pub async fn update(&self, user_id: &UserId, patch: UserPatch) -> Result<User, ServiceError> {
        let mut user = self.get(user_id).await?;
        user.apply(patch);
        self.users.update(&user).await?;
        Ok(user)
    }

    pub async fn delete(&self, user_id: &UserId) -> Result<(), ServiceError> {
        self.users.delete(user_id).await?;
        tracing::info!(user_id = %user_id, "User deleted");
        Ok(())
    }

    /// Resolves the user's space references, skipping dangling ones.
    pub async fn list_spaces(&self, user_id: &UserId) -> Result<Vec<Space>, ServiceError> {
        let user = self.get(user_id).await?;
        Ok(self.spaces.find_by_ids(&user.space_ids).await?)
    }

    pub async fn add_space(
        &self,
        user_id: &UserId,
        space_id: SpaceId,
    ) -> Result<AddSpaceOutcome, ServiceError> {
        let mut user = self.get(user_id).await?;
        if !user.add_space(space_id) {
            return Ok(AddSpaceOutcome::AlreadyPresent);
        }
        self.users.update(&user).await?;
        Ok(AddSpaceOutcome::Added(user))
    }

    pub async fn remove_space(
        &self,
        user_id: &UserId,
        space_id: &SpaceId,
    ) -> Result<User, ServiceError> {
        let mut user = self.get(user_id).await?;
        if user.remove_space(space_id) {
            self.users.update(&user).await?;
        }
        Ok(user)
    }
}
