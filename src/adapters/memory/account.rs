//! In-memory users and access codes.

use async_trait::async_trait;
use std::sync::Mutex;

use super::lock;
use crate::domain::account::{AccessCode, User};
use crate::domain::foundation::{AccessCodeId, DomainError, ErrorCode, UserId};
use crate::ports::{AccessCodeRepository, UserRepository};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        lock(&self.users).push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut users = lock(&self.users);
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", user.user_id),
            )),
        }
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(lock(&self.users)
            .iter()
            .find(|u| &u.user_id == user_id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(lock(&self.users).clone())
    }

    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError> {
        let mut users = lock(&self.users);
        let before = users.len();
        users.retain(|u| &u.user_id != user_id);
        if users.len() == before {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", user_id),
            ));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryAccessCodeRepository {
    codes: Mutex<Vec<AccessCode>>,
}

impl InMemoryAccessCodeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccessCodeRepository for InMemoryAccessCodeRepository {
    async fn save(&self, code: &AccessCode) -> Result<(), DomainError> {
        lock(&self.codes).push(code.clone());
        Ok(())
    }

    async fn update(&self, code: &AccessCode) -> Result<(), DomainError> {
        let mut codes = lock(&self.codes);
        match codes.iter_mut().find(|c| c.id == code.id) {
            Some(existing) => {
                *existing = code.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::AccessCodeNotFound,
                format!("Access code not found: {}", code.id),
            )),
        }
    }

    async fn find_by_id(&self, id: &AccessCodeId) -> Result<Option<AccessCode>, DomainError> {
        Ok(lock(&self.codes).iter().find(|c| &c.id == id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<AccessCode>, DomainError> {
        Ok(lock(&self.codes).iter().find(|c| c.code == code).cloned())
    }

    async fn find_all(&self) -> Result<Vec<AccessCode>, DomainError> {
        Ok(lock(&self.codes).clone())
    }

    async fn delete(&self, id: &AccessCodeId) -> Result<(), DomainError> {
        let mut codes = lock(&self.codes);
        let before = codes.len();
        codes.retain(|c| &c.id != id);
        if codes.len() == before {
            return Err(DomainError::new(
                ErrorCode::AccessCodeNotFound,
                format!("Access code not found: {}", id),
            ));
        }
        Ok(())
    }
}
