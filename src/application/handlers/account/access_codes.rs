//! AccessCodeHandler - CRUD over invitation codes.

use std::sync::Arc;

use crate::application::ServiceError;
use crate::domain::account::{AccessCode, AccessCodePatch};
use crate::domain::foundation::AccessCodeId;
use crate::ports::AccessCodeRepository;

pub struct AccessCodeHandler {
    codes: Arc<dyn AccessCodeRepository>,
}

impl AccessCodeHandler {
    pub fn new(codes: Arc<dyn AccessCodeRepository>) -> Self {
        Self { codes }
    }

    /// Stores a fresh, unused code.
    pub async fn create(&self, code: String) -> Result<AccessCode, ServiceError> {
        let code = AccessCode::new(code)?;
        self.codes.save(&code).await?;
        Ok(code)
    }

    pub async fn get(&self, id: &AccessCodeId) -> Result<AccessCode, ServiceError> {
        self.codes
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Access code not found"))
    }

    pub async fn list(&self) -> Result<Vec<AccessCode>, ServiceError> {
        Ok(self.codes.find_all().await?)
    }

    pub async fn update(
        &self,
        id: &AccessCodeId,
        patch: AccessCodePatch,
    ) -> Result<AccessCode, ServiceError> {
        let mut code = self.get(id).await?;
        code.apply(patch);
        self.codes.update(&code).await?;
        Ok(code)
    }

    pub async fn delete(&self, id: &AccessCodeId) -> Result<(), ServiceError> {
        Ok(self.codes.delete(id).await?)
    }
}
