//! VerifyAccessCodeHandler - redeems an invitation code.
//!
//! A code that is already used still verifies; the record is marked used
//! again and returned as it was before the update.

use std::sync::Arc;

use crate::application::ServiceError;
use crate::domain::account::AccessCode;
use crate::domain::foundation::UserId;
use crate::ports::{AccessCodeRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct VerifyAccessCodeCommand {
    pub code: String,
    /// When set, the code is recorded on this user.
    pub user_id: Option<UserId>,
}

pub struct VerifyAccessCodeHandler {
    codes: Arc<dyn AccessCodeRepository>,
    users: Arc<dyn UserRepository>,
}

impl VerifyAccessCodeHandler {
    pub fn new(codes: Arc<dyn AccessCodeRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { codes, users }
    }

    pub async fn handle(&self, cmd: VerifyAccessCodeCommand) -> Result<AccessCode, ServiceError> {
        if cmd.code.trim().is_empty() {
            return Err(ServiceError::invalid_input("Access code is required"));
        }

        // 1. Look up by value
        let found = self
            .codes
            .find_by_code(&cmd.code)
            .await?
            .ok_or_else(|| ServiceError::not_found("Access code not found"))?;

        // 2. Mark used
        let mut redeemed = found.clone();
        redeemed.redeem();
        self.codes.update(&redeemed).await?;

        // 3. Record on the user
        if let Some(user_id) = &cmd.user_id {
            let mut user = self
                .users
                .find_by_user_id(user_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("User not found"))?;
            user.record_access_code(&found.code);
            self.users.update(&user).await?;
        }

        tracing::info!(access_code_id = %found.id, was_used = found.used, "Access code verified");
        Ok(found)
    }
}
