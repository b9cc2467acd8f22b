//! CreditsHandler - balance reads and adjustments.
//!
//! Each adjustment is a read followed by an overwrite. Two concurrent
//! adjustments of the same user can lose one of the updates.

use std::sync::Arc;

use crate::application::ServiceError;
use crate::domain::account::{CreditAmount, User};
use crate::domain::foundation::UserId;
use crate::ports::UserRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditChange {
    Add,
    Remove,
}

pub struct CreditsHandler {
    users: Arc<dyn UserRepository>,
}

impl CreditsHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn balance(&self, user_id: &UserId) -> Result<i64, ServiceError> {
        Ok(self.load(user_id).await?.credits)
    }

    /// Applies `change` and returns the new balance.
    ///
    /// `amount` is the raw path segment; anything but a non-negative integer
    /// is rejected before the user is read.
    pub async fn adjust(
        &self,
        user_id: &UserId,
        change: CreditChange,
        amount: &str,
    ) -> Result<i64, ServiceError> {
        let amount: CreditAmount = amount
            .parse()
            .map_err(|_| ServiceError::invalid_input("Invalid amount"))?;

        // 1. Read current balance
        let mut user = self.load(user_id).await?;

        // 2. Compute the new balance
        let balance = match change {
            CreditChange::Add => user.add_credits(amount),
            CreditChange::Remove => user.remove_credits(amount)?,
        };

        // 3. Overwrite
        self.users.update(&user).await?;
        tracing::info!(
            user_id = %user_id,
            change = ?change,
            amount = amount.value(),
            balance,
            "Credits adjusted"
        );
        Ok(balance)
    }

    async fn load(&self, user_id: &UserId) -> Result<User, ServiceError> {
        self.users
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::domain::account::UserProfile;

    async fn fixture() -> (CreditsHandler, UserId) {
        let users = Arc::new(InMemoryUserRepository::new());
        let user_id = UserId::new("auth0|7").unwrap();
        users
            .save(&User::new(user_id.clone(), UserProfile::default()))
            .await
            .unwrap();
        (CreditsHandler::new(users), user_id)
    }

    #[tokio::test]
    async fn add_then_remove_updates_balance() {
        let (handler, user) = fixture().await;

        assert_eq!(handler.adjust(&user, CreditChange::Add, "25").await.unwrap(), 125);
        assert_eq!(handler.adjust(&user, CreditChange::Remove, "5").await.unwrap(), 120);
        assert_eq!(handler.balance(&user).await.unwrap(), 120);
    }

    #[tokio::test]
    async fn overdraw_is_rejected_and_balance_kept() {
        let (handler, user) = fixture().await;

        let err = handler
            .adjust(&user, CreditChange::Remove, "101")
            .await
            .unwrap_err();

        assert_eq!(err, ServiceError::InsufficientCredits { balance: 100 });
        assert_eq!(handler.balance(&user).await.unwrap(), 100);
    }

    #[tokio::test]
    async fn removing_entire_balance_is_allowed() {
        let (handler, user) = fixture().await;
        assert_eq!(handler.adjust(&user, CreditChange::Remove, "100").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn malformed_amounts_are_invalid() {
        let (handler, user) = fixture().await;
        for amount in ["abc", "-3", "1.5", ""] {
            let err = handler.adjust(&user, CreditChange::Add, amount).await.unwrap_err();
            assert_eq!(err, ServiceError::InvalidInput("Invalid amount".to_string()));
        }
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let (handler, _) = fixture().await;
        let err = handler
            .balance(&UserId::new("nobody").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
