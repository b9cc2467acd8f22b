//! User - a learner account with a credit balance and subscribed spaces.

use serde::{Deserialize, Serialize};

use super::credits::{self, CreditAmount, InsufficientCredits, STARTING_CREDITS};
use crate::domain::foundation::{SpaceId, Timestamp, UserId, UserRecordId};

/// A learner account keyed by the auth provider's user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserRecordId,
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub school: String,
    pub space_ids: Vec<SpaceId>,
    pub credits: i64,
    pub access_code: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Profile fields supplied at signup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub access_code: String,
}

/// Partial update for a user's profile. Absent or empty values are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserPatch {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub access_code: Option<String>,
}

impl User {
    /// Creates a new account with the starting balance and no spaces.
    pub fn new(user_id: UserId, profile: UserProfile) -> Self {
        let now = Timestamp::now();
        Self {
            id: UserRecordId::new(),
            user_id,
            first_name: profile.first_name,
            last_name: profile.last_name,
            email: profile.email,
            school: profile.school,
            space_ids: Vec::new(),
            credits: STARTING_CREDITS,
            access_code: profile.access_code,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: UserPatch) {
        fn merge(target: &mut String, value: Option<String>) {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                *target = value;
            }
        }
        merge(&mut self.first_name, patch.first_name);
        merge(&mut self.last_name, patch.last_name);
        merge(&mut self.email, patch.email);
        merge(&mut self.school, patch.school);
        merge(&mut self.access_code, patch.access_code);
        self.updated_at = Timestamp::now();
    }

    /// Adds a space reference. Returns false if it was already present.
    pub fn add_space(&mut self, space_id: SpaceId) -> bool {
        if self.space_ids.contains(&space_id) {
            return false;
        }
        self.space_ids.push(space_id);
        self.updated_at = Timestamp::now();
        true
    }

    /// Removes a space reference. Returns false if it was not present.
    pub fn remove_space(&mut self, space_id: &SpaceId) -> bool {
        let before = self.space_ids.len();
        self.space_ids.retain(|id| id != space_id);
        let removed = self.space_ids.len() != before;
        if removed {
            self.updated_at = Timestamp::now();
        }
        removed
    }

    pub fn add_credits(&mut self, amount: CreditAmount) -> i64 {
        self.credits = credits::credited(self.credits, amount);
        self.updated_at = Timestamp::now();
        self.credits
    }

    /// Debits the balance, leaving it unchanged when funds are short.
    pub fn remove_credits(&mut self, amount: CreditAmount) -> Result<i64, InsufficientCredits> {
        self.credits = credits::debited(self.credits, amount)?;
        self.updated_at = Timestamp::now();
        Ok(self.credits)
    }

    pub fn record_access_code(&mut self, code: impl Into<String>) {
        self.access_code = code.into();
        self.updated_at = Timestamp::now();
    }
}
