//! HTTP DTOs for account endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::account::{CreditCost, UserProfile};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Signup request: the auth provider's id plus profile fields.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(flatten)]
    pub profile: UserProfile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccessCodeRequest {
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyAccessCodeRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Balance after a read or an adjustment.
#[derive(Debug, Clone, Serialize)]
pub struct CreditsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub credits: i64,
    pub status_code: u16,
}

impl CreditsResponse {
    pub fn balance(credits: i64) -> Self {
        Self {
            message: None,
            credits,
            status_code: 200,
        }
    }

    pub fn adjusted(message: impl Into<String>, credits: i64) -> Self {
        Self {
            message: Some(message.into()),
            credits,
            status_code: 200,
        }
    }
}

/// Price of each billable operation.
#[derive(Debug, Clone, Serialize)]
pub struct CreditCostsResponse {
    pub costs: BTreeMap<String, i64>,
    pub status_code: u16,
}

impl CreditCostsResponse {
    pub fn published() -> Self {
        let costs = CreditCost::ALL
            .iter()
            .map(|cost| (cost.key().to_string(), cost.amount()))
            .collect();
        Self {
            costs,
            status_code: 200,
        }
    }
}
