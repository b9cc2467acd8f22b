//! AccessCode - an invitation code redeemed at signup.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AccessCodeId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessCode {
    pub id: AccessCodeId,
    pub code: String,
    pub used: bool,
}

/// Partial update for an access code.
///
/// `used` is always applied; an omitted value resets it to false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AccessCodePatch {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub used: bool,
}

impl AccessCode {
    /// Creates a fresh, unused code.
    pub fn new(code: impl Into<String>) -> Result<Self, ValidationError> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(ValidationError::empty_field("code"));
        }
        Ok(Self {
            id: AccessCodeId::new(),
            code,
            used: false,
        })
    }

    pub fn apply(&mut self, patch: AccessCodePatch) {
        if let Some(code) = patch.code.filter(|c| !c.is_empty()) {
            self.code = code;
        }
        self.used = patch.used;
    }

    /// Marks the code as redeemed.
    ///
    /// Redeeming an already-used code is accepted and leaves it used.
    pub fn redeem(&mut self) {
        self.used = true;
    }
}
