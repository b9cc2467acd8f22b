//! Space - a named container of slide decks.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SpaceId, Timestamp, ValidationError};

/// A grouping of slide decks that users can subscribe to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub id: SpaceId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Partial update for a space. Absent or empty values are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SpacePatch {
    #[serde(default)]
    pub name: Option<String>,
}

impl Space {
    /// Creates a new space with a fresh identifier.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        let now = Timestamp::now();
        Ok(Self {
            id: SpaceId::new(),
            name,
            created_at: now,
            updated_at: now,
        })
    }

    /// Merges the provided fields and bumps `updated_at`.
    pub fn apply(&mut self, patch: SpacePatch) {
        if let Some(name) = patch.name.filter(|n| !n.is_empty()) {
            self.name = name;
        }
        self.updated_at = Timestamp::now();
    }
}
