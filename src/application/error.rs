//! Application-level error taxonomy.
//!
//! Every handler returns [`ServiceError`]. Port errors convert into it so
//! handlers can propagate with `?`; the HTTP layer maps each variant to a
//! status code.

use thiserror::Error;

use crate::domain::account::InsufficientCredits;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::generation::{MissingText, PayloadError};
use crate::ports::{AIError, DownloadError, RasterizeError, SpeechError, StorageError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Malformed identifier or missing required field.
    #[error("{0}")]
    InvalidInput(String),

    /// A referenced document does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A debit exceeded the balance.
    #[error("Insufficient credits")]
    InsufficientCredits { balance: i64 },

    /// Database or external API failure.
    #[error("{0}")]
    Upstream(String),
}

impl ServiceError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ServiceError::InvalidInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        ServiceError::Upstream(message.into())
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err.code {
            code if code.is_not_found() => ServiceError::NotFound(err.message),
            ErrorCode::ValidationFailed | ErrorCode::InvalidFormat => {
                ServiceError::InvalidInput(err.message)
            }
            _ => ServiceError::Upstream(err.message),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::InvalidInput(err.to_string())
    }
}

impl From<InsufficientCredits> for ServiceError {
    fn from(err: InsufficientCredits) -> Self {
        ServiceError::InsufficientCredits {
            balance: err.balance,
        }
    }
}

impl From<MissingText> for ServiceError {
    fn from(err: MissingText) -> Self {
        ServiceError::NotFound(err.to_string())
    }
}

macro_rules! upstream_from {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for ServiceError {
                fn from(err: $source) -> Self {
                    ServiceError::Upstream(err.to_string())
                }
            }
        )*
    };
}

upstream_from!(
    AIError,
    SpeechError,
    StorageError,
    RasterizeError,
    DownloadError,
    PayloadError,
);
