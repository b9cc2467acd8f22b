//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps and error types that form the
//! vocabulary of the slide study domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    AccessCodeId, FlashcardId, QuizQuestionId, SlideId, SlideImageId, SpaceId, UserId,
    UserRecordId,
};
pub use timestamp::Timestamp;
