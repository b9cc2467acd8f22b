//! Account handlers: users, their spaces, credits and access codes.

mod access_codes;
mod credits;
mod users;
mod verify_access_code;

pub use access_codes::AccessCodeHandler;
pub use credits::{CreditChange, CreditsHandler};
pub use users::{AddSpaceOutcome, CreateUserCommand, UserHandler};
pub use verify_access_code::{VerifyAccessCodeCommand, VerifyAccessCodeHandler};
