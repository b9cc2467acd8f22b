//! Account module - learners, credits and access codes.

mod access_code;
pub mod credits;
mod user;

pub use access_code::{AccessCode, AccessCodePatch};
pub use credits::{CreditAmount, CreditCost, InsufficientCredits, STARTING_CREDITS};
pub use user::{User, UserPatch, UserProfile};
