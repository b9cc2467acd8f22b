//! HTTP adapter for users, credits and access codes.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateAccessCodeRequest, CreateUserRequest, CreditCostsResponse, CreditsResponse,
    VerifyAccessCodeRequest,
};
pub use routes::account_router;
