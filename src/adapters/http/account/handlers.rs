//! HTTP handlers for account endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::application::handlers::{
    AddSpaceOutcome, CreateUserCommand, CreditChange, VerifyAccessCodeCommand,
};
use crate::application::ServiceError;
use crate::domain::account::{AccessCodePatch, UserPatch};
use crate::domain::foundation::{AccessCodeId, SpaceId, UserId};

use super::dto::{
    CreateAccessCodeRequest, CreateUserRequest, CreditCostsResponse, CreditsResponse,
    VerifyAccessCodeRequest,
};
use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::response::{DataResponse, MessageResponse};
use crate::adapters::http::state::AppState;

fn user_id(raw: &str) -> Result<UserId, ApiError> {
    UserId::new(raw).map_err(|e| ApiError(ServiceError::from(e)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Users
// ════════════════════════════════════════════════════════════════════════════════

/// POST /user
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let cmd = CreateUserCommand {
        user_id: request.user_id,
        profile: request.profile,
    };
    let user = state.user_handler().create(cmd).await?;
    Ok(DataResponse::ok(user))
}

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let users = state.user_handler().list().await?;
    Ok(DataResponse::ok(users))
}

/// GET /user/:user_id
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.user_handler().get(&user_id(&raw)?).await?;
    Ok(DataResponse::ok(user))
}

/// PUT /user/:user_id
pub async fn update_user(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    payload: Result<Json<UserPatch>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = user_id(&raw)?;
    let Json(patch) = payload?;
    let user = state.user_handler().update(&id, patch).await?;
    Ok(DataResponse::ok(user))
}

/// DELETE /user/:user_id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.user_handler().delete(&user_id(&raw)?).await?;
    Ok(MessageResponse::ok("User deleted successfully"))
}

/// GET /user/:user_id/space
pub async fn list_user_spaces(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let spaces = state.user_handler().list_spaces(&user_id(&raw)?).await?;
    Ok(DataResponse::ok(spaces))
}

/// PUT /user/:user_id/space/:space_id
pub async fn add_user_space(
    State(state): State<AppState>,
    Path((raw_user, raw_space)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let id = user_id(&raw_user)?;
    let space_id: SpaceId = parse_id(&raw_space, "space ID")?;
    let response = match state.user_handler().add_space(&id, space_id).await? {
        AddSpaceOutcome::Added(user) => DataResponse::ok(user).into_response(),
        AddSpaceOutcome::AlreadyPresent => {
            MessageResponse::ok("Space already added to user").into_response()
        }
    };
    Ok(response)
}

/// DELETE /user/:user_id/space/:space_id
pub async fn remove_user_space(
    State(state): State<AppState>,
    Path((raw_user, raw_space)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let id = user_id(&raw_user)?;
    let space_id: SpaceId = parse_id(&raw_space, "space ID")?;
    let user = state.user_handler().remove_space(&id, &space_id).await?;
    Ok(DataResponse::ok(user))
}

// ════════════════════════════════════════════════════════════════════════════════
// Credits
// ════════════════════════════════════════════════════════════════════════════════

/// GET /credits/:user_id
pub async fn get_credits(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let credits = state.credits_handler().balance(&user_id(&raw)?).await?;
    Ok(Json(CreditsResponse::balance(credits)))
}

/// POST /credits/:user_id/add/:amount
pub async fn add_credits(
    State(state): State<AppState>,
    Path((raw, amount)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let credits = state
        .credits_handler()
        .adjust(&user_id(&raw)?, CreditChange::Add, &amount)
        .await?;
    Ok(Json(CreditsResponse::adjusted(
        "Credits added successfully",
        credits,
    )))
}

/// POST /credits/:user_id/remove/:amount
pub async fn remove_credits(
    State(state): State<AppState>,
    Path((raw, amount)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let credits = state
        .credits_handler()
        .adjust(&user_id(&raw)?, CreditChange::Remove, &amount)
        .await?;
    Ok(Json(CreditsResponse::adjusted(
        "Credits removed successfully",
        credits,
    )))
}

/// GET /credit-costs
pub async fn credit_costs() -> impl IntoResponse {
    Json(CreditCostsResponse::published())
}

// ════════════════════════════════════════════════════════════════════════════════
// Access codes
// ════════════════════════════════════════════════════════════════════════════════

/// POST /access-code
pub async fn create_access_code(
    State(state): State<AppState>,
    payload: Result<Json<CreateAccessCodeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let code = state.access_code_handler().create(request.code).await?;
    Ok(DataResponse::created(code))
}

/// GET /access-codes
pub async fn list_access_codes(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let codes = state.access_code_handler().list().await?;
    Ok(DataResponse::ok(codes))
}

/// GET /access-code/:id
pub async fn get_access_code(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: AccessCodeId = parse_id(&id, "access code ID")?;
    let code = state.access_code_handler().get(&id).await?;
    Ok(DataResponse::ok(code))
}

/// PUT /access-code/:id
pub async fn update_access_code(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AccessCodePatch>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id: AccessCodeId = parse_id(&id, "access code ID")?;
    let Json(patch) = payload?;
    let code = state.access_code_handler().update(&id, patch).await?;
    Ok(DataResponse::ok(code))
}

/// DELETE /access-code/:id
pub async fn delete_access_code(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: AccessCodeId = parse_id(&id, "access code ID")?;
    state.access_code_handler().delete(&id).await?;
    Ok(MessageResponse::ok("Access code deleted successfully"))
}

/// POST /verify-access-code
pub async fn verify_access_code(
    State(state): State<AppState>,
    payload: Result<Json<VerifyAccessCodeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let redeemer = match request.user_id.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(user_id(raw)?),
        _ => None,
    };
    let cmd = VerifyAccessCodeCommand {
        code: request.code,
        user_id: redeemer,
    };
    let code = state.verify_access_code_handler().handle(cmd).await?;
    Ok(DataResponse::ok(code))
}
