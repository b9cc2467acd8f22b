//! Route configuration for account endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use super::handlers::{
    add_credits, add_user_space, create_access_code, create_user, credit_costs,
    delete_access_code, delete_user, get_access_code, get_credits, get_user, list_access_codes,
    list_user_spaces, list_users, remove_credits, remove_user_space, update_access_code,
    update_user, verify_access_code,
};
use crate::adapters::http::state::AppState;

/// Creates the account router.
///
/// Users are addressed by the auth provider's id; access codes by record id.
pub fn account_router() -> Router<AppState> {
    Router::new()
        .route("/user", post(create_user))
        .route("/users", get(list_users))
        .route(
            "/user/:user_id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/user/:user_id/space", get(list_user_spaces))
        .route(
            "/user/:user_id/space/:space_id",
            put(add_user_space).delete(remove_user_space),
        )
        .route("/credits/:user_id", get(get_credits))
        .route("/credits/:user_id/add/:amount", post(add_credits))
        .route("/credits/:user_id/remove/:amount", post(remove_credits))
        .route("/credit-costs", get(credit_costs))
        .route("/access-code", post(create_access_code))
        .route("/access-codes", get(list_access_codes))
        .route(
            "/access-code/:id",
            get(get_access_code)
                .put(update_access_code)
                .delete(delete_access_code),
        )
        .route("/verify-access-code", post(verify_access_code))
}
