/**
 * Current User Handler
 *
 * Returns the account behind the presented token. The token alone
 * proves identity; this handler is the place that additionally checks
 * the record still exists, since verification never reads the store.
 */
use axum::extract::State;
use axum::Json;
use std::sync::Arc;

use crate::auth::handlers::types::UserResponse;
use crate::auth::users::UserStore;
use crate::error::ApiError;
use crate::middleware::auth::CurrentUser;

/// Handles `GET /api/auth/me`.
///
/// # Returns
///
/// * `200 OK` with the sanitized user for the token's subject
/// * `401 Unauthorized` when the token is missing, expired, or invalid
/// * `404 Not Found` when the record behind a valid token is gone
pub async fn get_me(
    State(store): State<Arc<dyn UserStore>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<UserResponse>, ApiError> {
    let record = store
        .find_by_id(user.user_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(record.into()))
}
