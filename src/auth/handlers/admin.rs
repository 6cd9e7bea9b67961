/**
 * Admin Handlers
 *
 * Routes gated to the admin role. The gate runs in middleware, so by
 * the time a handler here executes the caller is a verified admin.
 */
use axum::extract::State;
use axum::Json;
use std::sync::Arc;

use crate::auth::handlers::types::UserResponse;
use crate::auth::users::UserStore;
use crate::error::ApiError;

/// Handles `GET /api/admin/users`.
///
/// Returns every account, oldest first, in the sanitized shape.
pub async fn list_users(
    State(store): State<Arc<dyn UserStore>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = store.list().await?;

    tracing::debug!("admin listed {} users", users.len());

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
