/**
 * Login Handler
 *
 * Exchanges credentials for a fresh token. Lookup misses and password
 * mismatches produce byte-identical responses, so a caller can never
 * probe which emails have accounts. The server log keeps the two cases
 * apart for operators.
 */
use axum::extract::State;
use axum::Json;
use validator::Validate;

use crate::auth::handlers::types::{normalize_email, AuthResponse, LoginRequest};
use crate::auth::password::verify_password_async;
use crate::auth::tokens::create_token;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Handles `POST /api/auth/login`.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "ada@example.com",
///     "password": "analytical1"
/// }
/// ```
///
/// A `role` field is accepted and ignored; the stored role comes back
/// in the response and in the token claims.
///
/// # Returns
///
/// * `200 OK` with a fresh token and the sanitized user
/// * `400 Bad Request` when a field is missing or malformed
/// * `401 Unauthorized` for an unknown email or a wrong password,
///   indistinguishably
pub async fn login(
    State(state): State<AppState>,
    Json(mut request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    request.email = normalize_email(&request.email);
    request.validate()?;

    let user = match state.store.find_by_email(&request.email).await? {
        Some(user) => user,
        None => {
            tracing::warn!("login failed, no account for {}", request.email);
            return Err(ApiError::InvalidCredentials);
        }
    };

    let password_ok = verify_password_async(request.password, user.password_hash.clone()).await?;
    if !password_ok {
        tracing::warn!("login failed, wrong password for {}", request.email);
        return Err(ApiError::InvalidCredentials);
    }

    let token = create_token(user.id, user.role, &user.email, &state.auth.secret)?;

    tracing::info!("user {} logged in", user.email);

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}
