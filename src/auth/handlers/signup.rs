/**
 * Signup Handler
 *
 * Registers a new account and issues the first token. The flow is:
 * normalize the email, validate every field at once, check the email
 * is free, hash the password off the async executor, create the
 * record, and mint a token for the new identity.
 *
 * The pre-insert duplicate check exists for the common case and a
 * clean log line; the store's uniqueness constraint is what actually
 * guarantees a single account per email, so a race between two
 * signups still resolves to one 201 and one 409.
 */
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::auth::handlers::types::{normalize_email, AuthResponse, SignupRequest};
use crate::auth::password::hash_password_async;
use crate::auth::roles::Role;
use crate::auth::tokens::create_token;
use crate::auth::users::NewUser;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Handles `POST /api/auth/signup`.
///
/// # Request Body
///
/// ```json
/// {
///     "name": "Ada Lovelace",
///     "email": "ada@example.com",
///     "password": "analytical1",
///     "role": "student"
/// }
/// ```
///
/// `role` is optional and defaults to `student`.
///
/// # Returns
///
/// * `201 Created` with the token and sanitized user on success
/// * `400 Bad Request` listing every field that failed validation
/// * `409 Conflict` when the email already has an account
///
/// # Response Body (201)
///
/// ```json
/// {
///     "token": "eyJhbGciOiJIUzI1NiIs...",
///     "user": {
///         "id": 1,
///         "name": "Ada Lovelace",
///         "email": "ada@example.com",
///         "role": "student",
///         "createdAt": "2025-06-01T12:00:00Z"
///     }
/// }
/// ```
pub async fn signup(
    State(state): State<AppState>,
    Json(mut request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    // Normalize before validating so a padded or cased email is judged
    // and stored in its canonical form.
    request.email = normalize_email(&request.email);
    request.validate()?;

    let name = request.name.trim().to_string();
    let role = request
        .role
        .as_deref()
        .and_then(Role::parse)
        .unwrap_or(Role::Student);

    tracing::info!("signup requested for {}", request.email);

    if state.store.find_by_email(&request.email).await?.is_some() {
        tracing::warn!("signup rejected, email already registered: {}", request.email);
        return Err(ApiError::EmailTaken);
    }

    let password_hash = hash_password_async(request.password, state.auth.bcrypt_cost).await?;

    let user = state
        .store
        .create(NewUser {
            name,
            email: request.email,
            password_hash,
            role,
        })
        .await?;

    let token = create_token(user.id, user.role, &user.email, &state.auth.secret)?;

    tracing::info!("user {} registered as {}", user.email, user.role);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}
