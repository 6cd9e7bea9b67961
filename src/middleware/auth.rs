/**
 * Authentication Middleware
 *
 * Sits in front of every protected route. Pulls the bearer token out
 * of the Authorization header, verifies it against the configured
 * secret, and stashes the verified identity in request extensions for
 * handlers and the role gate to read.
 *
 * Header problems and token problems are kept apart: a missing or
 * malformed header never reached verification, while an expired or
 * invalid token did and failed. The response body reflects the split
 * so clients can tell "log in again" from "fix your request".
 *
 * Verification is purely computational. No store lookup happens here,
 * which keeps the hot path database-free but also means a verified
 * token vouches for a user id without proving the record still exists;
 * handlers that need the record look it up themselves.
 */
use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;
use thiserror::Error;

use crate::auth::roles::Role;
use crate::auth::tokens::{verify_token, TokenError, VerifiedClaims};
use crate::error::ApiError;
use crate::server::config::AuthConfig;

/// Why a request failed authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No Authorization header on the request.
    #[error("missing authorization header")]
    MissingHeader,

    /// Authorization header present but not `Bearer <token>`.
    #[error("malformed authorization header")]
    MalformedHeader,

    /// `Bearer ` scheme with nothing after it.
    #[error("empty bearer token")]
    EmptyToken,

    /// The token itself was rejected.
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Verified identity attached to the request after authentication.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub role: Role,
    pub email: String,
}

/// Middleware that authenticates the request or rejects it with a 401.
///
/// On success the request continues with an [`AuthenticatedUser`] in
/// its extensions.
pub async fn authenticate(
    State(auth): State<Arc<AuthConfig>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = match verify_request(request.headers(), &auth) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!("request rejected: {}", err);
            return Err(err.into());
        }
    };

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.user_id,
        role: claims.role,
        email: claims.email,
    });

    Ok(next.run(request).await)
}

/// Extracts and verifies the bearer token from the request headers.
fn verify_request(headers: &HeaderMap, auth: &AuthConfig) -> Result<VerifiedClaims, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingHeader)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MalformedHeader)?;

    if token.is_empty() {
        return Err(AuthError::EmptyToken);
    }

    Ok(verify_token(token, &auth.secret)?)
}

/// Extractor for handlers behind [`authenticate`].
///
/// Rejects with a 401 if no verified identity is in the request
/// extensions, which in practice means the route was registered
/// without the authentication layer.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                tracing::warn!("no authenticated user on request, route is missing the auth layer");
                AuthError::MissingHeader.into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::tokens::create_token;
    use axum::http::HeaderValue;

    const SECRET: &str = "middleware-test-secret";

    fn config() -> AuthConfig {
        AuthConfig {
            secret: SECRET.to_string(),
            bcrypt_cost: 4,
        }
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_missing_header_is_classified() {
        let result = verify_request(&HeaderMap::new(), &config());
        assert_eq!(result.unwrap_err(), AuthError::MissingHeader);
    }

    #[test]
    fn test_wrong_scheme_is_malformed() {
        let result = verify_request(&headers_with("Token abc123"), &config());
        assert_eq!(result.unwrap_err(), AuthError::MalformedHeader);
    }

    #[test]
    fn test_bare_bearer_without_space_is_malformed() {
        let result = verify_request(&headers_with("Bearer"), &config());
        assert_eq!(result.unwrap_err(), AuthError::MalformedHeader);
    }

    #[test]
    fn test_empty_token_is_classified() {
        let result = verify_request(&headers_with("Bearer "), &config());
        assert_eq!(result.unwrap_err(), AuthError::EmptyToken);
    }

    #[test]
    fn test_valid_token_yields_claims() {
        let token = create_token(5, Role::Company, "c@example.com", SECRET).unwrap();
        let claims = verify_request(&headers_with(&format!("Bearer {}", token)), &config()).unwrap();

        assert_eq!(claims.user_id, 5);
        assert_eq!(claims.role, Role::Company);
    }

    #[test]
    fn test_bad_token_maps_to_token_error() {
        let result = verify_request(&headers_with("Bearer garbage"), &config());
        assert_eq!(result.unwrap_err(), AuthError::Token(TokenError::Invalid));
    }
}
