/**
 * Token Issuing and Verification
 *
 * Stateless JWT sessions signed with HS256. A token is minted once at
 * signup or login and carries everything the request pipeline needs to
 * authenticate later calls: the user id, the email, and the role held
 * at issue time. Verification is pure computation over the token and
 * the shared secret. It never touches the user store, which also means
 * a role change only takes effect when the user logs in again.
 *
 * Verification failures are classified so the HTTP layer can answer
 * with the right body: an expired token is reported differently from a
 * forged or garbled one, and a token that passes the signature check
 * but lacks a usable id or role is rejected as incomplete.
 */
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::roles::Role;

/// Lifetime of an issued token.
pub const TOKEN_TTL_DAYS: i64 = 7;

/// Claims embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id, rendered as a string per JWT convention.
    pub sub: String,
    /// Email at issue time, carried for logging and display.
    pub email: String,
    /// Role held at issue time. Gates trust this until the token expires.
    pub role: Role,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Lenient mirror of [`Claims`] used during verification, so a token
/// whose payload is missing fields fails classification here instead
/// of failing deserialization with an unhelpful error.
#[derive(Debug, Deserialize)]
struct RawClaims {
    sub: Option<String>,
    email: Option<String>,
    role: Option<String>,
}

/// Identity extracted from a token that passed verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedClaims {
    pub user_id: i64,
    pub role: Role,
    pub email: String,
}

/// Why a presented token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Signature checks out but the expiry has passed.
    #[error("token expired")]
    Expired,

    /// Bad signature, garbled structure, or any other decode failure.
    #[error("invalid token")]
    Invalid,

    /// Valid signature but the payload is missing a usable id or role.
    #[error("token claims incomplete")]
    IncompleteClaims,
}

/// Issues a signed token for the given user, expiring [`TOKEN_TTL_DAYS`]
/// from now.
pub fn create_token(
    user_id: i64,
    role: Role,
    email: &str,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    create_token_at(user_id, role, email, secret, Utc::now())
}

/// Issues a token with an explicit issue instant.
///
/// `create_token` delegates here with the current time. Tests use this
/// directly to mint tokens that are already expired.
pub fn create_token_at(
    user_id: i64,
    role: Role,
    email: &str,
    secret: &str,
    issued_at: DateTime<Utc>,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role,
        iat: issued_at.timestamp(),
        exp: (issued_at + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &key)
}

/// Verifies a token against the shared secret and extracts the caller's
/// identity.
///
/// Pure computation: no store lookup, no side effects. Expiry is the
/// only failure reported as [`TokenError::Expired`]; every other decode
/// problem collapses to [`TokenError::Invalid`] so the response body
/// never hints at what exactly was wrong with a forged token.
pub fn verify_token(token: &str, secret: &str) -> Result<VerifiedClaims, TokenError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    // jsonwebtoken defaults to 60 seconds of leeway; expiry here is exact.
    validation.leeway = 0;

    let data = decode::<RawClaims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })?;

    let raw = data.claims;

    let user_id = raw
        .sub
        .as_deref()
        .and_then(|sub| sub.parse::<i64>().ok())
        .ok_or(TokenError::IncompleteClaims)?;

    let role = raw
        .role
        .as_deref()
        .and_then(Role::parse)
        .ok_or(TokenError::IncompleteClaims)?;

    Ok(VerifiedClaims {
        user_id,
        role,
        email: raw.email.unwrap_or_default(),
    })
}
