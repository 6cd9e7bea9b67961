/**
 * API Error Taxonomy
 *
 * Every failure a handler or middleware can produce, with one variant
 * per client-visible outcome. The variant decides the status code and
 * the machine-readable code in the body; the display string becomes
 * the human-readable message.
 *
 * Internal failures (database, hashing, token signing) all collapse
 * into `Internal`. The detail is logged at response time and the body
 * carries only a generic message.
 */
use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::auth::password::PasswordError;
use crate::auth::roles::Role;
use crate::auth::tokens::TokenError;
use crate::auth::users::StoreError;
use crate::middleware::auth::AuthError;

/// One field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Unified error type for the request pipeline.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Aggregated field failures from the request validator (400).
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// Signup with an email that already has an account (409).
    #[error("email already registered")]
    EmailTaken,

    /// Unknown email or wrong password. The two are deliberately
    /// indistinguishable in status, code, and message (401).
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Authentication failure from the middleware (401).
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Authenticated, but the role is not in the route's allowed set (403).
    #[error("role {role} is not allowed on this route")]
    Forbidden {
        role: Role,
        allowed: &'static [Role],
    },

    /// The referenced user record does not exist (404).
    #[error("user not found")]
    NotFound,

    /// Unexpected server-side failure; detail is logged, not returned (500).
    #[error("internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn internal(detail: impl Into<String>) -> Self {
        ApiError::Internal(detail.into())
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::EmailTaken => StatusCode::CONFLICT,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable code for the response body.
    ///
    /// Token failures get distinct codes so a client can tell "log in
    /// again" (`TOKEN_EXPIRED`) from "this token will never work"
    /// (`INVALID_TOKEN`). Header-level problems stay on the generic
    /// `UNAUTHORIZED` since no token was even presented.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::EmailTaken => "EMAIL_TAKEN",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::Auth(AuthError::Token(TokenError::Expired)) => "TOKEN_EXPIRED",
            ApiError::Auth(AuthError::Token(_)) => "INVALID_TOKEN",
            ApiError::Auth(_) => "UNAUTHORIZED",
            ApiError::Forbidden { .. } => "FORBIDDEN",
            ApiError::NotFound => "NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |error| FieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| format!("invalid value for {}", field)),
                })
            })
            .collect();

        // Stable ordering keeps the body deterministic across runs.
        fields.sort();
        ApiError::Validation(fields)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => ApiError::EmailTaken,
            StoreError::Database(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        ApiError::Internal(format!("token signing failed: {}", err))
    }
}
