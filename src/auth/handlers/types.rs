/**
 * Request and Response Types for Auth Endpoints
 *
 * The request DTOs carry their validation contract via `validator`
 * derives. Handlers normalize the email first, then call `validate()`,
 * which checks every field and reports all failures at once instead of
 * stopping at the first.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::auth::password::validate_password_strength;
use crate::auth::roles::Role;
use crate::auth::users::User;

/// Trims and lowercases an email so that ` Foo@Bar.COM ` and
/// `foo@bar.com` are the same identity everywhere: validation,
/// storage, and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_name(value: &str) -> Result<(), ValidationError> {
    let length = value.trim().chars().count();
    if !(2..=50).contains(&length) {
        return Err(ValidationError::new("name_length")
            .with_message("name must be 2 to 50 characters".into()));
    }
    Ok(())
}

fn validate_password(value: &str) -> Result<(), ValidationError> {
    validate_password_strength(value).map_err(|message| {
        ValidationError::new("password_strength").with_message(message.into())
    })
}

// The role stays a plain string in the DTO so an unknown value shows
// up in the aggregated validation report next to the other fields
// instead of failing JSON deserialization on its own.
fn validate_role(value: &str) -> Result<(), ValidationError> {
    if Role::parse(value).is_none() {
        return Err(ValidationError::new("unknown_role")
            .with_message("role must be one of student, company, admin".into()));
    }
    Ok(())
}

/// Body of `POST /api/auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Display name, 2 to 50 characters after trimming.
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    /// Email address; normalized before validation and storage.
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,

    /// At least 8 characters with at least one letter and one digit.
    #[validate(custom(function = "validate_password"))]
    pub password: String,

    /// Optional role; defaults to `student` when omitted.
    #[validate(custom(function = "validate_role"))]
    pub role: Option<String>,
}

/// Body of `POST /api/auth/login`.
///
/// Login only checks presence and email shape. Password strength rules
/// apply at signup; an account that predates a rule change must still
/// be able to log in.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,

    /// Accepted for wire compatibility and ignored; the stored role is
    /// authoritative at login.
    pub role: Option<String>,
}

/// Sanitized user shape returned by every endpoint. Never includes the
/// password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Body returned by signup and login: the issued token plus the user
/// it identifies.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn signup(name: &str, email: &str, password: &str, role: Option<&str>) -> SignupRequest {
        SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: role.map(str::to_string),
        }
    }

    #[test]
    fn test_normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email(" Foo@Bar.COM "), "foo@bar.com");
        assert_eq!(normalize_email("plain@example.com"), "plain@example.com");
    }

    #[test]
    fn test_normalize_email_is_idempotent() {
        let once = normalize_email("  MiXeD@CaSe.IO ");
        assert_eq!(normalize_email(&once), once);
    }

    #[test]
    fn test_valid_signup_passes() {
        let request = signup("Ada Lovelace", "ada@example.com", "analytical1", Some("student"));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_omitted_role_passes() {
        let request = signup("Ada Lovelace", "ada@example.com", "analytical1", None);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_every_bad_field_is_reported() {
        let request = signup("A", "not-an-email", "short", Some("root"));

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();

        assert_eq!(fields.len(), 4);
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("role"));
    }

    #[test]
    fn test_name_is_measured_after_trimming() {
        // 51 visible characters fail, surrounding whitespace does not count.
        let long = "x".repeat(51);
        assert!(signup(&long, "a@example.com", "passw0rd1", None)
            .validate()
            .is_err());
        assert!(signup("  Jo  ", "a@example.com", "passw0rd1", None)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_unknown_role_fails_validation() {
        let request = signup("Ada Lovelace", "ada@example.com", "analytical1", Some("owner"));
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("role"));
    }

    #[test]
    fn test_login_requires_password_presence_only() {
        let empty = LoginRequest {
            email: "a@example.com".to_string(),
            password: String::new(),
            role: None,
        };
        assert!(empty.validate().is_err());

        // Too weak for signup, fine for login.
        let weak = LoginRequest {
            email: "a@example.com".to_string(),
            password: "x".to_string(),
            role: None,
        };
        assert!(weak.validate().is_ok());
    }

    #[test]
    fn test_user_response_uses_camel_case_created_at() {
        let response = UserResponse {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: Role::Student,
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_user_response_never_carries_the_hash() {
        let user = User {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$2b$04$secret".to_string(),
            role: Role::Admin,
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(value.get("passwordHash").is_none());
        assert!(value.get("password_hash").is_none());
    }
}
