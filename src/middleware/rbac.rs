/**
 * Role-Based Access Gate
 *
 * Per-route authorization over the identity the authentication layer
 * attached. A gate is built once at router construction with the set
 * of roles the route accepts; at request time it is a pure membership
 * check against the caller's role.
 *
 * The gate runs strictly after `authenticate`, so reaching it without
 * an identity means the route was wired without the auth layer and the
 * request is rejected as unauthenticated, not as forbidden. A denial
 * names both the caller's role and the accepted set in the body.
 */
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::roles::Role;
use crate::error::ApiError;
use crate::middleware::auth::{AuthError, AuthenticatedUser};

/// An allowed-role set for one route, decided at construction time.
#[derive(Debug, Clone, Copy)]
pub struct RoleGate {
    allowed: &'static [Role],
}

impl RoleGate {
    /// Builds a gate accepting exactly the given roles.
    pub fn allow(allowed: &'static [Role]) -> Self {
        Self { allowed }
    }

    /// Pure membership check: is this user's role in the allowed set?
    ///
    /// The error carries the presented role and the accepted set so the
    /// 403 body can report both.
    pub fn check(&self, user: &AuthenticatedUser) -> Result<(), ApiError> {
        if self.allowed.contains(&user.role) {
            Ok(())
        } else {
            Err(ApiError::Forbidden {
                role: user.role,
                allowed: self.allowed,
            })
        }
    }

    /// Middleware entry point, layered inside `authenticate`.
    pub async fn enforce(self, request: Request, next: Next) -> Result<Response, ApiError> {
        let user = request
            .extensions()
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AuthError::MissingHeader)?;

        if let Err(err) = self.check(&user) {
            tracing::warn!("role {} denied for user {}", user.role, user.user_id);
            return Err(err);
        }

        Ok(next.run(request).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with(role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 1,
            role,
            email: "gate@example.com".to_string(),
        }
    }

    #[test]
    fn test_member_role_passes() {
        let gate = RoleGate::allow(&[Role::Company, Role::Admin]);
        assert!(gate.check(&user_with(Role::Company)).is_ok());
        assert!(gate.check(&user_with(Role::Admin)).is_ok());
    }

    #[test]
    fn test_non_member_role_is_forbidden_with_context() {
        let gate = RoleGate::allow(&[Role::Company, Role::Admin]);

        let err = gate.check(&user_with(Role::Student)).unwrap_err();
        match err {
            ApiError::Forbidden { role, allowed } => {
                assert_eq!(role, Role::Student);
                assert_eq!(allowed, &[Role::Company, Role::Admin]);
            }
            other => panic!("expected Forbidden, got {:?}", other),
        }
    }

    #[test]
    fn test_student_admitted_when_listed() {
        let gate = RoleGate::allow(&[Role::Student, Role::Admin]);
        assert!(gate.check(&user_with(Role::Student)).is_ok());
        assert!(gate.check(&user_with(Role::Company)).is_err());
    }

    #[test]
    fn test_every_role_passes_a_full_gate() {
        let gate = RoleGate::allow(&Role::ALL);
        for role in Role::ALL {
            assert!(gate.check(&user_with(role)).is_ok());
        }
    }

    #[test]
    fn test_empty_gate_admits_nobody() {
        let gate = RoleGate::allow(&[]);
        for role in Role::ALL {
            assert!(gate.check(&user_with(role)).is_err());
        }
    }
}
