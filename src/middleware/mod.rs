//! Request Middleware Module
//!
//! The two layers in front of protected routes, applied in order:
//!
//! ```text
//! request
//!    │
//!    ▼
//! authenticate (middleware/auth.rs)
//!    │  verifies the bearer token, attaches AuthenticatedUser
//!    ▼
//! RoleGate::enforce (middleware/rbac.rs)
//!    │  checks the role against the route's allowed set
//!    ▼
//! handler
//! ```
//!
//! Authentication failures answer 401 with a classified body code;
//! authorization failures answer 403 and name the role that was
//! presented and the set that would have been accepted.

/// Token authentication layer
pub mod auth;

/// Role-based access gate
pub mod rbac;

// Re-export commonly used types
pub use auth::{authenticate, AuthError, AuthenticatedUser, CurrentUser};
pub use rbac::RoleGate;
