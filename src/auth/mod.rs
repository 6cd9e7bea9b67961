//! Authentication Module
//!
//! Everything identity: the role taxonomy, password hashing, token
//! issue and verification, the user store, and the HTTP handlers that
//! tie them together.
//!
//! # Architecture
//!
//! ```text
//! auth/
//! ├── roles.rs      - Closed role set (student, company, admin)
//! ├── password.rs   - Bcrypt hashing and the signup strength policy
//! ├── tokens.rs     - JWT issue and classified verification
//! ├── users.rs      - UserStore trait, Postgres and in-memory stores
//! └── handlers/     - Signup, login, me, and admin endpoints
//! ```
//!
//! The deliberate seams: handlers depend on the `UserStore` trait and
//! never on a concrete store, and token verification depends only on
//! the configured secret, never on the store. A request with a valid
//! token costs zero database reads until a handler asks for the
//! record.
//!
//! # Example
//!
//! ```rust,no_run
//! use internmatch::auth::roles::Role;
//! use internmatch::auth::tokens::{create_token, verify_token};
//!
//! let token = create_token(1, Role::Student, "ada@example.com", "secret").unwrap();
//! let claims = verify_token(&token, "secret").unwrap();
//! assert_eq!(claims.role, Role::Student);
//! ```

/// Role taxonomy
pub mod roles;

/// Password hashing and strength rules
pub mod password;

/// Token issue and verification
pub mod tokens;

/// User records and stores
pub mod users;

/// HTTP endpoint handlers
pub mod handlers;

// Re-export commonly used types
pub use handlers::{get_me, list_users, login, signup};
pub use handlers::{AuthResponse, LoginRequest, SignupRequest, UserResponse};
pub use roles::Role;
pub use tokens::{create_token, create_token_at, verify_token, Claims, TokenError, VerifiedClaims};
pub use users::{MemoryUserStore, NewUser, PgUserStore, StoreError, User, UserStore};
