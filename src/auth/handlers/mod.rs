//! Auth HTTP Handlers
//!
//! One file per endpoint, plus the shared request and response types.
//!
//! ```text
//! handlers/
//! ├── types.rs   - DTOs, validation rules, email normalization
//! ├── signup.rs  - POST /api/auth/signup
//! ├── login.rs   - POST /api/auth/login
//! ├── me.rs      - GET  /api/auth/me
//! └── admin.rs   - GET  /api/admin/users
//! ```

/// Request/response DTOs and validation
pub mod types;

/// Account registration
pub mod signup;

/// Credential exchange
pub mod login;

/// Current-user lookup
pub mod me;

/// Admin-only routes
pub mod admin;

// Re-export commonly used types
pub use admin::list_users;
pub use login::login;
pub use me::get_me;
pub use signup::signup;
pub use types::{AuthResponse, LoginRequest, SignupRequest, UserResponse};
