//! InternMatch - Auth Backend
//!
//! The authentication and authorization pipeline for InternMatch, an
//! internship marketplace where students apply to listings, companies
//! publish them, and admins run the platform.
//!
//! # Overview
//!
//! This library provides the full account pipeline:
//! - Signup with aggregated field validation and bcrypt-hashed credentials
//! - Login exchanging credentials for a 7-day HS256 token
//! - Stateless token verification with classified failures
//! - Role-gated routes over the closed student/company/admin set
//!
//! # Module Structure
//!
//! - **`auth`** - Identity domain
//!   - Role taxonomy, password hashing, token issue/verification
//!   - The `UserStore` trait with Postgres and in-memory stores
//!   - HTTP handlers for signup, login, me, and admin routes
//!
//! - **`middleware`** - The protected-route stack
//!   - `authenticate` verifies bearer tokens and attaches the identity
//!   - `RoleGate` checks the identity's role against a per-route set
//!
//! - **`error`** - One `ApiError` taxonomy and its JSON response shape
//!
//! - **`routes`** - Endpoint table, router assembly, global layers
//!
//! - **`server`** - Configuration, shared state, startup
//!
//! # Usage
//!
//! ```rust,no_run
//! use internmatch::server::init::create_app;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app().await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Design Notes
//!
//! Token verification is pure computation against the configured
//! secret: the hot path costs zero database reads, and a role change
//! only takes effect at the next login. Handlers depend on the
//! `UserStore` trait, so the integration tests run the real router
//! over the in-memory store with no database in sight.

/// Identity domain: roles, passwords, tokens, users, handlers
pub mod auth;

/// Error taxonomy and HTTP conversion
pub mod error;

/// Authentication and authorization layers
pub mod middleware;

/// Endpoint table and router assembly
pub mod routes;

/// Configuration, state, and startup
pub mod server;

// Re-export commonly used types
pub use error::ApiError;
pub use routes::create_router;
pub use server::{create_app, AppState, AuthConfig};
