//! Server Module
//!
//! Process-level concerns: configuration, shared state, and startup.
//!
//! ```text
//! server/
//! ├── config.rs  - AuthConfig resolution, optional Postgres pool
//! ├── state.rs   - AppState shared by all routes
//! └── init.rs    - create_app, wiring config + store + router
//! ```

/// Configuration loading
pub mod config;

/// Shared application state
pub mod state;

/// Application startup
pub mod init;

// Re-export commonly used types
pub use config::{AuthConfig, ConfigError};
pub use init::create_app;
pub use state::AppState;
