//! Error Handling Module
//!
//! Central error taxonomy for the request pipeline and its conversion
//! into HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── types.rs       - ApiError taxonomy, status and code mapping
//! └── conversion.rs  - IntoResponse impl producing the JSON error body
//! ```
//!
//! Handlers and middleware return `Result<_, ApiError>` and rely on the
//! `From` conversions in `types.rs` to lift store, hashing, validation,
//! and token failures into the taxonomy with `?`.

/// Error type definitions and mappings
pub mod types;

/// Conversion into HTTP responses
pub mod conversion;

// Re-export commonly used types
pub use types::{ApiError, FieldError};
