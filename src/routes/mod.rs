//! Routing Module
//!
//! Route declarations and router assembly.
//!
//! ```text
//! routes/
//! ├── router.rs      - create_router, fallback, global layers
//! └── api_routes.rs  - endpoint table and per-route protection
//! ```

/// Router assembly and global layers
pub mod router;

/// API endpoint configuration
pub mod api_routes;

// Re-export commonly used types
pub use router::create_router;
