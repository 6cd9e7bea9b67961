/**
 * Server Initialization
 *
 * Builds the application: resolve configuration, pick the credential
 * store, assemble the router.
 *
 * # Initialization Process
 *
 * 1. Resolve the auth configuration from the environment
 * 2. Load the optional Postgres pool and run migrations
 * 3. Fall back to the in-memory store when no database is available
 * 4. Create the router with all routes and middleware
 *
 * # Error Handling
 *
 * A missing or unreachable database is tolerated; the server runs on
 * the in-memory store and says so. A production deployment with a
 * missing or weak `JWT_SECRET` is not: `create_app` returns the
 * configuration error and the process exits.
 */
use axum::Router;
use std::sync::Arc;

use crate::auth::users::{MemoryUserStore, PgUserStore, UserStore};
use crate::routes::router::create_router;
use crate::server::config::{load_database, AuthConfig, ConfigError};
use crate::server::state::AppState;

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests, or the fatal
/// configuration error that should abort startup.
pub async fn create_app() -> Result<Router<()>, ConfigError> {
    tracing::info!("Initializing InternMatch auth server");

    // Step 1: Resolve auth configuration
    // Fails in production mode when the secret is missing or weak.
    let auth = AuthConfig::from_env()?;
    tracing::info!("Auth configured, bcrypt cost {}", auth.bcrypt_cost);

    // Step 2: Load optional services
    let db_pool = load_database().await;

    // Step 3: Pick the credential store
    let store: Arc<dyn UserStore> = match db_pool {
        Some(pool) => {
            tracing::info!("Using the Postgres user store");
            Arc::new(PgUserStore::new(pool))
        }
        None => {
            tracing::warn!("Using the in-memory user store, records do not survive restarts");
            Arc::new(MemoryUserStore::new())
        }
    };

    // Step 4: Create app state and router
    let app_state = AppState::new(store, auth);
    let app = create_router(app_state);

    tracing::info!("Router configured");

    Ok(app)
}
