/**
 * Application State
 *
 * Shared state handed to the router. Cloning is cheap: both fields are
 * behind `Arc`, so every request handler sees the same store and the
 * same auth configuration.
 *
 * The `FromRef` impls let handlers and middleware extract exactly the
 * piece they need (`State<Arc<dyn UserStore>>` in the read-only
 * handlers, `State<Arc<AuthConfig>>` in the authentication layer)
 * instead of the whole state.
 */
use axum::extract::FromRef;
use std::sync::Arc;

use crate::auth::users::UserStore;
use crate::server::config::AuthConfig;

/// State shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// Credential store; Postgres in deployment, in-memory without a
    /// `DATABASE_URL` and in tests.
    pub store: Arc<dyn UserStore>,

    /// Signing secret and hashing cost.
    pub auth: Arc<AuthConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, auth: AuthConfig) -> Self {
        Self {
            store,
            auth: Arc::new(auth),
        }
    }
}

impl FromRef<AppState> for Arc<dyn UserStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for Arc<AuthConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}
