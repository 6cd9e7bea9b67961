//! Shared fixtures for the integration tests.
//!
//! Every test runs the real router over a fresh in-memory store, so
//! suites are isolated from each other and from any real database.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum_test::TestServer;
use serde_json::{json, Value};

use internmatch::auth::users::MemoryUserStore;
use internmatch::routes::create_router;
use internmatch::server::config::AuthConfig;
use internmatch::server::state::AppState;

/// Signing secret the test state is configured with. Tests that mint
/// tokens by hand use the same value.
pub const TEST_SECRET: &str = "integration-test-secret";

/// Fresh application state over an empty in-memory store.
///
/// Bcrypt runs at the minimum cost so signup-heavy tests stay fast.
pub fn test_state() -> AppState {
    AppState::new(
        Arc::new(MemoryUserStore::new()),
        AuthConfig {
            secret: TEST_SECRET.to_string(),
            bcrypt_cost: 4,
        },
    )
}

/// An in-process server running the full router.
pub struct TestApp {
    pub server: TestServer,
}

impl TestApp {
    pub fn new() -> Self {
        let server = TestServer::new(create_router(test_state())).expect("test server");
        Self { server }
    }

    /// Signs up a user through the API, asserting success, and returns
    /// the response user object and the issued token.
    pub async fn signup_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Option<&str>,
    ) -> (Value, String) {
        let mut body = json!({ "name": name, "email": email, "password": password });
        if let Some(role) = role {
            body["role"] = json!(role);
        }

        let response = self.server.post("/api/auth/signup").json(&body).await;
        assert_eq!(
            response.status_code(),
            axum::http::StatusCode::CREATED,
            "signup fixture failed: {}",
            response.text()
        );

        let body: Value = response.json();
        let token = body["token"]
            .as_str()
            .expect("token in response")
            .to_string();
        (body["user"].clone(), token)
    }
}

/// Formats a bearer Authorization header value.
pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).expect("bearer header value")
}
