/**
 * API Route Configuration
 *
 * Declares every HTTP endpoint and the protection level it gets:
 *
 * | Route                  | Method | Protection          |
 * |------------------------|--------|---------------------|
 * | /api/health            | GET    | public              |
 * | /api/auth/signup       | POST   | public              |
 * | /api/auth/login        | POST   | public              |
 * | /api/auth/me           | GET    | authenticated       |
 * | /api/admin/users       | GET    | authenticated+admin |
 *
 * Protected routes are grouped into sub-routers so the middleware
 * stack is declared once per protection level. Layers run outermost
 * last-added: the admin group adds the role gate first and the
 * authentication layer second, so authentication always runs before
 * the gate.
 */
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::auth::handlers::{get_me, list_users, login, signup};
use crate::auth::roles::Role;
use crate::middleware::auth::authenticate;
use crate::middleware::rbac::RoleGate;
use crate::server::state::AppState;

/// Roles accepted on `/api/admin/*`.
const ADMIN_ROUTES: &[Role] = &[Role::Admin];

/// Adds all API routes to the router.
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let admin_gate = RoleGate::allow(ADMIN_ROUTES);

    let authenticated = Router::new()
        .route("/api/auth/me", get(get_me))
        .route_layer(from_fn_with_state(app_state.clone(), authenticate));

    let admin = Router::new()
        .route("/api/admin/users", get(list_users))
        .route_layer(from_fn(move |request, next| {
            admin_gate.enforce(request, next)
        }))
        .route_layer(from_fn_with_state(app_state.clone(), authenticate));

    router
        .route("/api/health", get(health))
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .merge(authenticated)
        .merge(admin)
}

/// Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
