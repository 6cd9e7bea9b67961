/**
 * Router Assembly
 *
 * Builds the complete application router: API routes, the 404
 * fallback, and the global layers. CORS is the outermost layer so
 * preflight requests are answered before anything else runs; the
 * trace layer inside it logs every handled request.
 */
use axum::http::StatusCode;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::routes::api_routes::configure_api_routes;
use crate::server::state::AppState;

/// Creates the application router with all routes and middleware.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new();

    let router = configure_api_routes(router, &app_state);

    let router = router
        .fallback(|| async { (StatusCode::NOT_FOUND, "Not Found") })
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer());

    router.with_state(app_state)
}

/// CORS policy from `CORS_ORIGINS`, a comma-separated origin list.
/// Without it every origin is allowed, which suits local development
/// where the frontend runs on its own port.
fn cors_layer() -> CorsLayer {
    let allow_origin = match std::env::var("CORS_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                tracing::warn!("CORS_ORIGINS set but contains no valid origins, allowing any");
                AllowOrigin::any()
            } else {
                tracing::info!("CORS configured with {} allowed origins", origins.len());
                AllowOrigin::list(origins)
            }
        }
        _ => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
