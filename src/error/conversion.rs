/**
 * Error Response Conversion
 *
 * Turns an `ApiError` into the JSON body every failure shares:
 *
 * ```json
 * { "error": { "code": "...", "message": "..." } }
 * ```
 *
 * Validation failures add a `fields` array with one entry per failed
 * field. Authorization denials add the caller's `role` and the
 * `allowed` set for the route.
 */
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!("internal error: {}", detail);
        }

        let mut error = json!({
            "code": self.error_code(),
            "message": self.to_string(),
        });

        match &self {
            ApiError::Validation(fields) => {
                error["fields"] = json!(fields);
            }
            ApiError::Forbidden { role, allowed } => {
                error["role"] = json!(role);
                error["allowed"] = json!(allowed);
            }
            _ => {}
        }

        (self.status_code(), Json(json!({ "error": error }))).into_response()
    }
}
