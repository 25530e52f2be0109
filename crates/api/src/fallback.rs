//! Dedicated fallback pages for 404 and 500 responses.

use axum::{
    Json,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Fallback handler for unknown routes.
pub async fn not_found(uri: Uri) -> Response {
    let body = Json(json!({
        "error": {
            "code": "NOT_FOUND",
            "message": "Page not found",
            "path": uri.path(),
        }
    }));

    (StatusCode::NOT_FOUND, body).into_response()
}

/// Handler for panics caught by `CatchPanicLayer`.
///
/// The panic payload is logged, never echoed to the client.
pub fn panic_response(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    tracing::error!(panic = %detail, "Request handler panicked");

    let body = Json(json!({
        "error": {
            "code": "INTERNAL_ERROR",
            "message": "Server error",
        }
    }));

    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}
