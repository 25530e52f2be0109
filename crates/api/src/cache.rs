//! Home-feed page caching middleware.
//!
//! Wraps the global feed route. Successful GET responses are buffered and
//! stored for the configured window; while the window lasts, every request
//! for the same path is answered with the stored bytes. A post created in
//! the meantime does not show up until the window expires or the cache is
//! cleared.

use axum::{
    body::{Body, to_bytes},
    extract::State,
    http::{Method, Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::middleware::AppState;

/// Cached pages are rendered JSON.
const CONTENT_TYPE: &str = "application/json";

/// Page-cache middleware for feed routes.
pub async fn page_cache_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if req.method() != Method::GET {
        return next.run(req).await;
    }

    // Key on path plus query so each feed page caches separately.
    let key = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.uri().path().to_string(), ToString::to_string);

    match state.page_cache.lookup(&key).await {
        Ok(Some(body)) => {
            return ([(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response();
        }
        Ok(None) => {}
        Err(e) => warn!(error = %e, key = %key, "Page cache lookup failed"),
    }

    let response = next.run(req).await;
    if response.status() != StatusCode::OK {
        return response;
    }

    let (parts, body) = response.into_parts();
    match to_bytes(body, usize::MAX).await {
        Ok(bytes) => {
            if let Err(e) = state.page_cache.store(&key, &bytes).await {
                warn!(error = %e, key = %key, "Page cache store failed");
            }
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            warn!(error = %e, key = %key, "Failed to buffer response body");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
