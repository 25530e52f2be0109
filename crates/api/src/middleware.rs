//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use yatube_common::page_cache::PageCache;
use yatube_core::{CommentService, FollowService, GroupService, PostService, UserService};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub post_service: PostService,
    pub group_service: GroupService,
    pub comment_service: CommentService,
    pub follow_service: FollowService,
    pub page_cache: PageCache,
}

/// Authentication middleware.
///
/// Resolves the acting user from the `Authorization: Bearer` header and
/// stores it in request extensions for the extractors. Requests without a
/// valid token simply proceed anonymous.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(user) = state.user_service.authenticate_by_token(token).await
    {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}
