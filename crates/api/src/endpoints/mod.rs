//! API endpoints.

mod auth;
mod feed;
mod groups;
mod posts;
mod profiles;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::{cache, fallback, middleware::AppState};

pub(crate) use feed::PageQuery;

/// Create the application router.
pub fn router(state: AppState) -> Router {
    // Only the global feed sits behind the page cache.
    let cached = Router::new()
        .route("/", get(feed::global_feed))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            cache::page_cache_middleware,
        ));

    Router::new()
        .merge(cached)
        .route("/follow/", get(feed::followed_feed))
        .route("/group/{slug}/", get(groups::group_feed))
        .route("/profile/{username}/", get(profiles::profile))
        .route("/profile/{username}/follow/", post(profiles::follow))
        .route("/profile/{username}/unfollow/", post(profiles::unfollow))
        .route("/create/", get(posts::new_post_form).post(posts::create_post))
        .route("/posts/{id}/", get(posts::post_detail))
        .route(
            "/posts/{id}/edit/",
            get(posts::edit_post_form).post(posts::edit_post),
        )
        .route("/posts/{id}/comment/", post(posts::add_comment))
        .merge(auth::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth_middleware,
        ))
        .layer(CatchPanicLayer::custom(fallback::panic_response))
        .fallback(fallback::not_found)
        .with_state(state)
}
