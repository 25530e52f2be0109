//! Feed endpoints: global feed and followed-authors feed.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use yatube_common::AppResult;

use crate::{
    extractors::MaybeAuthUser,
    middleware::AppState,
    response::{FeedPageResponse, login_redirect},
};

/// Page selection, 1-based. Out-of-range values clip to the last page.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u64,
}

const fn default_page() -> u64 {
    1
}

/// Global feed: all posts, newest first.
pub async fn global_feed(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<FeedPageResponse>> {
    let feed = state.post_service.global_feed(query.page).await?;
    Ok(Json(feed.into()))
}

/// Feed of posts by followed authors. Requires authentication.
pub async fn followed_feed(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Response> {
    let Some(user) = user else {
        return Ok(login_redirect("/follow/"));
    };

    let feed = state.post_service.followed_feed(&user.id, query.page).await?;
    Ok(Json(FeedPageResponse::from(feed)).into_response())
}
