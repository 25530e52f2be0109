//! Group feed endpoint.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use yatube_common::AppResult;

use crate::{
    endpoints::PageQuery,
    middleware::AppState,
    response::{FeedPageResponse, GroupResponse},
};

/// Group page: the group and its posts.
#[derive(Debug, Serialize)]
pub struct GroupFeedResponse {
    pub group: GroupResponse,
    #[serde(flatten)]
    pub feed: FeedPageResponse,
}

/// Posts filed under a group. Unknown slug is a 404.
pub async fn group_feed(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<GroupFeedResponse>> {
    let (group, feed) = state.post_service.group_feed(&slug, query.page).await?;

    Ok(Json(GroupFeedResponse {
        group: group.into(),
        feed: feed.into(),
    }))
}
