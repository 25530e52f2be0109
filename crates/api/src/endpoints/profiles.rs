//! Profile endpoints: author feed and follow/unfollow.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Response,
};
use serde::Serialize;
use yatube_common::AppResult;

use crate::{
    endpoints::PageQuery,
    extractors::MaybeAuthUser,
    middleware::AppState,
    response::{FeedPageResponse, UserResponse, found, login_redirect},
};

/// Profile page: the author, follow stats, and their posts.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub author: UserResponse,
    pub followers: u64,
    pub following: u64,
    /// Whether the viewer follows this author. Absent for anonymous viewers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_following: Option<bool>,
    #[serde(flatten)]
    pub feed: FeedPageResponse,
}

/// An author's profile with their posts. Unknown username is a 404.
pub async fn profile(
    MaybeAuthUser(viewer): MaybeAuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ProfileResponse>> {
    let (author, feed) = state.post_service.author_feed(&username, query.page).await?;

    let followers = state.follow_service.count_followers(&author.id).await?;
    let following = state.follow_service.count_following(&author.id).await?;

    let is_following = match viewer {
        Some(viewer) => Some(
            state
                .follow_service
                .is_following(&viewer.id, &author.id)
                .await?,
        ),
        None => None,
    };

    Ok(Json(ProfileResponse {
        author: author.into(),
        followers,
        following,
        is_following,
        feed: feed.into(),
    }))
}

/// Follow an author, then return to their profile.
pub async fn follow(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Response> {
    let Some(user) = user else {
        return Ok(login_redirect(&format!("/profile/{username}/follow/")));
    };

    state.follow_service.follow(&user.id, &username).await?;
    Ok(found(&format!("/profile/{username}/")))
}

/// Unfollow an author, then return to their profile.
pub async fn unfollow(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Response> {
    let Some(user) = user else {
        return Ok(login_redirect(&format!("/profile/{username}/unfollow/")));
    };

    state.follow_service.unfollow(&user.id, &username).await?;
    Ok(found(&format!("/profile/{username}/")))
}
