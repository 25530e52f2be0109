//! Post endpoints: detail, create, edit, and comments.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use yatube_common::AppResult;
use yatube_core::{CreateCommentInput, CreatePostInput, UpdatePostInput};

use crate::{
    extractors::MaybeAuthUser,
    middleware::AppState,
    response::{CommentResponse, GroupResponse, PostResponse, UserResponse, found, login_redirect},
};

/// Post detail page: the post, its author, and its comments.
#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    pub post: PostResponse,
    pub author: UserResponse,
    pub comments: Vec<CommentResponse>,
}

/// A post with its comments. Unknown ID is a 404.
pub async fn post_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<PostDetailResponse>> {
    let detail = state.post_service.detail(&id).await?;

    Ok(Json(PostDetailResponse {
        post: detail.post.into(),
        author: detail.author.into(),
        comments: detail.comments.into_iter().map(Into::into).collect(),
    }))
}

/// Data backing the new-post form: the groups a post can be filed under.
#[derive(Debug, Serialize)]
pub struct PostFormResponse {
    pub groups: Vec<GroupResponse>,
}

/// New-post form data. Anonymous callers are sent to login.
pub async fn new_post_form(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
) -> AppResult<Response> {
    if user.is_none() {
        return Ok(login_redirect("/create/"));
    }

    let groups = state.group_service.list().await?;
    Ok(Json(PostFormResponse {
        groups: groups.into_iter().map(Into::into).collect(),
    })
    .into_response())
}

/// New post submission.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub text: String,
    pub group_id: Option<String>,
    pub image_url: Option<String>,
}

/// Create a post. Anonymous callers are redirected to login and nothing
/// is written.
pub async fn create_post(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreatePostRequest>,
) -> AppResult<Response> {
    let Some(user) = user else {
        return Ok(login_redirect("/create/"));
    };

    let post = state
        .post_service
        .create(
            &user.id,
            CreatePostInput {
                text: req.text,
                group_id: req.group_id,
                image_url: req.image_url,
            },
        )
        .await?;

    Ok(Json(PostResponse::from(post)).into_response())
}

/// Edit form data: the post being edited plus the selectable groups.
#[derive(Debug, Serialize)]
pub struct EditFormResponse {
    pub post: PostResponse,
    pub groups: Vec<GroupResponse>,
}

/// Edit form for a post. Anonymous callers are sent to login; non-authors
/// are sent to the post's detail page instead of the form.
pub async fn edit_post_form(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Some(user) = user else {
        return Ok(login_redirect(&format!("/posts/{id}/edit/")));
    };

    let post = state.post_service.get(&id).await?;
    if post.author_id != user.id {
        return Ok(found(&format!("/posts/{id}/")));
    }

    let groups = state.group_service.list().await?;
    Ok(Json(EditFormResponse {
        post: post.into(),
        groups: groups.into_iter().map(Into::into).collect(),
    })
    .into_response())
}

/// Edit submission. Replaces text, group, and image; the publication
/// timestamp stays as it was.
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub text: String,
    pub group_id: Option<String>,
    pub image_url: Option<String>,
}

/// Apply an edit. Same gating as the form: anonymous to login,
/// non-authors to the detail page.
pub async fn edit_post(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdatePostRequest>,
) -> AppResult<Response> {
    let Some(user) = user else {
        return Ok(login_redirect(&format!("/posts/{id}/edit/")));
    };

    let post = state.post_service.get(&id).await?;
    if post.author_id != user.id {
        return Ok(found(&format!("/posts/{id}/")));
    }

    let post = state
        .post_service
        .edit(
            &user.id,
            &id,
            UpdatePostInput {
                text: req.text,
                group_id: req.group_id,
                image_url: req.image_url,
            },
        )
        .await?;

    Ok(Json(PostResponse::from(post)).into_response())
}

/// Comment submission.
#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

/// Attach a comment, then return to the post. Anonymous callers are
/// redirected to login and no comment is written.
pub async fn add_comment(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CommentRequest>,
) -> AppResult<Response> {
    let Some(user) = user else {
        return Ok(login_redirect(&format!("/posts/{id}/comment/")));
    };

    state
        .comment_service
        .add_comment(&user.id, &id, CreateCommentInput { text: req.text })
        .await?;

    Ok(found(&format!("/posts/{id}/")))
}
