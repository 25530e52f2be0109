//! API response types.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use yatube_db::entities::{comment, group, post, user};

/// A `302 Found` redirect, the shape browsers get from form flows.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Redirect an anonymous caller into the login flow, preserving the
/// destination in the `next` parameter.
pub fn login_redirect(next: &str) -> Response {
    found(&format!("/auth/login/?next={next}"))
}

/// Post as serialized in feeds and detail pages.
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub text: String,
    pub label: String,
    pub author_id: String,
    pub group_id: Option<String>,
    pub image_url: Option<String>,
    pub created_at: String,
}

impl From<post::Model> for PostResponse {
    fn from(p: post::Model) -> Self {
        Self {
            label: p.display_label(),
            id: p.id,
            text: p.text,
            author_id: p.author_id,
            group_id: p.group_id,
            image_url: p.image_url,
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// Group as serialized in group pages.
#[derive(Debug, Serialize)]
pub struct GroupResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
}

impl From<group::Model> for GroupResponse {
    fn from(g: group::Model) -> Self {
        Self {
            id: g.id,
            title: g.title,
            slug: g.slug,
            description: g.description,
        }
    }
}

/// Comment as serialized on the post detail page.
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub text: String,
    pub author_id: String,
    pub created_at: String,
}

impl From<comment::Model> for CommentResponse {
    fn from(c: comment::Model) -> Self {
        Self {
            id: c.id,
            text: c.text,
            author_id: c.author_id,
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

/// Public view of a user.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub name: Option<String>,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            username: u.username,
            name: u.name,
        }
    }
}

/// One page of a feed.
#[derive(Debug, Serialize)]
pub struct FeedPageResponse {
    pub page: u64,
    pub pages: u64,
    pub total: u64,
    pub posts: Vec<PostResponse>,
}

impl From<yatube_core::FeedPage<post::Model>> for FeedPageResponse {
    fn from(page: yatube_core::FeedPage<post::Model>) -> Self {
        Self {
            page: page.page,
            pages: page.pages,
            total: page.total,
            posts: page.items.into_iter().map(Into::into).collect(),
        }
    }
}
