//! Post service: creation, editing, and feed composition.

use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;
use yatube_common::{AppError, AppResult, IdGenerator};
use yatube_db::{
    entities::{comment, group, post, user},
    repositories::{
        CommentRepository, FeedScope, FollowRepository, GroupRepository, PostRepository,
        UserRepository,
    },
};

use crate::pagination::{FeedPage, Paginator};

/// Post service for business logic.
#[derive(Clone)]
pub struct PostService {
    post_repo: PostRepository,
    user_repo: UserRepository,
    group_repo: GroupRepository,
    follow_repo: FollowRepository,
    comment_repo: CommentRepository,
    paginator: Paginator,
    id_gen: IdGenerator,
}

/// Input for creating a new post.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostInput {
    #[validate(length(min = 1, max = 10000))]
    pub text: String,

    /// Group to file the post under, if any.
    pub group_id: Option<String>,

    /// Stored image reference, if any.
    #[validate(length(max = 1024))]
    pub image_url: Option<String>,
}

/// Input for editing a post. Replaces text, group, and image;
/// the publication timestamp is never touched.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostInput {
    #[validate(length(min = 1, max = 10000))]
    pub text: String,

    pub group_id: Option<String>,

    #[validate(length(max = 1024))]
    pub image_url: Option<String>,
}

/// A post with its author and attached comments, for the detail page.
pub struct PostDetail {
    pub post: post::Model,
    pub author: user::Model,
    pub comments: Vec<comment::Model>,
}

impl PostService {
    /// Create a new post service.
    #[must_use]
    pub fn new(
        post_repo: PostRepository,
        user_repo: UserRepository,
        group_repo: GroupRepository,
        follow_repo: FollowRepository,
        comment_repo: CommentRepository,
        page_size: u64,
    ) -> Self {
        Self {
            post_repo,
            user_repo,
            group_repo,
            follow_repo,
            comment_repo,
            paginator: Paginator::new(page_size),
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new post authored by `author_id`.
    pub async fn create(&self, author_id: &str, input: CreatePostInput) -> AppResult<post::Model> {
        input.validate()?;

        if let Some(ref group_id) = input.group_id
            && self.group_repo.find_by_id(group_id).await?.is_none()
        {
            return Err(AppError::BadRequest(format!("Unknown group: {group_id}")));
        }

        let model = post::ActiveModel {
            id: Set(self.id_gen.generate()),
            text: Set(input.text),
            author_id: Set(author_id.to_string()),
            group_id: Set(input.group_id),
            image_url: Set(input.image_url),
            ..Default::default()
        };

        let post = self.post_repo.create(model).await?;
        tracing::info!(post_id = %post.id, author_id = %author_id, "Created post");
        Ok(post)
    }

    /// Edit a post. Only the author may edit; the publication timestamp
    /// stays as it was.
    pub async fn edit(
        &self,
        actor_id: &str,
        post_id: &str,
        input: UpdatePostInput,
    ) -> AppResult<post::Model> {
        input.validate()?;

        let post = self.post_repo.get_by_id(post_id).await?;
        if post.author_id != actor_id {
            return Err(AppError::Forbidden(
                "Only the author can edit a post".to_string(),
            ));
        }

        if let Some(ref group_id) = input.group_id
            && self.group_repo.find_by_id(group_id).await?.is_none()
        {
            return Err(AppError::BadRequest(format!("Unknown group: {group_id}")));
        }

        let mut model: post::ActiveModel = post.into();
        model.text = Set(input.text);
        model.group_id = Set(input.group_id);
        model.image_url = Set(input.image_url);

        self.post_repo.update(model).await
    }

    /// Get a post by ID.
    pub async fn get(&self, post_id: &str) -> AppResult<post::Model> {
        self.post_repo.get_by_id(post_id).await
    }

    /// Post detail: the post, its author, and its comments (oldest first).
    pub async fn detail(&self, post_id: &str) -> AppResult<PostDetail> {
        let post = self.post_repo.get_by_id(post_id).await?;
        let author = self.user_repo.get_by_id(&post.author_id).await?;
        let comments = self.comment_repo.find_by_post(post_id).await?;

        Ok(PostDetail {
            post,
            author,
            comments,
        })
    }

    /// Global feed: all posts, newest first.
    pub async fn global_feed(&self, page: u64) -> AppResult<FeedPage<post::Model>> {
        self.fetch(&FeedScope::Global, page).await
    }

    /// Group feed. Unknown slug is a not-found error.
    pub async fn group_feed(
        &self,
        slug: &str,
        page: u64,
    ) -> AppResult<(group::Model, FeedPage<post::Model>)> {
        let group = self.group_repo.get_by_slug(slug).await?;
        let feed = self.fetch(&FeedScope::Group(group.id.clone()), page).await?;
        Ok((group, feed))
    }

    /// Author feed. Unknown username is a not-found error.
    pub async fn author_feed(
        &self,
        username: &str,
        page: u64,
    ) -> AppResult<(user::Model, FeedPage<post::Model>)> {
        let author = self.user_repo.get_by_username(username).await?;
        let feed = self
            .fetch(&FeedScope::Author(author.id.clone()), page)
            .await?;
        Ok((author, feed))
    }

    /// Feed of posts by the authors `user_id` follows. Own posts are not
    /// included. Follow-edge changes show up immediately.
    pub async fn followed_feed(
        &self,
        user_id: &str,
        page: u64,
    ) -> AppResult<FeedPage<post::Model>> {
        let followee_ids = self.follow_repo.followee_ids(user_id).await?;
        self.fetch(&FeedScope::Authors(followee_ids), page).await
    }

    async fn fetch(&self, scope: &FeedScope, requested: u64) -> AppResult<FeedPage<post::Model>> {
        let total = self.post_repo.count(scope).await?;
        let page = self.paginator.resolve(requested, total);
        let items = self
            .post_repo
            .find_page(scope, self.paginator.page_size(), self.paginator.offset(page))
            .await?;

        Ok(self.paginator.assemble(requested, total, items))
    }
}
