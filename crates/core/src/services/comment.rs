//! Comment service.

use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;
use yatube_common::{AppResult, IdGenerator};
use yatube_db::{
    entities::comment,
    repositories::{CommentRepository, PostRepository},
};

/// Comment service for business logic.
#[derive(Clone)]
pub struct CommentService {
    comment_repo: CommentRepository,
    post_repo: PostRepository,
    id_gen: IdGenerator,
}

/// Input for adding a comment.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentInput {
    #[validate(length(min = 1, max = 3000))]
    pub text: String,
}

impl CommentService {
    /// Create a new comment service.
    #[must_use]
    pub fn new(comment_repo: CommentRepository, post_repo: PostRepository) -> Self {
        Self {
            comment_repo,
            post_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Attach a comment to a post. The post must exist; the comment is
    /// stamped with the current time and the acting user.
    pub async fn add_comment(
        &self,
        author_id: &str,
        post_id: &str,
        input: CreateCommentInput,
    ) -> AppResult<comment::Model> {
        input.validate()?;

        // Unknown post is a not-found error, not a dangling comment.
        let post = self.post_repo.get_by_id(post_id).await?;

        let model = comment::ActiveModel {
            id: Set(self.id_gen.generate()),
            text: Set(input.text),
            post_id: Set(post.id),
            author_id: Set(author_id.to_string()),
            ..Default::default()
        };

        let comment = self.comment_repo.create(model).await?;
        tracing::debug!(comment_id = %comment.id, post_id = %post_id, "Added comment");
        Ok(comment)
    }

    /// A post's comments, oldest first.
    pub async fn list_for_post(&self, post_id: &str) -> AppResult<Vec<comment::Model>> {
        self.comment_repo.find_by_post(post_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;
    use yatube_common::AppError;
    use yatube_db::entities::post;

    #[tokio::test]
    async fn test_add_comment_to_unknown_post_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );

        let service = CommentService::new(
            CommentRepository::new(Arc::clone(&db)),
            PostRepository::new(db),
        );
        let result = service
            .add_comment(
                "u1",
                "missing",
                CreateCommentInput {
                    text: "тестовый комментарий".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::PostNotFound(_))));
    }

    #[tokio::test]
    async fn test_add_comment_rejects_empty_text() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = CommentService::new(
            CommentRepository::new(Arc::clone(&db)),
            PostRepository::new(db),
        );
        let result = service
            .add_comment("u1", "p1", CreateCommentInput { text: String::new() })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_for_post_returns_comments() {
        let c1 = comment::Model {
            id: "c1".to_string(),
            text: "тестовый комментарий".to_string(),
            post_id: "p1".to_string(),
            author_id: "u1".to_string(),
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[c1.clone()]])
                .into_connection(),
        );

        let service = CommentService::new(
            CommentRepository::new(Arc::clone(&db)),
            PostRepository::new(db),
        );
        let comments = service.list_for_post("p1").await.unwrap();

        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].text, "тестовый комментарий");
    }
}
