//! Follow service.

use sea_orm::Set;
use yatube_common::{AppResult, IdGenerator};
use yatube_db::{
    entities::follow,
    repositories::{FollowRepository, UserRepository},
};

/// Follow service for business logic.
#[derive(Clone)]
pub struct FollowService {
    follow_repo: FollowRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl FollowService {
    /// Create a new follow service.
    #[must_use]
    pub fn new(follow_repo: FollowRepository, user_repo: UserRepository) -> Self {
        Self {
            follow_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Follow an author by username.
    ///
    /// Self-follows and already-existing edges are no-ops, not errors.
    /// Unknown usernames are a not-found error.
    pub async fn follow(&self, follower_id: &str, username: &str) -> AppResult<()> {
        let followee = self.user_repo.get_by_username(username).await?;

        if follower_id == followee.id {
            tracing::debug!(user_id = %follower_id, "Ignoring self-follow");
            return Ok(());
        }

        if self
            .follow_repo
            .is_following(follower_id, &followee.id)
            .await?
        {
            return Ok(());
        }

        let model = follow::ActiveModel {
            id: Set(self.id_gen.generate()),
            follower_id: Set(follower_id.to_string()),
            followee_id: Set(followee.id.clone()),
            ..Default::default()
        };

        self.follow_repo.create(model).await?;
        tracing::info!(follower_id = %follower_id, followee_id = %followee.id, "Created follow edge");
        Ok(())
    }

    /// Unfollow an author by username. A missing edge is a no-op.
    pub async fn unfollow(&self, follower_id: &str, username: &str) -> AppResult<()> {
        let followee = self.user_repo.get_by_username(username).await?;

        self.follow_repo
            .delete_by_pair(follower_id, &followee.id)
            .await
    }

    /// Check if a user follows an author.
    pub async fn is_following(&self, follower_id: &str, followee_id: &str) -> AppResult<bool> {
        self.follow_repo.is_following(follower_id, followee_id).await
    }

    /// Number of followers an author has.
    pub async fn count_followers(&self, followee_id: &str) -> AppResult<u64> {
        self.follow_repo.count_followers(followee_id).await
    }

    /// Number of authors a user follows.
    pub async fn count_following(&self, follower_id: &str) -> AppResult<u64> {
        self.follow_repo.count_following(follower_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;
    use yatube_db::entities::user;

    fn create_test_user(id: &str, username: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: username.to_string(),
            username_lower: username.to_lowercase(),
            password_hash: "$argon2id$test".to_string(),
            token: None,
            name: None,
            created_at: Utc::now().into(),
        }
    }

    fn create_test_follow(id: &str, follower_id: &str, followee_id: &str) -> follow::Model {
        follow::Model {
            id: id.to_string(),
            follower_id: follower_id.to_string(),
            followee_id: followee_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_self_follow_is_a_noop() {
        let user = create_test_user("u1", "author1");

        // Only the username lookup runs; no edge is inserted.
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user.clone()]])
                .into_connection(),
        );

        let service = FollowService::new(
            FollowRepository::new(Arc::clone(&db)),
            UserRepository::new(db),
        );

        assert!(service.follow("u1", "author1").await.is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_follow_is_a_noop() {
        let followee = create_test_user("u2", "author2");
        let existing = create_test_follow("f1", "u1", "u2");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[followee.clone()]])
                .append_query_results([[existing.clone()]])
                .into_connection(),
        );

        let service = FollowService::new(
            FollowRepository::new(Arc::clone(&db)),
            UserRepository::new(db),
        );

        assert!(service.follow("u1", "author2").await.is_ok());
    }

    #[tokio::test]
    async fn test_follow_unknown_username_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );

        let service = FollowService::new(
            FollowRepository::new(Arc::clone(&db)),
            UserRepository::new(db),
        );
        let result = service.follow("u1", "ghost").await;

        assert!(matches!(
            result,
            Err(yatube_common::AppError::UserNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_unfollow_missing_edge_is_a_noop() {
        let followee = create_test_user("u2", "author2");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[followee.clone()]])
                .append_query_results([Vec::<follow::Model>::new()])
                .into_connection(),
        );

        let service = FollowService::new(
            FollowRepository::new(Arc::clone(&db)),
            UserRepository::new(db),
        );

        assert!(service.unfollow("u1", "author2").await.is_ok());
    }

    #[tokio::test]
    async fn test_unfollow_removes_existing_edge() {
        let followee = create_test_user("u2", "author2");
        let existing = create_test_follow("f1", "u1", "u2");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[followee.clone()]])
                .append_query_results([[existing.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let service = FollowService::new(
            FollowRepository::new(Arc::clone(&db)),
            UserRepository::new(db),
        );

        assert!(service.unfollow("u1", "author2").await.is_ok());
    }
}
