//! Follow repository.

use std::sync::Arc;

use crate::entities::{Follow, follow};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use yatube_common::{AppError, AppResult};

/// Follow repository for database operations.
#[derive(Clone)]
pub struct FollowRepository {
    db: Arc<DatabaseConnection>,
}

impl FollowRepository {
    /// Create a new follow repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a follow edge by follower and followee.
    pub async fn find_by_pair(
        &self,
        follower_id: &str,
        followee_id: &str,
    ) -> AppResult<Option<follow::Model>> {
        Follow::find()
            .filter(follow::Column::FollowerId.eq(follower_id))
            .filter(follow::Column::FolloweeId.eq(followee_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check if a user is following an author.
    pub async fn is_following(&self, follower_id: &str, followee_id: &str) -> AppResult<bool> {
        Ok(self.find_by_pair(follower_id, followee_id).await?.is_some())
    }

    /// Create a new follow edge.
    pub async fn create(&self, model: follow::ActiveModel) -> AppResult<follow::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a follow edge by pair.
    pub async fn delete_by_pair(&self, follower_id: &str, followee_id: &str) -> AppResult<()> {
        let follow = self.find_by_pair(follower_id, followee_id).await?;
        if let Some(f) = follow {
            f.delete(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        Ok(())
    }

    /// IDs of the authors a user follows.
    pub async fn followee_ids(&self, follower_id: &str) -> AppResult<Vec<String>> {
        let ids = Follow::find()
            .filter(follow::Column::FollowerId.eq(follower_id))
            .order_by_asc(follow::Column::CreatedAt)
            .select_only()
            .column(follow::Column::FolloweeId)
            .into_tuple()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(ids)
    }

    /// Count followers of an author.
    pub async fn count_followers(&self, followee_id: &str) -> AppResult<u64> {
        Follow::find()
            .filter(follow::Column::FolloweeId.eq(followee_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count authors a user follows.
    pub async fn count_following(&self, follower_id: &str) -> AppResult<u64> {
        Follow::find()
            .filter(follow::Column::FollowerId.eq(follower_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_follow(id: &str, follower_id: &str, followee_id: &str) -> follow::Model {
        follow::Model {
            id: id.to_string(),
            follower_id: follower_id.to_string(),
            followee_id: followee_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_pair_found() {
        let follow = create_test_follow("f1", "u1", "u2");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[follow.clone()]])
                .into_connection(),
        );

        let repo = FollowRepository::new(db);
        let result = repo.find_by_pair("u1", "u2").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().followee_id, "u2");
    }

    #[tokio::test]
    async fn test_is_following_false_when_absent() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<follow::Model>::new()])
                .into_connection(),
        );

        let repo = FollowRepository::new(db);
        assert!(!repo.is_following("u1", "u3").await.unwrap());
    }

    #[tokio::test]
    async fn test_is_following_true_when_present() {
        let follow = create_test_follow("f1", "u1", "u2");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[follow.clone()]])
                .into_connection(),
        );

        let repo = FollowRepository::new(db);
        assert!(repo.is_following("u1", "u2").await.unwrap());
    }

    #[tokio::test]
    async fn test_count_followers() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(3))
                }]])
                .into_connection(),
        );

        let repo = FollowRepository::new(db);
        assert_eq!(repo.count_followers("u2").await.unwrap(), 3);
    }
}
