//! Post repository.

use std::sync::Arc;

use crate::entities::{Post, post};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};
use yatube_common::{AppError, AppResult};

/// Which slice of the post table a feed draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedScope {
    /// All posts.
    Global,
    /// Posts in a group (by group ID).
    Group(String),
    /// Posts by an author (by user ID).
    Author(String),
    /// Posts by any of the given authors (followed-feed source).
    Authors(Vec<String>),
}

/// Post repository for database operations.
#[derive(Clone)]
pub struct PostRepository {
    db: Arc<DatabaseConnection>,
}

impl PostRepository {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a post by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<post::Model>> {
        Post::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a post by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<post::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::PostNotFound(id.to_string()))
    }

    /// Create a new post.
    pub async fn create(&self, model: post::ActiveModel) -> AppResult<post::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a post.
    pub async fn update(&self, model: post::ActiveModel) -> AppResult<post::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a post.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Post::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    fn scoped(scope: &FeedScope) -> Select<Post> {
        let query = Post::find();
        match scope {
            FeedScope::Global => query,
            FeedScope::Group(group_id) => query.filter(post::Column::GroupId.eq(group_id)),
            FeedScope::Author(author_id) => query.filter(post::Column::AuthorId.eq(author_id)),
            FeedScope::Authors(ids) => query.filter(post::Column::AuthorId.is_in(ids.clone())),
        }
    }

    /// Count posts in a feed scope.
    pub async fn count(&self, scope: &FeedScope) -> AppResult<u64> {
        if matches!(scope, FeedScope::Authors(ids) if ids.is_empty()) {
            return Ok(0);
        }

        Self::scoped(scope)
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Fetch one feed page, newest first.
    pub async fn find_page(
        &self,
        scope: &FeedScope,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<post::Model>> {
        if matches!(scope, FeedScope::Authors(ids) if ids.is_empty()) {
            return Ok(vec![]);
        }

        Self::scoped(scope)
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
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

    fn create_test_post(id: &str, author_id: &str, text: &str) -> post::Model {
        post::Model {
            id: id.to_string(),
            text: text.to_string(),
            author_id: author_id.to_string(),
            group_id: None,
            image_url: None,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo.get_by_id("missing").await;

        assert!(matches!(result, Err(AppError::PostNotFound(_))));
    }

    #[tokio::test]
    async fn test_count_global_scope() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(13))
                }]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let total = repo.count(&FeedScope::Global).await.unwrap();

        assert_eq!(total, 13);
    }

    #[tokio::test]
    async fn test_find_page_returns_rows() {
        let p1 = create_test_post("p2", "u1", "второй пост");
        let p2 = create_test_post("p1", "u1", "первый пост");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[p1.clone(), p2.clone()]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let page = repo.find_page(&FeedScope::Global, 10, 0).await.unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page[0].id, "p2");
    }

    #[tokio::test]
    async fn test_empty_author_list_short_circuits() {
        // No query results appended: hitting the database would error.
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = PostRepository::new(db);
        let scope = FeedScope::Authors(vec![]);

        assert_eq!(repo.count(&scope).await.unwrap(), 0);
        assert!(repo.find_page(&scope, 10, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_page_group_scope() {
        let p1 = create_test_post("p1", "u1", "пост в группе");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[p1.clone()]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let page = repo
            .find_page(&FeedScope::Group("g1".to_string()), 10, 0)
            .await
            .unwrap();

        assert_eq!(page.len(), 1);
    }
}
