//! Page caching for rendered feed responses.
//!
//! Stores whole response bodies keyed by request path for a fixed time
//! window. Within the window every request reads the same cached bytes;
//! invalidation is either TTL expiry or an explicit [`PageCache::clear`].
//! New content written during the window does not show up until one of
//! those happens.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use yatube_common::page_cache::{MemoryPageStore, PageCache};
//!
//! let cache = PageCache::new(Arc::new(MemoryPageStore::new()), Duration::from_secs(20));
//!
//! if let Some(body) = cache.lookup("/").await? {
//!     // Serve cached bytes
//! } else {
//!     let body = render_feed().await;
//!     cache.store("/", &body).await?;
//! }
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use fred::clients::Client as RedisClient;
use fred::interfaces::{KeysInterface, SetsInterface};
use fred::types::Expiration;
use tokio::time::Instant;
use tracing::debug;

use crate::{AppError, AppResult};

/// Key prefix for all cached pages.
const KEY_PREFIX: &str = "page_cache";

/// Redis set tracking the currently cached page keys, for `clear`.
const KEY_INDEX: &str = "page_cache_keys";

/// Storage backend for cached pages.
#[async_trait::async_trait]
pub trait PageStore: Send + Sync {
    /// Fetch a cached body, if present and not expired.
    async fn get(&self, key: &str) -> AppResult<Option<Vec<u8>>>;

    /// Store a body under `key` for `ttl`.
    async fn set(&self, key: &str, body: &[u8], ttl: Duration) -> AppResult<()>;

    /// Drop every cached page.
    async fn clear(&self) -> AppResult<()>;
}

/// Page cache front-end over a [`PageStore`].
#[derive(Clone)]
pub struct PageCache {
    store: Arc<dyn PageStore>,
    ttl: Duration,
}

impl PageCache {
    /// Create a new page cache with the given store and time window.
    #[must_use]
    pub fn new(store: Arc<dyn PageStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Cache key for a request path.
    fn cache_key(path: &str) -> String {
        format!("{KEY_PREFIX}:{path}")
    }

    /// Look up the cached body for a request path.
    pub async fn lookup(&self, path: &str) -> AppResult<Option<Vec<u8>>> {
        let body = self.store.get(&Self::cache_key(path)).await?;
        if body.is_some() {
            debug!(path = %path, "Page cache hit");
        } else {
            debug!(path = %path, "Page cache miss");
        }
        Ok(body)
    }

    /// Store the rendered body for a request path.
    pub async fn store(&self, path: &str, body: &[u8]) -> AppResult<()> {
        self.store.set(&Self::cache_key(path), body, self.ttl).await
    }

    /// Drop every cached page immediately.
    pub async fn clear(&self) -> AppResult<()> {
        self.store.clear().await
    }

    /// The configured time window.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }
}

/// Redis-backed page store.
///
/// Cached keys are additionally tracked in a Redis set so `clear` can
/// drop them without a `SCAN` over the whole keyspace.
#[derive(Clone)]
pub struct RedisPageStore {
    redis: Arc<RedisClient>,
    prefix: String,
}

impl RedisPageStore {
    /// Create a new Redis page store. `prefix` namespaces the keys per
    /// instance (matches `redis.prefix` in the configuration).
    #[must_use]
    pub fn new(redis: Arc<RedisClient>, prefix: impl Into<String>) -> Self {
        Self {
            redis,
            prefix: prefix.into(),
        }
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:{key}", self.prefix)
    }
}

#[async_trait::async_trait]
impl PageStore for RedisPageStore {
    async fn get(&self, key: &str) -> AppResult<Option<Vec<u8>>> {
        self.redis
            .get(self.namespaced(key))
            .await
            .map_err(|e| AppError::Cache(e.to_string()))
    }

    async fn set(&self, key: &str, body: &[u8], ttl: Duration) -> AppResult<()> {
        let key = self.namespaced(key);

        self.redis
            .set::<(), _, _>(
                key.clone(),
                body.to_vec(),
                Some(Expiration::EX(ttl.as_secs() as i64)),
                None,
                false,
            )
            .await
            .map_err(|e| AppError::Cache(e.to_string()))?;

        self.redis
            .sadd::<(), _, _>(self.namespaced(KEY_INDEX), key)
            .await
            .map_err(|e| AppError::Cache(e.to_string()))
    }

    async fn clear(&self) -> AppResult<()> {
        let index = self.namespaced(KEY_INDEX);

        let keys: Vec<String> = self
            .redis
            .smembers(index.clone())
            .await
            .map_err(|e| AppError::Cache(e.to_string()))?;

        if !keys.is_empty() {
            self.redis
                .del::<(), _>(keys)
                .await
                .map_err(|e| AppError::Cache(e.to_string()))?;
        }

        self.redis
            .del::<(), _>(index)
            .await
            .map_err(|e| AppError::Cache(e.to_string()))
    }
}

/// In-process page store with deadline-based expiry.
///
/// Used for tests and redis-less deployments.
#[derive(Default)]
pub struct MemoryPageStore {
    pages: Mutex<HashMap<String, (Instant, Vec<u8>)>>,
}

impl MemoryPageStore {
    /// Create an empty memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, HashMap<String, (Instant, Vec<u8>)>>> {
        self.pages
            .lock()
            .map_err(|_| AppError::Cache("page store lock poisoned".to_string()))
    }
}

#[async_trait::async_trait]
impl PageStore for MemoryPageStore {
    async fn get(&self, key: &str) -> AppResult<Option<Vec<u8>>> {
        let mut pages = self.lock()?;

        match pages.get(key) {
            Some((deadline, body)) if *deadline > Instant::now() => Ok(Some(body.clone())),
            Some(_) => {
                // Expired entry, drop it on the way out.
                pages.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, body: &[u8], ttl: Duration) -> AppResult<()> {
        let deadline = Instant::now() + ttl;
        self.lock()?
            .insert(key.to_string(), (deadline, body.to_vec()));
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        self.lock()?.clear();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_generation() {
        assert_eq!(PageCache::cache_key("/"), "page_cache:/");
        assert_eq!(
            PageCache::cache_key("/group/test-slug/"),
            "page_cache:/group/test-slug/"
        );
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryPageStore::new();

        store
            .set("page_cache:/", b"feed body", Duration::from_secs(20))
            .await
            .unwrap();

        let body = store.get("page_cache:/").await.unwrap();
        assert_eq!(body.as_deref(), Some(b"feed body".as_slice()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_memory_store_expires_after_ttl() {
        let store = MemoryPageStore::new();

        store
            .set("page_cache:/", b"feed body", Duration::from_secs(20))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(19)).await;
        assert!(store.get("page_cache:/").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(store.get("page_cache:/").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_clear() {
        let store = MemoryPageStore::new();

        store
            .set("page_cache:/", b"feed body", Duration::from_secs(20))
            .await
            .unwrap();
        store.clear().await.unwrap();

        assert!(store.get("page_cache:/").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_page_cache_lookup_and_clear() {
        let cache = PageCache::new(Arc::new(MemoryPageStore::new()), Duration::from_secs(20));

        assert!(cache.lookup("/").await.unwrap().is_none());

        cache.store("/", b"rendered").await.unwrap();
        assert_eq!(
            cache.lookup("/").await.unwrap().as_deref(),
            Some(b"rendered".as_slice())
        );

        cache.clear().await.unwrap();
        assert!(cache.lookup("/").await.unwrap().is_none());
    }
}
