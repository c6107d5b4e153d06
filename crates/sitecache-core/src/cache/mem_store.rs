//! In-memory cache storage for tests and ephemeral embedding.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{Request, Response};

use super::{CacheError, CacheStorage};

type BucketMap = HashMap<String, HashMap<String, Response>>;

/// In-memory [`CacheStorage`]. Nothing is persisted.
///
/// Clones share the same underlying buckets, so a test can hold one handle
/// while the worker owns another.
#[derive(Clone, Default)]
pub struct MemCacheStorage {
    buckets: Arc<RwLock<BucketMap>>,
}

impl MemCacheStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently stored in `bucket`, if it exists.
    pub async fn entry_count(&self, bucket: &str) -> Option<usize> {
        self.buckets.read().await.get(bucket).map(|b| b.len())
    }
}

#[async_trait]
impl CacheStorage for MemCacheStorage {
    async fn open(&self, bucket: &str) -> Result<(), CacheError> {
        self.buckets
            .write()
            .await
            .entry(bucket.to_string())
            .or_default();
        Ok(())
    }

    async fn put(
        &self,
        bucket: &str,
        request: &Request,
        response: &Response,
    ) -> Result<(), CacheError> {
        self.buckets
            .write()
            .await
            .entry(bucket.to_string())
            .or_default()
            .insert(request.cache_key(), response.clone());
        Ok(())
    }

    async fn lookup(
        &self,
        bucket: &str,
        request: &Request,
    ) -> Result<Option<Response>, CacheError> {
        Ok(self
            .buckets
            .read()
            .await
            .get(bucket)
            .and_then(|entries| entries.get(&request.cache_key()))
            .cloned())
    }

    async fn bucket_names(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.buckets.read().await.keys().cloned().collect())
    }

    async fn delete(&self, bucket: &str) -> Result<bool, CacheError> {
        Ok(self.buckets.write().await.remove(bucket).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_creates_empty_bucket() {
        let store = MemCacheStorage::new();
        store.open("v1").await.unwrap();
        assert_eq!(store.entry_count("v1").await, Some(0));
        assert_eq!(store.entry_count("v2").await, None);
    }

    #[tokio::test]
    async fn put_replaces_existing_snapshot() {
        let store = MemCacheStorage::new();
        let request = Request::get("./index.html");

        store.put("v1", &request, &Response::ok("old")).await.unwrap();
        store.put("v1", &request, &Response::ok("new")).await.unwrap();

        let found = store.lookup("v1", &request).await.unwrap().unwrap();
        assert_eq!(found.body, b"new");
        assert_eq!(store.entry_count("v1").await, Some(1));
    }

    #[tokio::test]
    async fn lookup_is_scoped_to_the_named_bucket() {
        let store = MemCacheStorage::new();
        let request = Request::get("./app.js");
        store.put("v1", &request, &Response::ok("js")).await.unwrap();

        assert!(store.lookup("v1", &request).await.unwrap().is_some());
        assert!(store.lookup("v2", &request).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = MemCacheStorage::new();
        let handle = store.clone();
        store.open("v1").await.unwrap();
        assert_eq!(handle.entry_count("v1").await, Some(0));
    }
}
