//! Filesystem-backed cache storage.
//!
//! Layout: one directory per bucket under the store root, one JSON file per
//! entry. Entry files are named by the SHA-256 hex digest of the cache key
//! so arbitrary URLs map to stable, filesystem-safe names. Body bytes are
//! base64-encoded inside the record.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::models::{Request, Response};

use super::{CacheError, CacheStorage};

/// On-disk record for one cache entry. The original request identity is
/// kept alongside the snapshot so a bucket can be audited by hand.
#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    method: String,
    url: String,
    status: u16,
    headers: Vec<(String, String)>,
    body_b64: String,
    stored_at: DateTime<Utc>,
}

impl StoredEntry {
    fn new(request: &Request, response: &Response) -> Self {
        Self {
            method: request.method.clone(),
            url: request.url.clone(),
            status: response.status,
            headers: response.headers.clone(),
            body_b64: BASE64.encode(&response.body),
            stored_at: Utc::now(),
        }
    }

    fn into_response(self, path: &Path) -> Result<Response, CacheError> {
        let body = BASE64
            .decode(&self.body_b64)
            .map_err(|e| CacheError::CorruptEntry {
                path: path.display().to_string(),
                reason: format!("invalid body encoding: {}", e),
            })?;
        Ok(Response::new(self.status, self.headers, body))
    }
}

/// Durable [`CacheStorage`] rooted at a directory.
pub struct FsCacheStorage {
    root: PathBuf,
}

impl FsCacheStorage {
    /// Create a store rooted at `root`, creating the directory if needed.
    pub fn new(root: PathBuf) -> Result<Self, CacheError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn bucket_path(&self, bucket: &str) -> Result<PathBuf, CacheError> {
        // Bucket names become directory names; reject anything that could
        // escape the store root.
        if bucket.is_empty()
            || bucket == "."
            || bucket == ".."
            || bucket.contains('/')
            || bucket.contains('\\')
        {
            return Err(CacheError::InvalidBucketName(bucket.to_string()));
        }
        Ok(self.root.join(bucket))
    }

    fn entry_path(&self, bucket: &str, request: &Request) -> Result<PathBuf, CacheError> {
        let file_name = format!("{}.json", entry_digest(request));
        Ok(self.bucket_path(bucket)?.join(file_name))
    }
}

/// Stable filesystem-safe name for an entry: SHA-256 of the cache key.
fn entry_digest(request: &Request) -> String {
    hex::encode(Sha256::digest(request.cache_key().as_bytes()))
}

#[async_trait]
impl CacheStorage for FsCacheStorage {
    async fn open(&self, bucket: &str) -> Result<(), CacheError> {
        let path = self.bucket_path(bucket)?;
        fs::create_dir_all(&path)?;
        Ok(())
    }

    async fn put(
        &self,
        bucket: &str,
        request: &Request,
        response: &Response,
    ) -> Result<(), CacheError> {
        let path = self.entry_path(bucket, request)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let entry = StoredEntry::new(request, response);
        let contents = serde_json::to_string_pretty(&entry)?;
        fs::write(&path, contents)?;
        debug!(bucket = bucket, url = %request.url, "Stored cache entry");
        Ok(())
    }

    async fn lookup(
        &self,
        bucket: &str,
        request: &Request,
    ) -> Result<Option<Response>, CacheError> {
        let path = self.entry_path(bucket, request)?;
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)?;
        let entry: StoredEntry =
            serde_json::from_str(&contents).map_err(|e| CacheError::CorruptEntry {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        Ok(Some(entry.into_response(&path)?))
    }

    async fn bucket_names(&self) -> Result<Vec<String>, CacheError> {
        let mut names = Vec::new();
        for dir_entry in fs::read_dir(&self.root)? {
            let dir_entry = dir_entry?;
            if dir_entry.file_type()?.is_dir() {
                if let Some(name) = dir_entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        Ok(names)
    }

    async fn delete(&self, bucket: &str) -> Result<bool, CacheError> {
        let path = self.bucket_path(bucket)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_dir_all(&path)?;
        debug!(bucket = bucket, "Deleted cache bucket");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_store() -> (tempfile::TempDir, FsCacheStorage) {
        let dir = tempfile::tempdir().unwrap();
        let store = FsCacheStorage::new(dir.path().join("cache")).unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn put_then_lookup_returns_identical_snapshot() {
        let (_dir, store) = make_store();
        let request = Request::get("./styles.css");
        let response = Response::new(
            200,
            vec![("Content-Type".to_string(), "text/css".to_string())],
            b"body { margin: 0 }".to_vec(),
        );

        store.open("v2").await.unwrap();
        store.put("v2", &request, &response).await.unwrap();

        let found = store.lookup("v2", &request).await.unwrap();
        assert_eq!(found, Some(response));
    }

    #[tokio::test]
    async fn lookup_misses_for_unknown_request_and_bucket() {
        let (_dir, store) = make_store();
        let request = Request::get("./missing.png");

        assert_eq!(store.lookup("v2", &request).await.unwrap(), None);

        store.open("v2").await.unwrap();
        assert_eq!(store.lookup("v2", &request).await.unwrap(), None);
    }

    #[tokio::test]
    async fn bucket_names_lists_created_buckets() {
        let (_dir, store) = make_store();
        store.open("v1").await.unwrap();
        store.open("v2").await.unwrap();

        let mut names = store.bucket_names().await.unwrap();
        names.sort();
        assert_eq!(names, vec!["v1", "v2"]);
    }

    #[tokio::test]
    async fn delete_removes_bucket_and_reports_existence() {
        let (_dir, store) = make_store();
        store.open("v1").await.unwrap();
        store
            .put("v1", &Request::get("./"), &Response::ok("<html>"))
            .await
            .unwrap();

        assert!(store.delete("v1").await.unwrap());
        assert!(!store.delete("v1").await.unwrap());
        assert!(store.bucket_names().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_entry_surfaces_typed_error() {
        let (_dir, store) = make_store();
        let request = Request::get("./index.html");
        store.open("v2").await.unwrap();
        store
            .put("v2", &request, &Response::ok("<html>"))
            .await
            .unwrap();

        // Clobber the entry file with something that is not a record.
        let path = store.entry_path("v2", &request).unwrap();
        std::fs::write(&path, "not json").unwrap();

        let err = store.lookup("v2", &request).await.unwrap_err();
        assert!(matches!(err, CacheError::CorruptEntry { .. }));
    }

    #[tokio::test]
    async fn bucket_names_that_escape_the_root_are_rejected() {
        let (_dir, store) = make_store();
        for name in ["", ".", "..", "a/b", "a\\b"] {
            let err = store.open(name).await.unwrap_err();
            assert!(matches!(err, CacheError::InvalidBucketName(_)), "{name:?}");
        }
    }

    #[tokio::test]
    async fn binary_bodies_survive_the_roundtrip() {
        let (_dir, store) = make_store();
        let request = Request::get("./icon-192.png");
        let body: Vec<u8> = (0..=255).collect();
        let response = Response::new(200, Vec::new(), body.clone());

        store.open("v2").await.unwrap();
        store.put("v2", &request, &response).await.unwrap();

        let found = store.lookup("v2", &request).await.unwrap().unwrap();
        assert_eq!(found.body, body);
    }
}
