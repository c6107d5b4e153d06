//! Cache storage abstraction.
//!
//! Mirrors the operations the worker needs from a cache-bucket store:
//! open-or-create, store, exact-match lookup, enumerate, delete. Both the
//! durable filesystem store and the in-memory store implement this trait,
//! so the worker and its tests run against the same contract.

use async_trait::async_trait;

use crate::models::{Request, Response};

use super::CacheError;

/// Abstract store of named cache buckets.
///
/// Implementations must be safe to share across concurrently handled
/// fetches; single-entry operations are atomic, and no multi-entry
/// transaction is offered or required.
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Ensure the bucket exists, creating it if absent.
    async fn open(&self, bucket: &str) -> Result<(), CacheError>;

    /// Store a response snapshot for `request` in `bucket`, replacing any
    /// previous snapshot with the same identity.
    async fn put(&self, bucket: &str, request: &Request, response: &Response)
        -> Result<(), CacheError>;

    /// Exact-match lookup of a stored snapshot in `bucket`.
    /// Returns `Ok(None)` on miss, including when the bucket does not exist.
    async fn lookup(&self, bucket: &str, request: &Request)
        -> Result<Option<Response>, CacheError>;

    /// Names of all existing buckets, in unspecified order.
    async fn bucket_names(&self) -> Result<Vec<String>, CacheError>;

    /// Delete a bucket and all its entries.
    /// Returns whether the bucket existed.
    async fn delete(&self, bucket: &str) -> Result<bool, CacheError>;
}
