//! Cache bucket storage for offline serving.
//!
//! This module provides the `CacheStorage` abstraction over named cache
//! buckets and two implementations:
//!
//! - `FsCacheStorage`: durable store, one directory per bucket, one JSON
//!   snapshot file per entry
//! - `MemCacheStorage`: in-memory store for tests and ephemeral embedding
//!
//! A bucket maps request identity (method + URL) to a stored response
//! snapshot. Buckets are named by the version tag and live until deleted
//! during activation.

pub mod error;
pub mod fs_store;
pub mod mem_store;
pub mod store;

pub use error::CacheError;
pub use fs_store::FsCacheStorage;
pub use mem_store::MemCacheStorage;
pub use store::CacheStorage;
