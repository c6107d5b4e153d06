//! Sitecache - offline asset caching for static sites.
//!
//! This crate implements the offline cache worker for a deployed static
//! site: a fixed manifest of assets is precached into a version-tagged
//! cache bucket when a new worker version installs, stale buckets from
//! prior versions are purged when it activates, and intercepted requests
//! are served cache-first while it is active.
//!
//! The host runtime drives the lifecycle; it constructs a [`WorkerConfig`],
//! a [`CacheStorage`] backend, and a [`NetworkFetch`] implementation, then
//! awaits [`CacheWorker::install`], [`CacheWorker::activate`], and
//! [`CacheWorker::handle_fetch`] as the corresponding events arrive. Each
//! returned future is the pending-operation handle for that phase: the
//! phase is complete when the future resolves.

pub mod cache;
pub mod config;
pub mod models;
pub mod net;
pub mod worker;

pub use cache::{CacheError, CacheStorage, FsCacheStorage, MemCacheStorage};
pub use config::WorkerConfig;
pub use models::{Request, Response};
pub use net::{FetchError, HttpFetcher, NetworkFetch};
pub use worker::{CacheWorker, LifecyclePhase, WorkerError};
