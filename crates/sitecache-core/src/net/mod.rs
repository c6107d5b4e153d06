//! Live network fetching for cache misses and precaching.
//!
//! This module provides the `NetworkFetch` abstraction the worker uses
//! whenever a response must come from the network: once per manifest entry
//! at install time, and once per cache miss while serving.
//!
//! `HttpFetcher` is the production implementation on top of reqwest.

pub mod error;
pub mod fetcher;

pub use error::FetchError;
pub use fetcher::{HttpFetcher, NetworkFetch};
