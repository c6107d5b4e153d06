//! HTTP implementation of the network fetch seam.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::models::{Request, Response};

use super::FetchError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// 30s tolerates slow origins while still failing fast enough that a page
/// waiting on a cache miss is not stuck indefinitely.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Performs a live network fetch for a request.
///
/// Any HTTP response, including 4xx and 5xx, is a successful fetch and is
/// returned as a snapshot; the worker serves it to the page unmodified.
/// Only transport failure (DNS, connect, timeout) is an error, and the
/// worker propagates it to the requester verbatim. No retries.
#[async_trait]
pub trait NetworkFetch: Send + Sync {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError>;
}

/// [`NetworkFetch`] over HTTP.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFetcher {
    /// Create a fetcher resolving manifest-relative paths against `base_url`
    /// (the deployed site origin, e.g. `https://example.net/app`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Resolve a request URL to an absolute one. Already-absolute URLs pass
    /// through; relative paths (with or without a leading `./`) are joined
    /// onto the base URL.
    fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }

        let rest = url.trim_start_matches("./").trim_start_matches('/');
        format!("{}/{}", self.base_url.trim_end_matches('/'), rest)
    }
}

#[async_trait]
impl NetworkFetch for HttpFetcher {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        let url = self.resolve(&request.url);
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|_| FetchError::InvalidMethod(request.method.clone()))?;

        let response = self.client.request(method, &url).send().await?;

        let status = response.status().as_u16();
        // Non-UTF-8 header values cannot be replayed through the snapshot
        // model and are skipped.
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        debug!(url = %url, status = status, bytes = body.len(), "Network fetch complete");
        Ok(Response::new(status, headers, body))
    }
}
