//! The offline cache manager: precache on install, purge on activate,
//! cache-first serving while active.

use tracing::{debug, info, warn};

use crate::cache::CacheStorage;
use crate::config::WorkerConfig;
use crate::models::{Request, Response};
use crate::net::{FetchError, NetworkFetch};

use super::{LifecyclePhase, WorkerError};

// ============================================================================
// Constants
// ============================================================================

/// Maximum concurrent asset fetches during install.
/// Keeps precaching from hammering the origin while still overlapping
/// request latency; manifests are small, so throughput is not a concern.
const MAX_CONCURRENT_PRECACHE: usize = 5;

/// The offline cache worker.
///
/// Generic over its two collaborators so the same lifecycle logic runs
/// against the durable filesystem store in production and the in-memory
/// store in tests.
pub struct CacheWorker<S, N> {
    config: WorkerConfig,
    storage: S,
    network: N,
    phase: LifecyclePhase,
}

impl<S: CacheStorage, N: NetworkFetch> CacheWorker<S, N> {
    /// Create a worker in the [`LifecyclePhase::New`] phase.
    pub fn new(config: WorkerConfig, storage: S, network: N) -> Self {
        Self {
            config,
            storage,
            network,
            phase: LifecyclePhase::New,
        }
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// Name of the current version's cache bucket.
    pub fn cache_name(&self) -> &str {
        &self.config.cache_name
    }

    /// Install: precache every manifest entry into the current bucket.
    ///
    /// Fetches run with bounded concurrency and may settle in any order;
    /// install returns only after all of them have settled. If any entry
    /// fails, install fails with the first failing path; entries already
    /// stored are left in place, and the phase does not advance.
    pub async fn install(&mut self) -> Result<(), WorkerError> {
        if self.phase != LifecyclePhase::New {
            return Err(WorkerError::Phase {
                operation: "install",
                phase: self.phase,
            });
        }

        info!(
            bucket = %self.config.cache_name,
            assets = self.config.precache_manifest.len(),
            "Installing"
        );

        self.storage.open(&self.config.cache_name).await?;

        let mut first_failure: Option<WorkerError> = None;
        for chunk in self.config.precache_manifest.chunks(MAX_CONCURRENT_PRECACHE) {
            let fetches: Vec<_> = chunk
                .iter()
                .map(|path| {
                    let network = &self.network;
                    async move {
                        let request = Request::get(path.clone());
                        let result = network.fetch(&request).await;
                        (path, request, result)
                    }
                })
                .collect();

            let results = futures::future::join_all(fetches).await;
            for (path, request, result) in results {
                match result {
                    Ok(response) => {
                        if let Err(e) = self
                            .storage
                            .put(&self.config.cache_name, &request, &response)
                            .await
                        {
                            warn!(path = %path, error = %e, "Failed to store precached asset");
                            if first_failure.is_none() {
                                first_failure = Some(WorkerError::Cache(e));
                            }
                        }
                    }
                    Err(e) => {
                        warn!(path = %path, error = %e, "Precache fetch failed");
                        if first_failure.is_none() {
                            first_failure = Some(WorkerError::Precache {
                                path: path.clone(),
                                source: e,
                            });
                        }
                    }
                }
            }
        }

        if let Some(failure) = first_failure {
            return Err(failure);
        }

        self.phase = LifecyclePhase::Installed;
        info!(bucket = %self.config.cache_name, "Install complete");
        Ok(())
    }

    /// Activate: delete every bucket whose name is not the current tag.
    ///
    /// Deletions are issued concurrently and all of them are attempted even
    /// when some fail; the first failure is surfaced after every deletion
    /// has settled. Re-activating an already-active worker is a no-op on an
    /// up-to-date bucket set.
    pub async fn activate(&mut self) -> Result<(), WorkerError> {
        if self.phase == LifecyclePhase::New {
            return Err(WorkerError::Phase {
                operation: "activate",
                phase: self.phase,
            });
        }

        let names = self.storage.bucket_names().await?;
        let stale: Vec<String> = names
            .into_iter()
            .filter(|name| *name != self.config.cache_name)
            .collect();

        info!(
            bucket = %self.config.cache_name,
            stale = stale.len(),
            "Activating"
        );

        let deletions: Vec<_> = stale
            .iter()
            .map(|name| {
                let storage = &self.storage;
                async move { (name, storage.delete(name).await) }
            })
            .collect();

        let mut first_failure: Option<WorkerError> = None;
        for (name, result) in futures::future::join_all(deletions).await {
            if let Err(e) = result {
                warn!(bucket = %name, error = %e, "Failed to delete stale bucket");
                if first_failure.is_none() {
                    first_failure = Some(WorkerError::Purge {
                        bucket: name.clone(),
                        source: e,
                    });
                }
            }
        }

        if let Some(failure) = first_failure {
            return Err(failure);
        }

        self.phase = LifecyclePhase::Active;
        info!(bucket = %self.config.cache_name, "Activation complete");
        Ok(())
    }

    /// Serve an intercepted request cache-first.
    ///
    /// Lookup is scoped to the current version's bucket. A hit is returned
    /// verbatim with no network traffic; a miss goes to the network exactly
    /// once and the live response is returned unmodified, never stored. A
    /// storage error during lookup degrades to a miss so the requester
    /// still gets a response; only a failed network fetch propagates as an
    /// error, exactly as a failed request would without the worker.
    pub async fn handle_fetch(&self, request: &Request) -> Result<Response, FetchError> {
        match self.storage.lookup(&self.config.cache_name, request).await {
            Ok(Some(response)) => {
                debug!(url = %request.url, "Cache hit");
                return Ok(response);
            }
            Ok(None) => {
                debug!(url = %request.url, "Cache miss");
            }
            Err(e) => {
                warn!(url = %request.url, error = %e, "Cache lookup failed, falling back to network");
            }
        }

        self.network.fetch(request).await
    }
}
