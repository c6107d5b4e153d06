use thiserror::Error;

use crate::cache::CacheError;
use crate::net::FetchError;

use super::LifecyclePhase;

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("Precache of {path:?} failed: {source}")]
    Precache {
        path: String,
        #[source]
        source: FetchError,
    },

    #[error("Failed to delete stale bucket {bucket:?}: {source}")]
    Purge {
        bucket: String,
        #[source]
        source: CacheError,
    },

    #[error("Cannot {operation} while {phase}")]
    Phase {
        operation: &'static str,
        phase: LifecyclePhase,
    },

    #[error(transparent)]
    Cache(#[from] CacheError),
}
