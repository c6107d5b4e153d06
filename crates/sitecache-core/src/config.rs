//! Worker configuration.
//!
//! The configuration surface is deliberately small: the version-tagged
//! cache name and the list of assets to precache. Changing the cache name
//! is the sole mechanism for triggering stale-bucket cleanup on the next
//! activation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Application name used for the default cache directory path
const APP_NAME: &str = "sitecache";

/// Configuration for a [`CacheWorker`](crate::CacheWorker).
///
/// `cache_name` doubles as the version tag: a deploy that changes the asset
/// set ships a new name (e.g. `"app-cache-v2"` -> `"app-cache-v3"`), and the
/// next activation removes every bucket that does not match it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Name of the current cache bucket, including the version tag.
    pub cache_name: String,
    /// Relative asset paths fetched and stored at install time, in order.
    pub precache_manifest: Vec<String>,
}

impl WorkerConfig {
    pub fn new(cache_name: impl Into<String>, precache_manifest: Vec<String>) -> Self {
        Self {
            cache_name: cache_name.into(),
            precache_manifest,
        }
    }

    /// Default root directory for the filesystem cache store,
    /// `<platform cache dir>/sitecache`.
    pub fn default_cache_root() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join(APP_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_roundtrips_through_json() {
        let config = WorkerConfig::new(
            "app-cache-v2",
            vec!["./".to_string(), "./index.html".to_string()],
        );
        let json = serde_json::to_string(&config).unwrap();
        let parsed: WorkerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.cache_name, "app-cache-v2");
        assert_eq!(parsed.precache_manifest.len(), 2);
    }

    #[test]
    fn default_cache_root_is_app_scoped() {
        // None only on platforms without a cache dir convention.
        if let Some(root) = WorkerConfig::default_cache_root() {
            assert!(root.ends_with("sitecache"));
        }
    }
}
