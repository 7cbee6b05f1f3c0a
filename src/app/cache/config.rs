//! Cache configuration types and defaults

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the bundle cache
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Root directory for generated bundles (OS-specific if None)
    pub cache_root: Option<PathBuf>,
}

impl CacheConfig {
    /// Create a new cache configuration with custom cache root
    pub fn with_cache_root(cache_root: PathBuf) -> Self {
        Self {
            cache_root: Some(cache_root),
        }
    }
}
