//! Prelude module for Target Bundler Library
//!
//! This module re-exports the most commonly used items from the library,
//! providing a convenient way to import everything needed for typical usage
//! with a single `use target_bundler::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use target_bundler::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let cache = Arc::new(CacheManager::new(CacheConfig::default())?);
//!     let engine = ManifestOverrideEngine::with_defaults(cache);
//!     let resolver = LocationResolver::new(engine, ResolverConfig::default());
//!
//!     let results = resolver.resolve_all(Vec::new()).await;
//!     assert!(results.is_empty());
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, OverrideError, ResolutionStatus, Result};

// Essential app components that are used in most integrations
pub use crate::app::{
    // Models
    Coordinate,
    DependencyDepth,
    DependencyRef,
    EmittedBundle,
    MissingMetadataMode,
    OverrideRequest,
    ResolutionPlan,
    ResolvedArtifact,
    ResolvedDependency,
    TargetLocation,

    // Bundling
    ManifestOverrideEngine,
    RewriteInstructionSet,
    SourceBundleGenerator,
    check_override_preconditions,

    // Cache
    CacheConfig,
    CacheManager,
    CacheStats,

    // Resolution
    LocationResolver,
    LocationResult,
    ResolverConfig,
};

// Configuration
pub use crate::config::AppConfig;

// Commonly used constants
pub use crate::constants::workers::DEFAULT_WORKER_COUNT;

// Standard library re-exports that are commonly needed
pub use std::path::{Path, PathBuf};
pub use std::sync::Arc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_imports() {
        let _config = CacheConfig::default();
        let _resolver_config = ResolverConfig::default();
        let _app_config = AppConfig::default();

        assert_eq!(DEFAULT_WORKER_COUNT, 4);
        assert_eq!(MissingMetadataMode::default(), MissingMetadataMode::Error);
    }

    #[tokio::test]
    async fn test_prelude_integration_pattern() {
        use tempfile::TempDir;

        let temp_dir = TempDir::new().unwrap();
        let cache_config = CacheConfig::with_cache_root(temp_dir.path().to_path_buf());

        let cache = Arc::new(CacheManager::new(cache_config).unwrap());
        let resolver = LocationResolver::new(
            ManifestOverrideEngine::with_defaults(Arc::clone(&cache)),
            ResolverConfig::default(),
        );

        let location = TargetLocation {
            id: "empty".to_string(),
            ..Default::default()
        };
        let results = resolver.resolve_all(vec![(location, Vec::new())]).await;
        assert_eq!(results.len(), 1);
        assert!(results[0].status.is_ok());
        assert!(results[0].bundles.is_empty());
    }
}
