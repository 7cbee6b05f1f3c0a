//! Core application logic for Target Bundler
//!
//! This module contains the main application components: the location and
//! artifact models, manifest handling, override preconditions, the bundle
//! cache and the resolver that ties them together.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use target_bundler::app::{
//!     CacheConfig, CacheManager, Coordinate, LocationResolver, ManifestOverrideEngine,
//!     ResolvedArtifact, ResolvedDependency, ResolverConfig, TargetLocation,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cache = Arc::new(CacheManager::new(CacheConfig::default())?);
//! let resolver = LocationResolver::new(
//!     ManifestOverrideEngine::with_defaults(cache),
//!     ResolverConfig::default(),
//! );
//!
//! let coordinate = Coordinate::new("org.slf4j", "slf4j-api", "2.0.7");
//! let location = TargetLocation {
//!     id: "slf4j".to_string(),
//!     manifest_override: true,
//!     dependencies: vec![coordinate.clone()],
//!     instructions: vec!["Bundle-SymbolicName: custom.slf4j.api".to_string()],
//!     ..Default::default()
//! };
//! let dependency = ResolvedDependency::root(ResolvedArtifact::new(
//!     coordinate,
//!     "/repo/slf4j-api-2.0.7.jar",
//! ));
//!
//! for result in resolver.resolve_all(vec![(location, vec![dependency])]).await {
//!     for bundle in &result.bundles {
//!         println!("{}", bundle);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod bundle;
pub mod cache;
pub mod instructions;
pub mod manifest;
pub mod models;
pub mod precondition;
pub mod resolver;
pub mod rewrite;

// Re-export main public API
pub use bundle::{ManifestOverrideEngine, SourceBundleGenerator};
pub use cache::{CacheConfig, CacheManager, CacheStats};
pub use instructions::RewriteInstructionSet;
pub use manifest::{ArchiveAccess, JarArchive, Manifest};
pub use models::{
    Coordinate, DependencyDepth, DependencyRef, EmittedBundle, MissingMetadataMode,
    OverrideRequest, ResolutionPlan, ResolvedArtifact, ResolvedDependency, TargetLocation,
};
pub use precondition::check_override_preconditions;
pub use resolver::{LocationInput, LocationResolver, LocationResult, ResolverConfig};
pub use rewrite::{HeaderRewriter, RewriteEvaluator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_structure() {
        // Ensure public API is accessible
        let config = ResolverConfig::default();
        assert!(config.worker_count > 0);
        assert_eq!(DependencyDepth::default(), DependencyDepth::None);
        assert_eq!(MissingMetadataMode::default(), MissingMetadataMode::Error);
    }
}
