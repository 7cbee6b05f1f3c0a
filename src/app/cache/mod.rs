//! Bundle cache with per-key locking and atomic operations
//!
//! Generated jars (overridden main bundles and derived source bundles) are
//! kept under a cache root and regenerated only when their input artifact is
//! newer than the cached file.
//!
//! # Key Features
//!
//! - **OS-specific cache directories**: Uses standard system cache locations
//! - **Keyed locks**: Serializes regeneration of the same target, never of distinct ones
//! - **Atomic operations**: Staging file in the target directory + rename
//! - **Timestamp staleness**: A target is outdated when older than its source artifact
//! - **Structured storage**: Files organized by group/artifact/version[/classifier]
//!
//! # Module Organization
//!
//! - [`config`] - Configuration types and defaults
//! - [`lock`] - Per-key mutual exclusion
//! - [`path`] - File path generation and organization
//! - [`stats`] - Cache statistics and disk usage monitoring
//! - [`manager`] - Core cache manager with atomic operations
//!
//! # Examples
//!
//! ```rust,no_run
//! use target_bundler::app::cache::{CacheConfig, CacheManager};
//! use target_bundler::app::models::{Coordinate, ResolvedArtifact};
//! use std::path::PathBuf;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cache = CacheManager::new(CacheConfig::default())?;
//! let artifact = ResolvedArtifact::new(
//!     Coordinate::new("org.slf4j", "slf4j-api", "2.0.7"),
//!     PathBuf::from("/repo/slf4j-api-2.0.7.jar"),
//! );
//!
//! let path = cache.access_artifact_file(&artifact, "custom.slf4j.api_2.0.7.jar", |staging| {
//!     std::fs::copy(&artifact.file, staging)?;
//!     Ok(())
//! })?;
//! println!("Bundle at {}", path.display());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod lock;
pub mod manager;
pub mod path;
pub mod stats;

// Re-export main public API
pub use config::CacheConfig;
pub use lock::KeyedLocks;
pub use manager::CacheManager;
pub use path::PathGenerator;
pub use stats::{CacheStats, ScanSummary, format_bytes};
