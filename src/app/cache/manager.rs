//! Core cache manager with atomic operations
//!
//! This module contains the CacheManager implementation: staleness checks,
//! per-key serialized regeneration and atomic persistence of generated jars.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::app::models::ResolvedArtifact;
use crate::constants::cache;
use crate::errors::{CacheError, CacheResult, Result};

use super::config::CacheConfig;
use super::lock::KeyedLocks;
use super::path::PathGenerator;
use super::stats::{CacheStats, DirectoryScanner};

/// Main cache management system
#[derive(Debug)]
pub struct CacheManager {
    /// Configuration
    config: CacheConfig,
    /// Canonical cache root directory
    cache_root: PathBuf,
    /// Per-target regeneration locks
    locks: KeyedLocks,
}

impl CacheManager {
    /// Create a new cache manager
    ///
    /// # Arguments
    ///
    /// * `config` - Cache configuration
    ///
    /// # Errors
    ///
    /// Returns `CacheError` if cache directory cannot be created or accessed
    pub fn new(config: CacheConfig) -> CacheResult<Self> {
        let cache_root = match &config.cache_root {
            Some(path) => path.clone(),
            None => Self::get_default_cache_dir()?,
        };

        Self::ensure_directory_exists(&cache_root)?;
        let cache_root =
            fs::canonicalize(&cache_root).map_err(|_| CacheError::DirectoryNotAccessible {
                path: cache_root.clone(),
            })?;

        info!(
            "Initialized cache manager with root: {}",
            cache_root.display()
        );

        Ok(Self {
            config,
            cache_root,
            locks: KeyedLocks::new(),
        })
    }

    /// Get the cache root directory
    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Get the cache configuration
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Get the default cache directory for the current OS
    ///
    /// - macOS: ~/Library/Caches/target-bundler
    /// - Linux: ~/.cache/target-bundler
    /// - Windows: %LOCALAPPDATA%/target-bundler
    fn get_default_cache_dir() -> CacheResult<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| CacheError::DirectoryNotAccessible {
                path: PathBuf::from("system cache directory"),
            })?
            .join(cache::CACHE_DIR_NAME);

        Ok(cache_dir)
    }

    /// Ensure a directory exists, creating it if necessary
    fn ensure_directory_exists(path: &Path) -> CacheResult<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(|e| {
                error!("Failed to create cache directory: {}", e);
                CacheError::DirectoryNotAccessible {
                    path: path.to_path_buf(),
                }
            })?;
            debug!("Created cache directory: {}", path.display());
        }
        Ok(())
    }

    /// Directory holding the generated files of an artifact
    pub fn artifact_dir(&self, artifact: &ResolvedArtifact) -> PathBuf {
        PathGenerator::artifact_dir(&self.cache_root, &artifact.coordinate)
    }

    /// Cache path of a generated file for an artifact
    pub fn target_path(&self, artifact: &ResolvedArtifact, file_name: &str) -> PathBuf {
        PathGenerator::target_path(&self.cache_root, &artifact.coordinate, file_name)
    }

    /// Whether `target` has to be regenerated from `reference`
    ///
    /// Only modification times are compared: the target is outdated when it
    /// does not exist or is older than the reference. An unreadable reference
    /// also counts as outdated.
    pub fn is_outdated(target: &Path, reference: &Path) -> bool {
        let Ok(target_modified) = fs::metadata(target).and_then(|m| m.modified()) else {
            return true;
        };
        match fs::metadata(reference).and_then(|m| m.modified()) {
            Ok(reference_modified) => target_modified < reference_modified,
            Err(_) => true,
        }
    }

    /// Return the cache file for an artifact, producing it when outdated
    ///
    /// The per-target lock is held for the whole check-and-produce sequence,
    /// so `produce` runs at most once per target while it stays current.
    /// `produce` writes a staging file in the target directory which is
    /// renamed over the target only after it succeeded; on failure the
    /// staging file is removed and an existing target is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the error of `produce`, or `CacheError` if the staging file
    /// cannot be created or persisted
    pub fn access_artifact_file<F>(
        &self,
        artifact: &ResolvedArtifact,
        file_name: &str,
        produce: F,
    ) -> Result<PathBuf>
    where
        F: FnOnce(&Path) -> Result<()>,
    {
        let target = self.target_path(artifact, file_name);

        self.locks.with_lock(&target, || -> Result<PathBuf> {
            if !Self::is_outdated(&target, &artifact.file) {
                debug!("Cache hit: {}", target.display());
                return Ok(target.clone());
            }

            let directory = self.artifact_dir(artifact);
            fs::create_dir_all(&directory).map_err(|source| CacheError::Io {
                path: directory.clone(),
                source,
            })?;

            let prefix = PathGenerator::segment(file_name);
            let staging = tempfile::Builder::new()
                .prefix(&prefix)
                .suffix(cache::STAGING_SUFFIX)
                .tempfile_in(&directory)
                .map_err(|source| CacheError::Io {
                    path: directory.clone(),
                    source,
                })?
                .into_temp_path();

            debug!(
                "Producing {} from {}",
                target.display(),
                artifact.file.display()
            );
            produce(&staging)?;

            staging.persist(&target).map_err(|e| {
                error!("Failed to rename staging file: {}", e.error);
                CacheError::AtomicOperationFailed {
                    temp_path: e.path.to_path_buf(),
                    final_path: target.clone(),
                }
            })?;

            info!("Regenerated cache file: {}", target.display());
            Ok(target.clone())
        })
    }

    /// Get cache statistics
    pub async fn get_cache_stats(&self) -> CacheStats {
        let summary = DirectoryScanner::scan_cache_directory(&self.cache_root).await;

        let mut stats = CacheStats::new(self.cache_root.clone());
        stats.tracked_keys = self.locks.len();
        stats.set_disk_stats(summary);
        stats
    }
}
