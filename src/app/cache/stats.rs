//! Cache statistics and disk usage monitoring
//!
//! This module provides functionality for monitoring cache usage: how many
//! bundles have been generated, how much space they take and when the cache
//! was last written.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::constants::jar;

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Cache root directory
    pub cache_root: PathBuf,
    /// Number of cache keys locked since startup
    pub tracked_keys: usize,
    /// Number of generated jars on disk
    pub bundle_count: usize,
    /// Total size of generated jars in bytes
    pub total_size: u64,
    /// Modification time of the most recently written jar
    pub newest: Option<DateTime<Utc>>,
}

impl CacheStats {
    /// Create new cache statistics
    pub fn new(cache_root: PathBuf) -> Self {
        Self {
            cache_root,
            tracked_keys: 0,
            bundle_count: 0,
            total_size: 0,
            newest: None,
        }
    }

    /// Apply the result of a directory scan
    pub fn set_disk_stats(&mut self, scan: ScanSummary) {
        self.bundle_count = scan.bundle_count;
        self.total_size = scan.total_size;
        self.newest = scan.newest.map(DateTime::<Utc>::from);
    }

    /// Format cache size in human-readable format
    pub fn format_total_size(&self) -> String {
        format_bytes(self.total_size)
    }
}

/// Totals gathered by [`DirectoryScanner`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub bundle_count: usize,
    pub total_size: u64,
    pub newest: Option<SystemTime>,
}

impl ScanSummary {
    fn merge(&mut self, other: ScanSummary) {
        self.bundle_count += other.bundle_count;
        self.total_size += other.total_size;
        self.newest = self.newest.max(other.newest);
    }
}

/// Directory scanner for cache statistics
pub struct DirectoryScanner;

impl DirectoryScanner {
    /// Scan the cache directory on the blocking pool
    pub async fn scan_cache_directory(cache_root: &Path) -> ScanSummary {
        let cache_root = cache_root.to_path_buf();

        tokio::task::spawn_blocking(move || Self::scan_directory_recursive(&cache_root))
            .await
            .unwrap_or_else(|e| {
                warn!("Failed to scan cache directory: {}", e);
                ScanSummary::default()
            })
    }

    /// Recursively scan a directory for generated jars
    pub fn scan_directory_recursive(dir: &Path) -> ScanSummary {
        let mut summary = ScanSummary::default();

        let Ok(entries) = std::fs::read_dir(dir) else {
            return summary;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                summary.merge(Self::scan_directory_recursive(&path));
            } else if Self::is_bundle_file(&path) {
                summary.bundle_count += 1;
                if let Ok(metadata) = entry.metadata() {
                    summary.total_size += metadata.len();
                    summary.newest = summary.newest.max(metadata.modified().ok());
                }
            }
        }

        summary
    }

    /// Generated bundles are `.jar` files; staging files are not
    fn is_bundle_file(path: &Path) -> bool {
        path.is_file()
            && path
                .extension()
                .is_some_and(|extension| extension == jar::JAR_EXTENSION)
    }
}

/// Format bytes in human-readable format
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: u64 = 1024;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD as f64 && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD as f64;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}
