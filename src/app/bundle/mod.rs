//! Bundle materialization
//!
//! - [`engine`] - `ManifestOverrideEngine`, the main bundle of each dependency
//! - [`source`] - `SourceBundleGenerator`, the companion source bundle

pub mod engine;
pub mod source;

use std::path::Path;

use url::Url;

use crate::errors::{CacheError, CacheResult};

// Re-export main public API
pub use engine::ManifestOverrideEngine;
pub use source::{is_valid_source_manifest, source_manifest, source_symbolic_name, SourceBundleGenerator};

/// `file://` location of a bundle file
pub(crate) fn file_location(path: &Path) -> CacheResult<Url> {
    Url::from_file_path(path).map_err(|_| CacheError::InvalidLocation {
        path: path.to_path_buf(),
    })
}
