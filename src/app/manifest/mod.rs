//! Jar manifest handling
//!
//! This module provides the manifest model and codec, access to manifests
//! inside jar archives, and synthesis of bundle manifests for artifacts that
//! do not carry one.
//!
//! # Module Organization
//!
//! - [`types`] - `Manifest` model, MANIFEST.MF parsing and serialization
//! - [`archive`] - `ArchiveAccess` seam and the zip-backed `JarArchive`
//! - [`generate`] - Manifest synthesis for the `generate` missing-manifest mode
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::path::Path;
//! use target_bundler::app::manifest::{ArchiveAccess, JarArchive};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let archive = JarArchive::new();
//! if let Some(manifest) = archive.read_manifest(Path::new("slf4j-api-2.0.7.jar"))? {
//!     println!("{:?} {:?}", manifest.symbolic_name(), manifest.version());
//! }
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod generate;
pub mod types;

// Re-export main public API
pub use archive::{ArchiveAccess, JarArchive};
pub use generate::{osgi_version, synthesize_manifest, wrapped_symbolic_name};
pub use types::{leading_name, Attributes, Manifest};
