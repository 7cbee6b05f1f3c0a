//! Source bundle derivation
//!
//! A source bundle is the `sources` jar of an artifact, identified as
//! `<main>.source` and linked to its main bundle through the
//! `Eclipse-SourceBundle` header. Source jars that already carry a matching
//! header are used as they are; all others get their manifest rewritten into a
//! cached copy.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::app::cache::{CacheManager, PathGenerator};
use crate::app::manifest::{leading_name, ArchiveAccess, Manifest};
use crate::app::models::{EmittedBundle, ResolvedArtifact};
use crate::constants::{headers, source};
use crate::errors::Result;

use super::file_location;

/// Derives source bundles from resolved `sources` artifacts
#[derive(Debug, Clone)]
pub struct SourceBundleGenerator {
    cache: Arc<CacheManager>,
    archive: Arc<dyn ArchiveAccess>,
}

impl SourceBundleGenerator {
    pub fn new(cache: Arc<CacheManager>, archive: Arc<dyn ArchiveAccess>) -> Self {
        Self { cache, archive }
    }

    /// Emit the source bundle for a main bundle's final identity
    pub fn generate(
        &self,
        source_artifact: &ResolvedArtifact,
        main_symbolic_name: &str,
        main_version: &str,
    ) -> Result<EmittedBundle> {
        let symbolic_name = source_symbolic_name(main_symbolic_name);
        let manifest = self
            .archive
            .read_manifest(&source_artifact.file)?
            .unwrap_or_default();

        let path = if is_valid_source_manifest(&manifest, main_symbolic_name) {
            debug!(
                "Using source bundle as is: {}",
                source_artifact.file.display()
            );
            source_artifact.file.clone()
        } else {
            let file_name = PathGenerator::bundle_file_name(&symbolic_name, main_version);
            let rewritten = source_manifest(manifest, main_symbolic_name, main_version);
            self.cache
                .access_artifact_file(source_artifact, &file_name, |staging: &Path| {
                    self.archive.copy_entries_replacing_manifest(
                        &source_artifact.file,
                        &rewritten,
                        staging,
                    )?;
                    Ok(())
                })?
        };

        info!("Source bundle {} {}", symbolic_name, main_version);
        Ok(EmittedBundle {
            symbolic_name,
            version: main_version.to_string(),
            location: file_location(&path)?,
            is_source_bundle: true,
        })
    }
}

/// `<main>.source`
pub fn source_symbolic_name(main_symbolic_name: &str) -> String {
    format!("{}{}", main_symbolic_name, source::SOURCE_SUFFIX)
}

/// A source manifest is usable unchanged when it declares a symbolic name and
/// its `Eclipse-SourceBundle` header points at the main bundle
pub fn is_valid_source_manifest(manifest: &Manifest, main_symbolic_name: &str) -> bool {
    manifest.symbolic_name().is_some()
        && manifest
            .get(headers::ECLIPSE_SOURCE_BUNDLE)
            .map(leading_name)
            .is_some_and(|name| name == main_symbolic_name)
}

/// Add the source bundle headers to a source jar's manifest
pub fn source_manifest(mut manifest: Manifest, main_symbolic_name: &str, main_version: &str) -> Manifest {
    manifest.set(headers::MANIFEST_VERSION, headers::MANIFEST_VERSION_VALUE);
    manifest.set(
        headers::BUNDLE_MANIFEST_VERSION,
        headers::BUNDLE_MANIFEST_VERSION_VALUE,
    );
    manifest.set(
        headers::BUNDLE_SYMBOLIC_NAME,
        source_symbolic_name(main_symbolic_name),
    );
    manifest.set(headers::BUNDLE_VERSION, main_version);
    manifest.set_if_absent(
        headers::BUNDLE_NAME,
        format!("Source Bundle for {}", main_symbolic_name),
    );
    manifest.set(
        headers::ECLIPSE_SOURCE_BUNDLE,
        format!(
            "{};version=\"{}\";{}",
            main_symbolic_name,
            main_version,
            source::ROOTS_QUALIFIER
        ),
    );
    manifest
}
