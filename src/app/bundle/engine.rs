//! Main bundle materialization with optional identity override
//!
//! For every resolved dependency the engine decides which manifest the bundle
//! ends up with:
//!
//! - a bundle without override keeps its file and identity
//! - a bundle with override gets its headers rewritten after the
//!   preconditions pass
//! - an artifact without bundle manifest follows the location's
//!   missing-manifest mode
//!
//! Rewritten and synthesized manifests are written into cached copies of the
//! jar. The final identity then feeds the source bundle, if requested.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::app::cache::{CacheManager, PathGenerator};
use crate::app::manifest::{synthesize_manifest, ArchiveAccess, JarArchive, Manifest};
use crate::app::models::{
    EmittedBundle, MissingMetadataMode, OverrideRequest, ResolvedDependency, TargetLocation,
};
use crate::app::rewrite::{HeaderRewriter, RewriteEvaluator};
use crate::constants::generate;
use crate::errors::{ManifestError, OverrideError, Result};

use super::file_location;
use super::source::SourceBundleGenerator;

/// Which manifest the main bundle is emitted with
#[derive(Debug)]
enum ManifestDecision {
    /// The artifact file is used unchanged
    Original(Manifest),
    /// A copy of the artifact is written with these headers
    Replaced(Manifest),
    /// The artifact is dropped
    Skip,
}

/// Turns resolved dependencies into emitted bundles
#[derive(Debug, Clone)]
pub struct ManifestOverrideEngine {
    cache: Arc<CacheManager>,
    archive: Arc<dyn ArchiveAccess>,
    rewriter: Arc<dyn RewriteEvaluator>,
    sources: SourceBundleGenerator,
}

impl ManifestOverrideEngine {
    pub fn new(
        cache: Arc<CacheManager>,
        archive: Arc<dyn ArchiveAccess>,
        rewriter: Arc<dyn RewriteEvaluator>,
    ) -> Self {
        let sources = SourceBundleGenerator::new(Arc::clone(&cache), Arc::clone(&archive));
        Self {
            cache,
            archive,
            rewriter,
            sources,
        }
    }

    /// Engine backed by [`JarArchive`] and [`HeaderRewriter`]
    pub fn with_defaults(cache: Arc<CacheManager>) -> Self {
        Self::new(
            cache,
            Arc::new(JarArchive::new()),
            Arc::new(HeaderRewriter::new()),
        )
    }

    pub fn cache(&self) -> &CacheManager {
        &self.cache
    }

    /// Emit the bundles for one dependency of a location
    ///
    /// Returns the main bundle followed by its source bundle when
    /// `include_source` is set and a source artifact was resolved. An artifact
    /// dropped by the `ignore` mode yields no bundles.
    ///
    /// # Errors
    ///
    /// Returns `OverrideError` when an override is requested but its
    /// preconditions fail, `ManifestError` when the artifact cannot be read or
    /// is no bundle under the `error` mode, and `CacheError` when the cached
    /// copy cannot be written
    pub fn process(
        &self,
        location: &TargetLocation,
        dependency: &ResolvedDependency,
    ) -> Result<Vec<EmittedBundle>> {
        let artifact = &dependency.artifact;
        let original = self.archive.read_manifest(&artifact.file)?;

        let (manifest, path) = match self.decide(location, dependency, original)? {
            ManifestDecision::Skip => return Ok(Vec::new()),
            ManifestDecision::Original(manifest) => (manifest, artifact.file.clone()),
            ManifestDecision::Replaced(manifest) => {
                let path = self.write_bundle(dependency, &manifest)?;
                (manifest, path)
            }
        };

        let symbolic_name = manifest
            .symbolic_name()
            .map(str::to_string)
            .ok_or_else(|| ManifestError::NotABundle {
                artifact: artifact.coordinate.to_string(),
            })?;
        let version = manifest
            .version()
            .unwrap_or(generate::FALLBACK_VERSION)
            .to_string();

        let mut bundles = vec![EmittedBundle {
            symbolic_name,
            version,
            location: file_location(&path)?,
            is_source_bundle: false,
        }];

        if location.include_source {
            match &dependency.sources {
                Some(sources) => {
                    let main = &bundles[0];
                    let source_bundle =
                        self.sources
                            .generate(sources, &main.symbolic_name, &main.version)?;
                    bundles.push(source_bundle);
                }
                None => warn!("No source artifact resolved for {}", artifact.coordinate),
            }
        }

        Ok(bundles)
    }

    fn decide(
        &self,
        location: &TargetLocation,
        dependency: &ResolvedDependency,
        original: Option<Manifest>,
    ) -> Result<ManifestDecision> {
        let coordinate = &dependency.artifact.coordinate;

        match original {
            Some(manifest) if manifest.is_bundle() => {
                if !location.manifest_override {
                    return Ok(ManifestDecision::Original(manifest));
                }

                let request = OverrideRequest::for_location(
                    location,
                    manifest.symbolic_name().map(str::to_string),
                );
                request.check()?;
                let [instructions] = request.instruction_sets.as_slice() else {
                    return Err(OverrideError::InstructionCount {
                        found: request.instruction_sets.len(),
                    }
                    .into());
                };

                let rewritten = self.rewriter.apply(instructions, &manifest);
                info!(
                    "Overriding {} of {} with {}",
                    manifest.symbolic_name().unwrap_or_default(),
                    coordinate,
                    rewritten.symbolic_name().unwrap_or_default()
                );
                Ok(ManifestDecision::Replaced(rewritten))
            }
            plain => match location.missing_manifest {
                MissingMetadataMode::Error => Err(ManifestError::NotABundle {
                    artifact: coordinate.to_string(),
                }
                .into()),
                MissingMetadataMode::Ignore => {
                    debug!("Ignoring {}: no bundle manifest", coordinate);
                    Ok(ManifestDecision::Skip)
                }
                MissingMetadataMode::Generate => {
                    if location.manifest_override {
                        // Without an original symbolic name the check cannot pass
                        let request = OverrideRequest::for_location(location, None);
                        return Err(request
                            .check()
                            .err()
                            .unwrap_or(OverrideError::NotABundle)
                            .into());
                    }

                    let mut manifest = synthesize_manifest(coordinate, plain.as_ref());
                    if let [instructions] = location.instruction_sets().as_slice() {
                        manifest = self.rewriter.apply(instructions, &manifest);
                    }
                    info!(
                        "Generated manifest for {}: {}",
                        coordinate,
                        manifest.symbolic_name().unwrap_or_default()
                    );
                    Ok(ManifestDecision::Replaced(manifest))
                }
            },
        }
    }

    /// Write the artifact with `manifest` into the cache
    fn write_bundle(
        &self,
        dependency: &ResolvedDependency,
        manifest: &Manifest,
    ) -> Result<PathBuf> {
        let artifact = &dependency.artifact;
        let symbolic_name = manifest.symbolic_name().ok_or_else(|| ManifestError::NotABundle {
            artifact: artifact.coordinate.to_string(),
        })?;
        let version = manifest.version().unwrap_or(generate::FALLBACK_VERSION);
        let file_name = PathGenerator::bundle_file_name(symbolic_name, version);

        self.cache
            .access_artifact_file(artifact, &file_name, |staging: &Path| {
                self.archive
                    .copy_entries_replacing_manifest(&artifact.file, manifest, staging)?;
                Ok(())
            })
    }
}
