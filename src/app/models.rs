//! Data models for target locations, artifacts and emitted bundles
//!
//! These are plain value types constructed fresh for every resolution pass.
//! Locations and resolution plans are deserialized from TOML; emitted bundles
//! serialize to JSON for the CLI.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::app::instructions::RewriteInstructionSet;
use crate::constants::source;

/// How far transitive dependencies of a location are included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyDepth {
    /// Only the listed dependencies
    #[default]
    None,
    /// Listed dependencies and their direct dependencies
    Direct,
    /// The full transitive closure
    Infinite,
}

impl fmt::Display for DependencyDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DependencyDepth::None => "none",
            DependencyDepth::Direct => "direct",
            DependencyDepth::Infinite => "infinite",
        };
        write!(f, "{}", name)
    }
}

/// Policy for artifacts that carry no bundle manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingMetadataMode {
    /// Synthesize a minimal manifest from the coordinate
    Generate,
    /// Drop the artifact silently
    Ignore,
    /// Fail the location
    #[default]
    Error,
}

impl fmt::Display for MissingMetadataMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MissingMetadataMode::Generate => "generate",
            MissingMetadataMode::Ignore => "ignore",
            MissingMetadataMode::Error => "error",
        };
        write!(f, "{}", name)
    }
}

fn default_packaging() -> String {
    "jar".to_string()
}

/// Maven artifact coordinate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    /// Artifact type, `jar` unless stated otherwise
    #[serde(default = "default_packaging", rename = "type")]
    pub packaging: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
}

impl Coordinate {
    /// Create a jar coordinate without classifier
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            packaging: default_packaging(),
            classifier: None,
        }
    }

    /// The same coordinate with the `sources` classifier
    pub fn sources(&self) -> Self {
        Self {
            classifier: Some(source::SOURCES_CLASSIFIER.to_string()),
            ..self.clone()
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.packaging)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{}", classifier)?;
        }
        write!(f, ":{}", self.version)
    }
}

/// A dependency as declared by (or derived for) a location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRef {
    pub coordinate: Coordinate,
    /// Declared directly in the location rather than pulled in transitively
    pub root: bool,
}

impl DependencyRef {
    pub fn root(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            root: true,
        }
    }
}

/// A coordinate together with the file the resolver produced for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    pub coordinate: Coordinate,
    pub file: PathBuf,
}

impl ResolvedArtifact {
    pub fn new(coordinate: Coordinate, file: impl Into<PathBuf>) -> Self {
        Self {
            coordinate,
            file: file.into(),
        }
    }
}

/// One dependency of a location after resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDependency {
    /// The main artifact
    pub artifact: ResolvedArtifact,
    /// The source-classified companion, when the resolver found one
    pub sources: Option<ResolvedArtifact>,
    /// Declared directly in the location
    pub root: bool,
}

impl ResolvedDependency {
    /// A root dependency without sources
    pub fn root(artifact: ResolvedArtifact) -> Self {
        Self {
            artifact,
            sources: None,
            root: true,
        }
    }

    /// Attach a source artifact
    pub fn with_sources(mut self, sources: ResolvedArtifact) -> Self {
        self.sources = Some(sources);
        self
    }
}

/// A configured target location
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetLocation {
    /// Identifier used in logs and reports
    pub id: String,
    pub include_dependency_depth: DependencyDepth,
    pub include_source: bool,
    pub manifest_override: bool,
    pub missing_manifest: MissingMetadataMode,
    /// Root dependencies declared by the location
    pub dependencies: Vec<Coordinate>,
    /// Free-text instruction blocks, one instruction set each
    pub instructions: Vec<String>,
}

impl TargetLocation {
    /// Parse the location's instruction blocks
    pub fn instruction_sets(&self) -> Vec<RewriteInstructionSet> {
        self.instructions
            .iter()
            .map(|text| RewriteInstructionSet::parse(text))
            .collect()
    }

    /// The declared dependencies as root references
    pub fn root_dependencies(&self) -> Vec<DependencyRef> {
        self.dependencies
            .iter()
            .cloned()
            .map(DependencyRef::root)
            .collect()
    }

    /// Label for logging
    pub fn label(&self) -> &str {
        if self.id.is_empty() {
            "<unnamed>"
        } else {
            &self.id
        }
    }
}

/// Everything the override precondition check looks at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideRequest {
    /// Symbolic name of the original manifest, absent when the artifact is no bundle
    pub original_symbolic_name: Option<String>,
    pub root_dependencies: Vec<DependencyRef>,
    pub instruction_sets: Vec<RewriteInstructionSet>,
    pub dependency_depth: DependencyDepth,
}

impl OverrideRequest {
    /// Build the request for one artifact of a location
    pub fn for_location(location: &TargetLocation, original_symbolic_name: Option<String>) -> Self {
        Self {
            original_symbolic_name,
            root_dependencies: location.root_dependencies(),
            instruction_sets: location.instruction_sets(),
            dependency_depth: location.include_dependency_depth,
        }
    }
}

/// The unit handed back to the caller for every materialized bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedBundle {
    pub symbolic_name: String,
    pub version: String,
    pub location: Url,
    pub is_source_bundle: bool,
}

impl EmittedBundle {
    /// Local file behind the bundle location
    pub fn file_path(&self) -> Option<PathBuf> {
        self.location.to_file_path().ok()
    }
}

impl fmt::Display for EmittedBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.symbolic_name, self.version)?;
        if self.is_source_bundle {
            write!(f, " (source)")?;
        }
        write!(f, " -> {}", self.location)
    }
}

fn default_root() -> bool {
    true
}

/// A resolved artifact as written in a resolution plan file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedArtifact {
    pub coordinate: Coordinate,
    pub file: PathBuf,
    /// Path of the resolved `sources` jar, if any
    #[serde(default)]
    pub source_file: Option<PathBuf>,
    #[serde(default = "default_root")]
    pub root: bool,
}

impl From<PlannedArtifact> for ResolvedDependency {
    fn from(planned: PlannedArtifact) -> Self {
        let sources = planned
            .source_file
            .map(|file| ResolvedArtifact::new(planned.coordinate.sources(), file));
        ResolvedDependency {
            artifact: ResolvedArtifact::new(planned.coordinate, planned.file),
            sources,
            root: planned.root,
        }
    }
}

/// A location together with its already-resolved artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedLocation {
    #[serde(flatten)]
    pub location: TargetLocation,
    #[serde(default)]
    pub artifacts: Vec<PlannedArtifact>,
}

impl PlannedLocation {
    /// Split into the location and its resolved dependencies
    pub fn into_parts(self) -> (TargetLocation, Vec<ResolvedDependency>) {
        let dependencies = self.artifacts.into_iter().map(Into::into).collect();
        (self.location, dependencies)
    }
}

/// Input of the `resolve` command: locations with the resolver's output
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolutionPlan {
    #[serde(default)]
    pub locations: Vec<PlannedLocation>,
}

impl ResolutionPlan {
    /// Parse a plan from TOML text
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
