//! Application constants for Target Bundler
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain for maintainability and clarity.

/// Manifest header names read and written by the bundler
pub mod headers {
    /// Main manifest version header, required as the first main attribute
    pub const MANIFEST_VERSION: &str = "Manifest-Version";

    /// OSGi manifest version header
    pub const BUNDLE_MANIFEST_VERSION: &str = "Bundle-ManifestVersion";

    /// Unique bundle identity
    pub const BUNDLE_SYMBOLIC_NAME: &str = "Bundle-SymbolicName";

    /// Bundle version
    pub const BUNDLE_VERSION: &str = "Bundle-Version";

    /// Human readable bundle name
    pub const BUNDLE_NAME: &str = "Bundle-Name";

    /// Links a source bundle to the bundle whose sources it carries
    pub const ECLIPSE_SOURCE_BUNDLE: &str = "Eclipse-SourceBundle";

    /// Value written for `Manifest-Version`
    pub const MANIFEST_VERSION_VALUE: &str = "1.0";

    /// Value written for `Bundle-ManifestVersion`
    pub const BUNDLE_MANIFEST_VERSION_VALUE: &str = "2";
}

/// Literal messages reported when override preconditions fail.
///
/// These strings are part of the external contract and are asserted verbatim.
pub mod messages {
    pub const DEPENDENCY_DEPTH_NOT_NONE: &str = "The dependency depth must be none!";

    pub const NOT_A_BUNDLE: &str = "The artifact is no bundle.";

    pub const ROOT_DEPENDENCY_COUNT: &str =
        "The location must contain exactly one root dependency.";

    pub const INSTRUCTION_COUNT: &str = "The location must contain exactly one bnd instruction which must contain a symbolic name that differs from the original one.";

    pub const SYMBOLIC_NAME_NOT_CHANGED: &str =
        "The symbolic name in the bnd instructions must be defined and differ from the original one.";

    /// Prefix shared by every manifest read failure
    pub const ERROR_READING_MANIFEST: &str = "Error reading manifest";
}

/// Jar layout constants
pub mod jar {
    /// Path of the manifest inside a jar
    pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

    /// Extension used for every generated cache file
    pub const JAR_EXTENSION: &str = "jar";

    /// Maximum manifest line length in bytes, including the header name
    pub const MANIFEST_LINE_LIMIT: usize = 72;
}

/// Source bundle derivation constants
pub mod source {
    /// Suffix appended to the main bundle's symbolic name
    pub const SOURCE_SUFFIX: &str = ".source";

    /// Qualifiers appended to the `Eclipse-SourceBundle` header after the version
    pub const ROOTS_QUALIFIER: &str = "roots:=\".\"";

    /// Classifier of source artifacts
    pub const SOURCES_CLASSIFIER: &str = "sources";
}

/// Manifest synthesis constants for artifacts without metadata
pub mod generate {
    /// Prefix of synthesized symbolic names
    pub const WRAPPED_PREFIX: &str = "wrapped";

    /// Version used when a Maven version has no usable numeric part
    pub const FALLBACK_VERSION: &str = "0.0.0";
}

/// Cache layout constants
pub mod cache {
    /// Directory name below the OS cache directory
    pub const CACHE_DIR_NAME: &str = "target-bundler";

    /// Suffix of staging files written before the atomic rename
    pub const STAGING_SUFFIX: &str = ".part";
}

/// Resolver worker configuration
pub mod workers {
    /// Default number of locations resolved concurrently
    pub const DEFAULT_WORKER_COUNT: usize = 4;

    /// Upper bound accepted for the worker count
    pub const MAX_WORKER_COUNT: usize = 64;
}

/// Configuration file discovery
pub mod config {
    /// Project-local configuration file name
    pub const LOCAL_CONFIG_FILE: &str = "target-bundler.toml";

    /// Directory name below the user config directory
    pub const CONFIG_DIR_NAME: &str = "target-bundler";

    /// Configuration file name inside the config directory
    pub const CONFIG_FILE_NAME: &str = "config.toml";
}
