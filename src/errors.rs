//! Error types for Target Bundler
//!
//! This module defines the error taxonomy for all components of the application.
//! Override precondition failures carry literal, stable messages because callers
//! and tests match on them verbatim.

use std::path::PathBuf;
use thiserror::Error;

use crate::constants::messages;

/// Override precondition violations (configuration errors)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OverrideError {
    /// Override requested while transitive dependencies are included
    #[error("{}", messages::DEPENDENCY_DEPTH_NOT_NONE)]
    DependencyDepthNotNone,

    /// The original artifact carries no symbolic name
    #[error("{}", messages::NOT_A_BUNDLE)]
    NotABundle,

    /// The location does not have exactly one root dependency
    #[error("{}", messages::ROOT_DEPENDENCY_COUNT)]
    RootDependencyCount { found: usize },

    /// The location does not have exactly one instruction set
    #[error("{}", messages::INSTRUCTION_COUNT)]
    InstructionCount { found: usize },

    /// The instructions do not declare a new symbolic name
    #[error("{}", messages::SYMBOLIC_NAME_NOT_CHANGED)]
    SymbolicNameNotChanged,
}

/// Manifest and archive access errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The artifact has no bundle manifest and the location demands one
    #[error("Error reading manifest of {artifact}: the artifact has no bundle manifest")]
    NotABundle { artifact: String },

    /// The file could not be opened or read as a jar archive
    #[error("Error reading manifest from {path}: {source}")]
    Archive {
        path: PathBuf,
        source: zip::result::ZipError,
    },

    /// Writing a jar archive failed
    #[error("Failed to write archive {path}: {source}")]
    Write {
        path: PathBuf,
        source: zip::result::ZipError,
    },

    /// File I/O error while reading or writing an archive
    #[error("I/O error accessing archive {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The manifest text violates the manifest format
    #[error("Malformed manifest at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Cache management errors
#[derive(Error, Debug)]
pub enum CacheError {
    /// Cache directory not found or inaccessible
    #[error("Cache directory not accessible: {path}")]
    DirectoryNotAccessible { path: PathBuf },

    /// I/O error on a cache file
    #[error("Cache I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Atomic file operation failed
    #[error("Atomic file operation failed: could not rename {temp_path} to {final_path}")]
    AtomicOperationFailed {
        temp_path: PathBuf,
        final_path: PathBuf,
    },

    /// A cache file could not be expressed as a location URL
    #[error("Cannot build a file URL for {path}")]
    InvalidLocation { path: PathBuf },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Override precondition error
    #[error(transparent)]
    Override(#[from] OverrideError),

    /// Manifest error
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Cache error
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Override(_) => "configuration",
            AppError::Manifest(_) => "manifest",
            AppError::Cache(_) => "cache",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Outcome of resolving one target location
///
/// An error status always carries exactly one cause: processing of a location
/// stops at the first failing dependency.
#[derive(Debug)]
pub enum ResolutionStatus {
    /// Every dependency was processed
    Ok,
    /// Processing stopped at the given cause
    Error { cause: AppError },
}

impl ResolutionStatus {
    /// Build an error status wrapping a single cause
    pub fn error(cause: AppError) -> Self {
        ResolutionStatus::Error { cause }
    }

    /// Whether the location resolved without error
    pub fn is_ok(&self) -> bool {
        matches!(self, ResolutionStatus::Ok)
    }

    /// The nested cause, if any
    pub fn cause(&self) -> Option<&AppError> {
        match self {
            ResolutionStatus::Ok => None,
            ResolutionStatus::Error { cause } => Some(cause),
        }
    }

    /// The nested cause's message, if any
    pub fn message(&self) -> Option<String> {
        self.cause().map(ToString::to_string)
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Override precondition result type alias
pub type OverrideResult<T> = std::result::Result<T, OverrideError>;

/// Manifest result type alias
pub type ManifestResult<T> = std::result::Result<T, ManifestError>;

/// Cache result type alias
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
