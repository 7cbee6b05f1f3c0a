//! Configuration management for Target Bundler
//!
//! This module provides file-based configuration with zero-config defaults.
//! Every section and field is optional; anything left out keeps its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::{CacheConfig, ResolverConfig};
use crate::constants::{cache, config, workers};
use crate::errors::{AppError, ConfigError, Result};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Cache settings
    pub cache: CacheConfigToml,
    /// Location resolution settings
    pub resolver: ResolverConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// TOML-friendly cache configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfigToml {
    /// Cache directory path
    pub cache_root: Option<PathBuf>,
}

/// TOML-friendly resolver configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ResolverConfigToml {
    /// Number of locations resolved concurrently
    pub worker_count: usize,
}

impl Default for ResolverConfigToml {
    fn default() -> Self {
        Self {
            worker_count: workers::DEFAULT_WORKER_COUNT,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level for the application
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Convert TOML-friendly configuration to runtime configuration
    pub fn to_runtime_config(&self) -> Result<(CacheConfig, ResolverConfig)> {
        let resolver = self.resolver.to_runtime_config();
        resolver.validate()?;
        Ok((self.cache.to_runtime_config(), resolver))
    }

    /// Load configuration
    ///
    /// An explicitly named file must exist. Without one the standard
    /// locations are searched and defaults are used when none is found.
    pub async fn load(config_file_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_file_override {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound { path }.into());
                }
                Some(path)
            }
            None => Self::find_config_file(),
        };

        match config_path {
            Some(path) => Self::load_from_file(&path).await,
            None => {
                debug!("Using default configuration");
                Ok(Self::default())
            }
        }
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(config::LOCAL_CONFIG_FILE)];
        if let Some(path) = Self::get_default_config_path() {
            search_paths.push(path);
        }

        for path in search_paths {
            if path.exists() {
                debug!("Found config file: {}", path.display());
                return Some(path);
            }
        }

        debug!("No config file found in standard locations");
        None
    }

    /// Get the default config file path for the current user
    pub fn get_default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(config::CONFIG_DIR_NAME).join(config::CONFIG_FILE_NAME))
    }

    /// Load configuration from a TOML file
    pub async fn load_from_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config: AppConfig = toml::from_str(&content).map_err(ConfigError::from)?;

        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Write the commented default configuration to `path`
    ///
    /// Returns `false` without touching the file when it already exists and
    /// `force` is not set.
    pub async fn write_default_config(path: &Path, force: bool) -> Result<bool> {
        if path.exists() && !force {
            debug!("Config file already exists: {}", path.display());
            return Ok(false);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::generic(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        tokio::fs::write(path, Self::generate_default_config_content())
            .await
            .map_err(|e| {
                AppError::generic(format!(
                    "Failed to write config file {}: {}",
                    path.display(),
                    e
                ))
            })?;

        info!("Wrote default configuration to: {}", path.display());
        Ok(true)
    }

    /// Generate default configuration content with helpful comments
    pub fn generate_default_config_content() -> String {
        let default_cache_path = dirs::cache_dir()
            .map(|dir| dir.join(cache::CACHE_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("./cache"));

        format!(
            r#"# Target Bundler Configuration

[cache]
# Cache directory for generated bundles (leave unset to use the system default)
# Default: {}
# cache_root = "/path/to/custom/cache"

[resolver]
# Number of locations resolved concurrently (1-{})
worker_count = {}

[logging]
level = "info"  # error, warn, info, debug, trace
"#,
            default_cache_path.display(),
            workers::MAX_WORKER_COUNT,
            workers::DEFAULT_WORKER_COUNT,
        )
    }
}

impl CacheConfigToml {
    /// Convert to runtime CacheConfig
    pub fn to_runtime_config(&self) -> CacheConfig {
        CacheConfig {
            cache_root: self.cache_root.clone(),
        }
    }
}

impl ResolverConfigToml {
    /// Convert to runtime ResolverConfig
    pub fn to_runtime_config(&self) -> ResolverConfig {
        ResolverConfig::default().with_worker_count(self.worker_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_default_config_creation() {
        let config = AppConfig::default();

        assert_eq!(config.resolver.worker_count, workers::DEFAULT_WORKER_COUNT);
        assert_eq!(config.logging.level, "info");
        assert!(config.cache.cache_root.is_none());
    }

    #[tokio::test]
    async fn test_config_file_generation() {
        let content = AppConfig::generate_default_config_content();

        // Should be valid TOML
        let parsed: AppConfig = toml::from_str(&content).unwrap();

        assert_eq!(parsed, AppConfig::default());
        assert!(content.contains("# Target Bundler Configuration"));
        assert!(content.contains("[cache]"));
        assert!(content.contains("[resolver]"));
    }

    #[tokio::test]
    async fn test_write_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        assert!(AppConfig::write_default_config(&config_path, false).await.unwrap());
        let loaded = AppConfig::load(Some(config_path.clone())).await.unwrap();
        assert_eq!(loaded, AppConfig::default());

        // Existing files are kept unless forced
        tokio::fs::write(&config_path, "[resolver]\nworker_count = 2\n")
            .await
            .unwrap();
        assert!(!AppConfig::write_default_config(&config_path, false).await.unwrap());
        let kept = AppConfig::load(Some(config_path.clone())).await.unwrap();
        assert_eq!(kept.resolver.worker_count, 2);

        assert!(AppConfig::write_default_config(&config_path, true).await.unwrap());
        let reset = AppConfig::load(Some(config_path)).await.unwrap();
        assert_eq!(reset, AppConfig::default());
    }

    #[tokio::test]
    async fn test_config_loading_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        // Should fail when explicitly specified
        let err = AppConfig::load(Some(config_path)).await.unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::NotFound { .. })));
        assert_eq!(err.category(), "config");
    }

    #[tokio::test]
    async fn test_config_loading_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test_config.toml");

        let test_config = r#"
[cache]
cache_root = "/var/cache/bundles"

[resolver]
worker_count = 16
"#;

        tokio::fs::write(&config_path, test_config).await.unwrap();

        let config = AppConfig::load(Some(config_path)).await.unwrap();

        // Verify custom values were loaded
        assert_eq!(config.resolver.worker_count, 16);
        assert_eq!(
            config.cache.cache_root,
            Some(PathBuf::from("/var/cache/bundles"))
        );

        // Verify defaults are still present for unspecified values
        assert_eq!(config.logging.level, "info");

        let (cache, resolver) = config.to_runtime_config().unwrap();
        assert_eq!(cache.cache_root, Some(PathBuf::from("/var/cache/bundles")));
        assert_eq!(resolver.worker_count, 16);
    }

    #[tokio::test]
    async fn test_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.toml");
        tokio::fs::write(&config_path, "[resolver]\nworker_count = \"many\"\n")
            .await
            .unwrap();

        let err = AppConfig::load(Some(config_path)).await.unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::InvalidFormat(_))));

        let mut config = AppConfig::default();
        config.resolver.worker_count = 0;
        assert!(config.to_runtime_config().is_err());
    }
}
