//! Location resolution
//!
//! A location's dependencies are processed one after another and processing
//! stops at the first failure, which becomes the location's single error
//! cause. Distinct locations are independent and are resolved in parallel on
//! Tokio's blocking pool, bounded by the configured worker count.

use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

use crate::app::bundle::ManifestOverrideEngine;
use crate::app::models::{EmittedBundle, ResolvedDependency, TargetLocation};
use crate::constants::workers;
use crate::errors::{AppError, ConfigError, ConfigResult, ResolutionStatus};

/// Configuration for parallel location resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Number of locations resolved concurrently
    pub worker_count: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            worker_count: workers::DEFAULT_WORKER_COUNT,
        }
    }
}

impl ResolverConfig {
    /// Set the number of concurrent workers
    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.worker_count == 0 || self.worker_count > workers::MAX_WORKER_COUNT {
            return Err(ConfigError::InvalidValue {
                field: "worker_count".to_string(),
                value: self.worker_count.to_string(),
                reason: format!("Must be between 1 and {}", workers::MAX_WORKER_COUNT),
            });
        }
        Ok(())
    }
}

/// Outcome of one location
#[derive(Debug)]
pub struct LocationResult {
    pub location_id: String,
    pub status: ResolutionStatus,
    /// Emitted bundles in dependency order; empty when the status is an error
    pub bundles: Vec<EmittedBundle>,
}

impl LocationResult {
    fn failed(location_id: String, cause: AppError) -> Self {
        Self {
            location_id,
            status: ResolutionStatus::error(cause),
            bundles: Vec::new(),
        }
    }
}

/// A location together with its resolved dependencies
pub type LocationInput = (TargetLocation, Vec<ResolvedDependency>);

/// Resolves target locations into bundles
#[derive(Debug, Clone)]
pub struct LocationResolver {
    engine: ManifestOverrideEngine,
    config: ResolverConfig,
}

impl LocationResolver {
    pub fn new(engine: ManifestOverrideEngine, config: ResolverConfig) -> Self {
        Self { engine, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve one location, stopping at the first failing dependency
    pub fn resolve_location(
        &self,
        location: &TargetLocation,
        dependencies: &[ResolvedDependency],
    ) -> LocationResult {
        let location_id = location.label().to_string();
        let mut bundles = Vec::new();

        for dependency in dependencies {
            match self.engine.process(location, dependency) {
                Ok(emitted) => bundles.extend(emitted),
                Err(cause) => {
                    error!(
                        "Location {} failed at {} ({}): {}",
                        location_id,
                        dependency.artifact.coordinate,
                        cause.category(),
                        cause
                    );
                    return LocationResult::failed(location_id, cause);
                }
            }
        }

        debug!(
            "Location {} resolved to {} bundles",
            location_id,
            bundles.len()
        );
        LocationResult {
            location_id,
            status: ResolutionStatus::Ok,
            bundles,
        }
    }

    /// Resolve many locations concurrently
    ///
    /// Results are returned in input order.
    pub async fn resolve_all(&self, locations: Vec<LocationInput>) -> Vec<LocationResult> {
        let semaphore = Arc::new(Semaphore::new(self.config.worker_count.max(1)));
        info!(
            "Resolving {} locations with {} workers",
            locations.len(),
            self.config.worker_count
        );

        let tasks = locations.into_iter().map(|(location, dependencies)| {
            let semaphore = Arc::clone(&semaphore);
            let resolver = self.clone();
            async move {
                let location_id = location.label().to_string();
                let permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        return LocationResult::failed(
                            location_id,
                            AppError::generic(format!("Worker pool closed: {}", e)),
                        )
                    }
                };

                let handle = tokio::task::spawn_blocking(move || {
                    let _permit = permit;
                    resolver.resolve_location(&location, &dependencies)
                });
                match handle.await {
                    Ok(result) => result,
                    Err(e) => {
                        error!("Resolution task for {} failed: {}", location_id, e);
                        LocationResult::failed(
                            location_id,
                            AppError::generic(format!("Resolution task failed: {}", e)),
                        )
                    }
                }
            }
        });

        join_all(tasks).await
    }
}
