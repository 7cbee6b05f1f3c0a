//! Command handlers for Target Bundler CLI
//!
//! This module implements the command handlers that coordinate between CLI
//! arguments and the core application functionality.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::app::{
    ArchiveAccess, CacheConfig, CacheManager, EmittedBundle, JarArchive, LocationInput,
    LocationResolver, LocationResult, ManifestOverrideEngine, ResolutionPlan, ResolverConfig,
};
use crate::cli::{
    CacheAction, CacheArgs, ConfigAction, ConfigArgs, GlobalArgs, ManifestArgs, ResolveArgs,
};
use crate::config::AppConfig;
use crate::constants::headers;
use crate::errors::{AppError, ConfigError, Result};

/// One location in the JSON report of the resolve command
#[derive(Debug, Serialize)]
pub struct LocationReport {
    pub location_id: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub bundles: Vec<EmittedBundle>,
}

impl From<&LocationResult> for LocationReport {
    fn from(result: &LocationResult) -> Self {
        Self {
            location_id: result.location_id.clone(),
            ok: result.status.is_ok(),
            error: result.status.message(),
            bundles: result.bundles.clone(),
        }
    }
}

/// Build cache and resolver configuration from the config file and global flags
async fn runtime_config(global: &GlobalArgs) -> Result<(CacheConfig, ResolverConfig)> {
    let app_config = AppConfig::load(global.config.clone()).await?;
    let (mut cache_config, resolver_config) = app_config.to_runtime_config()?;

    if let Some(cache_dir) = &global.cache_dir {
        debug!("Cache directory overridden: {}", cache_dir.display());
        cache_config = CacheConfig::with_cache_root(cache_dir.clone());
    }

    Ok((cache_config, resolver_config))
}

/// Read and parse a resolution plan
async fn load_plan(path: &Path) -> Result<ResolutionPlan> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let plan = ResolutionPlan::from_toml(&content).map_err(ConfigError::InvalidFormat)?;
    Ok(plan)
}

/// Handle the resolve command
///
/// Every location of the plan is resolved; the command fails when at least
/// one location ends in an error.
pub async fn handle_resolve(args: ResolveArgs, global: &GlobalArgs) -> Result<()> {
    let start_time = Instant::now();
    let (cache_config, resolver_config) = runtime_config(global).await?;

    let plan = load_plan(&args.plan).await?;
    info!(
        "Loaded plan {} with {} locations",
        args.plan.display(),
        plan.locations.len()
    );

    let cache = Arc::new(CacheManager::new(cache_config)?);
    let engine = ManifestOverrideEngine::with_defaults(cache);
    let resolver = LocationResolver::new(engine, resolver_config);

    let inputs: Vec<LocationInput> = plan
        .locations
        .into_iter()
        .map(|location| location.into_parts())
        .collect();
    let results = resolver.resolve_all(inputs).await;
    let failed = results.iter().filter(|r| !r.status.is_ok()).count();

    if args.json {
        let reports: Vec<LocationReport> = results.iter().map(LocationReport::from).collect();
        let json = serde_json::to_string_pretty(&reports)
            .map_err(|e| AppError::generic(format!("Failed to serialize results: {}", e)))?;
        println!("{}", json);
    } else {
        print_results(&results);
        println!();
        println!(
            "Resolved {} locations ({} failed) in {:.2}s",
            results.len(),
            failed,
            start_time.elapsed().as_secs_f64()
        );
    }

    if failed > 0 {
        return Err(AppError::generic(format!(
            "{} of {} locations failed",
            failed,
            results.len()
        )));
    }
    Ok(())
}

fn print_results(results: &[LocationResult]) {
    for result in results {
        match result.status.message() {
            None => {
                println!("✅ {} ({} bundles)", result.location_id, result.bundles.len());
                for bundle in &result.bundles {
                    println!("   {}", bundle);
                }
            }
            Some(message) => {
                println!("❌ {}", result.location_id);
                println!("   {}", message);
            }
        }
    }
}

/// Handle the manifest command
pub async fn handle_manifest(args: ManifestArgs) -> Result<()> {
    let jar = args.jar;
    let lookup = jar.clone();
    let manifest = tokio::task::spawn_blocking(move || JarArchive::new().read_manifest(&lookup))
        .await
        .map_err(|e| AppError::generic(format!("Manifest task failed: {}", e)))??;

    println!("📋 Manifest of {}", jar.display());
    println!("==================");

    let Some(manifest) = manifest else {
        println!("No manifest found");
        return Ok(());
    };

    for (name, value) in manifest.main_attributes() {
        println!("{}: {}", name, value);
    }
    if !manifest.is_bundle() {
        println!();
        println!("ℹ️  Not an OSGi bundle (no {})", headers::BUNDLE_SYMBOLIC_NAME);
    }
    Ok(())
}

/// Handle cache management commands
pub async fn handle_cache(args: CacheArgs, global: &GlobalArgs) -> Result<()> {
    match args.action {
        CacheAction::Info => handle_cache_info(global).await,
    }
}

/// Show cache location and statistics
async fn handle_cache_info(global: &GlobalArgs) -> Result<()> {
    let (cache_config, _) = runtime_config(global).await?;
    let cache = CacheManager::new(cache_config)?;

    let stats = cache.get_cache_stats().await;

    println!("💾 Cache Information");
    println!("===================");
    println!("Location: {}", cache.cache_root().display());
    println!("Bundles: {}", stats.bundle_count);
    println!("Cache size: {}", stats.format_total_size());
    match stats.newest {
        Some(newest) => println!("Last written: {}", newest.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("Last written: never"),
    }

    Ok(())
}

/// Handle configuration management commands
pub async fn handle_config(args: ConfigArgs, global: &GlobalArgs) -> Result<()> {
    match args.action {
        ConfigAction::Init { force } => {
            let path = match &global.config {
                Some(path) => path.clone(),
                None => AppConfig::get_default_config_path().ok_or_else(|| {
                    AppError::generic("Cannot determine the user configuration directory")
                })?,
            };

            if AppConfig::write_default_config(&path, force).await? {
                println!("📁 Created default configuration file:");
                println!("   {}", path.display());
            } else {
                println!("ℹ️  Configuration file already exists: {}", path.display());
                println!("   Use --force to overwrite it.");
            }
            Ok(())
        }
    }
}
