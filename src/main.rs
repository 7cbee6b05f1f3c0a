//! Target Bundler CLI application
//!
//! Command-line interface for turning resolved Maven artifacts into OSGi
//! bundles, with manifest override and generated source bundles.

use std::process;

use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use target_bundler::cli::{
    handle_cache, handle_config, handle_manifest, handle_resolve, Cli, Commands,
};
use target_bundler::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(&cli);

    info!("Target Bundler v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Resolve(args) => {
            info!("Executing resolve command");
            handle_resolve(args, &cli.global).await
        }
        Commands::Manifest(args) => {
            info!("Executing manifest command");
            handle_manifest(args).await
        }
        Commands::Cache(args) => {
            info!("Executing cache command");
            handle_cache(args, &cli.global).await
        }
        Commands::Config(args) => {
            info!("Executing config command");
            handle_config(args, &cli.global).await
        }
    }
}

/// Initialize logging based on CLI verbosity settings
fn init_logging(cli: &Cli) {
    let log_level = cli.log_level();

    let mut filter = EnvFilter::from_default_env();
    let directive = format!("target_bundler={}", log_level);
    let invalid = match directive.parse() {
        Ok(directive) => {
            filter = filter.add_directive(directive);
            None
        }
        Err(e) => Some(e),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(cli.global.very_verbose) // Show levels only in very verbose mode
        .with_writer(std::io::stderr)
        .init();

    if let Some(e) = invalid {
        warn!("Ignoring log directive {}: {}", directive, e);
    }

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
}
