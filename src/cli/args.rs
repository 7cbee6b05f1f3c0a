//! Command-line argument parsing for Target Bundler
//!
//! This module defines the CLI structure using clap derive macros: resolving
//! target locations into bundles, inspecting jar manifests, reporting on the
//! bundle cache and writing a default configuration file.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Target Bundler - Materialize OSGi bundles for target locations
#[derive(Parser, Debug)]
#[command(
    name = "target-bundler",
    version,
    about = "Materialize OSGi bundles, with optional identity override, for target locations",
    long_about = "Turns resolved Maven artifacts grouped into target locations into OSGi bundles.
Bundle identities can be overridden with rewrite instructions, missing metadata can be generated,
and source bundles are derived on request. Generated jars are kept in a timestamp-checked cache."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Cache directory path
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the locations of a resolution plan into bundles
    Resolve(ResolveArgs),

    /// Show the main manifest headers of a jar
    Manifest(ManifestArgs),

    /// Cache information
    Cache(CacheArgs),

    /// Configuration file management
    Config(ConfigArgs),
}

/// Arguments for the resolve command
#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Resolution plan (TOML) listing locations and their resolved artifacts
    #[arg(value_name = "PLAN")]
    pub plan: PathBuf,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for manifest inspection
#[derive(Args, Debug, Clone)]
pub struct ManifestArgs {
    /// Jar file to inspect
    #[arg(value_name = "JAR")]
    pub jar: PathBuf,
}

/// Arguments for cache management
#[derive(Args, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache management actions
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Show cache location and statistics
    Info,
}

/// Arguments for configuration management
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a commented default configuration file
    ///
    /// Uses --config FILE when given, the user config directory otherwise.
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the logging level based on global arguments
    pub fn log_level(&self) -> tracing::Level {
        if self.global.quiet {
            tracing::Level::ERROR
        } else if self.global.very_verbose {
            tracing::Level::DEBUG
        } else if self.global.verbose {
            tracing::Level::INFO
        } else {
            tracing::Level::WARN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(verbose: bool, very_verbose: bool, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            very_verbose,
            quiet,
            config: None,
            cache_dir: None,
        }
    }

    #[test]
    fn test_log_level() {
        let cli_quiet = Cli {
            global: global(false, false, true),
            command: Commands::Cache(CacheArgs {
                action: CacheAction::Info,
            }),
        };
        let cli_verbose = Cli {
            global: global(true, false, false),
            command: Commands::Cache(CacheArgs {
                action: CacheAction::Info,
            }),
        };
        let cli_debug = Cli {
            global: global(true, true, false),
            command: Commands::Cache(CacheArgs {
                action: CacheAction::Info,
            }),
        };

        assert_eq!(cli_quiet.log_level(), tracing::Level::ERROR);
        assert_eq!(cli_verbose.log_level(), tracing::Level::INFO);
        assert_eq!(cli_debug.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_parse_resolve() {
        let cli = Cli::try_parse_from([
            "target-bundler",
            "--cache-dir",
            "/tmp/bundles",
            "resolve",
            "plan.toml",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.global.cache_dir, Some(PathBuf::from("/tmp/bundles")));
        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.plan, PathBuf::from("plan.toml"));
                assert!(args.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_config_init() {
        let cli = Cli::try_parse_from([
            "target-bundler",
            "config",
            "init",
            "--force",
            "--config",
            "bundler.toml",
        ])
        .unwrap();
        assert_eq!(cli.global.config, Some(PathBuf::from("bundler.toml")));
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigArgs {
                action: ConfigAction::Init { force: true }
            })
        ));
    }

    #[test]
    fn test_parse_cache_info() {
        let cli = Cli::try_parse_from(["target-bundler", "cache", "info", "-q"]).unwrap();
        assert!(cli.global.quiet);
        assert!(matches!(
            cli.command,
            Commands::Cache(CacheArgs {
                action: CacheAction::Info
            })
        ));
    }
}
