//! Command-line interface components
//!
//! This module contains CLI-specific code for the Target Bundler application:
//! argument parsing and the command handlers.

pub mod args;
pub mod commands;

pub use args::{
    CacheAction, CacheArgs, Cli, Commands, ConfigAction, ConfigArgs, GlobalArgs, ManifestArgs,
    ResolveArgs,
};
pub use commands::{handle_cache, handle_config, handle_manifest, handle_resolve, LocationReport};
