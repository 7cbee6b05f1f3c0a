//! Target Bundler Library
//!
//! A Rust library that turns resolved Maven artifacts, grouped into target
//! locations, into OSGi bundles. Bundle identities can be overridden through
//! rewrite instructions, manifests can be synthesized for plain jars and
//! source bundles are derived on request. Generated jars live in a cache that
//! regenerates them only when their input is newer.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
