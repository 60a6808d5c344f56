//! Configuration system for reowner.
//!
//! This module provides layered configuration with support for:
//! - A YAML configuration file
//! - Environment variable overrides
//! - Command-line overrides via the builder
//! - Validation into an immutable [`RunConfig`]
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`REOWNER_*`)
//! 3. The configuration file (via `ConfigBuilder::with_file`)
//!
//! `dry_run` is the exception: once any layer enables it, no later layer
//! can turn it off.
//!
//! # Examples
//!
//! ```no_run
//! use reowner::config::{Config, ConfigBuilder};
//!
//! let run = ConfigBuilder::new()
//!     .with_file("reowner.yaml")
//!     .with_config(Config {
//!         dry_run: Some(true),
//!         ..Default::default()
//!     })
//!     .build()
//!     .unwrap();
//!
//! println!("walking {} as {}", run.root.display(), run.to);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::ConfigLoader;
pub use merger::ConfigMerger;
pub use schema::{Config, OutputFormat, RunConfig};
pub use validator::ConfigValidator;
