//! Builder assembling the configuration layers.

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::{Config, RunConfig};
use crate::config::validator::ConfigValidator;
use crate::error::Result;
use std::path::PathBuf;

/// Loads, merges and validates configuration.
///
/// Layers, lowest to highest precedence: the file given with
/// [`ConfigBuilder::with_file`], `REOWNER_*` environment variables, then the
/// overrides given with [`ConfigBuilder::with_config`].
///
/// # Examples
///
/// ```
/// use reowner::config::{Config, ConfigBuilder};
///
/// let cli = Config {
///     root: Some("/data".into()),
///     to: Some("alice".to_string()),
///     ..Default::default()
/// };
///
/// let run = ConfigBuilder::new()
///     .skip_env()
///     .with_config(cli)
///     .build()
///     .unwrap();
/// assert_eq!(run.to, "alice");
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    file: Option<PathBuf>,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Start with no layers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the lowest-precedence layer from a YAML file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Ignore `REOWNER_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Highest-precedence layer, typically the command line.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Merge all layers without validating.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or an environment
    /// variable is malformed.
    pub fn merged(&self) -> Result<Config> {
        let mut config = ConfigLoader::load_optional(self.file.as_deref())?;

        if !self.skip_env {
            let mut env = Config::default();
            EnvironmentConfig::apply_overrides(&mut env)?;
            ConfigMerger::merge_into(&mut config, &env);
        }

        if let Some(overrides) = &self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        Ok(config)
    }

    /// Merge all layers and validate the result.
    ///
    /// # Errors
    ///
    /// Returns the first loading, parsing or validation error.
    pub fn build(&self) -> Result<RunConfig> {
        ConfigValidator::into_run_config(&self.merged()?)
    }
}
