//! Configuration validation.
//!
//! Turns a merged [`Config`] into a [`RunConfig`], rejecting missing or
//! blank required settings.

use crate::config::schema::{Config, RunConfig};
use crate::error::{Error, Result};
use std::path::Path;

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use reowner::config::{Config, ConfigValidator};
///
/// let config = Config {
///     root: Some("/data".into()),
///     to: Some("alice".to_string()),
///     ..Default::default()
/// };
/// let run = ConfigValidator::into_run_config(&config).unwrap();
/// assert!(!run.dry_run);
/// assert!(run.from.is_none());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a configuration without converting it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first missing field.
    pub fn validate(config: &Config) -> Result<()> {
        Self::root(config)?;
        Self::required("to", config.to.as_deref())?;
        if let Some(from) = config.from.as_deref() {
            Self::non_blank("from", from)?;
        }
        Ok(())
    }

    /// Validate and produce the settings for one run.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when `root` or `to` is missing or
    /// blank, or `from` is present but blank.
    pub fn into_run_config(config: &Config) -> Result<RunConfig> {
        Self::validate(config)?;
        let root = Self::root(config)?;
        let to = Self::required("to", config.to.as_deref())?;
        Ok(RunConfig {
            root: root.to_path_buf(),
            to: to.trim().to_string(),
            from: config.from.as_deref().map(|f| f.trim().to_string()),
            dry_run: config.dry_run.unwrap_or(false),
            output_format: config.output_format.unwrap_or_default(),
        })
    }

    fn root(config: &Config) -> Result<&Path> {
        let root = config.root.as_deref().ok_or_else(|| missing("root"))?;
        // Only a UTF-8 root can be blank; anything else is taken as given.
        if let Some(text) = root.to_str() {
            Self::non_blank("root", text)?;
        }
        Ok(root)
    }

    fn required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str> {
        let value = value.ok_or_else(|| missing(field))?;
        Self::non_blank(field, value)?;
        Ok(value)
    }

    fn non_blank(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "cannot be empty".into(),
            });
        }
        Ok(())
    }
}

fn missing(field: &str) -> Error {
    Error::Validation {
        field: field.into(),
        message: "is required".into(),
    }
}
