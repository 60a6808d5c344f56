//! Configuration merging and precedence handling.

use crate::config::schema::Config;

/// Merges configuration layers according to precedence rules.
///
/// # Examples
///
/// ```
/// use reowner::config::{Config, ConfigMerger};
///
/// let low = Config { to: Some("low".to_string()), ..Default::default() };
/// let high = Config { to: Some("high".to_string()), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.to, Some("high".to_string()));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge layers given from lowest to highest precedence.
    #[must_use]
    pub fn merge(layers: &[Config]) -> Config {
        let mut result = Config::default();
        for layer in layers {
            Self::merge_into(&mut result, layer);
        }
        result
    }

    /// Merge `source` into `target` (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - String and format fields: source overwrites if `Some`
    /// - `dry_run`: once any layer enables it, it stays enabled
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.root.is_some() {
            target.root.clone_from(&source.root);
        }

        if source.to.is_some() {
            target.to.clone_from(&source.to);
        }

        if source.from.is_some() {
            target.from.clone_from(&source.from);
        }

        if let Some(dry_run) = source.dry_run {
            target.dry_run = Some(target.dry_run.unwrap_or(false) || dry_run);
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }
    }
}
