//! Environment variable handling for configuration overrides.
//!
//! `REOWNER_*` variables override values from a configuration file.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Variable overriding [`Config::root`].
pub const ROOT_ENV: &str = "REOWNER_ROOT";
/// Variable overriding [`Config::to`].
pub const TO_ENV: &str = "REOWNER_TO";
/// Variable overriding [`Config::from`].
pub const FROM_ENV: &str = "REOWNER_FROM";
/// Variable overriding [`Config::dry_run`].
pub const DRY_RUN_ENV: &str = "REOWNER_DRY_RUN";
/// Variable overriding [`Config::output_format`].
pub const OUTPUT_FORMAT_ENV: &str = "REOWNER_OUTPUT_FORMAT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use reowner::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Empty string values are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a boolean or output format value is invalid.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        // Read raw so a root that is not valid UTF-8 still gets through.
        if let Some(root) = env::var_os(ROOT_ENV).filter(|v| !is_blank(v)) {
            config.root = Some(PathBuf::from(root));
        }

        if let Some(to) = Self::var(TO_ENV) {
            config.to = Some(to);
        }

        if let Some(from) = Self::var(FROM_ENV) {
            config.from = Some(from);
        }

        if let Some(val) = Self::var(DRY_RUN_ENV) {
            config.dry_run = Some(Self::parse_bool(DRY_RUN_ENV, &val)?);
        }

        if let Some(val) = Self::var(OUTPUT_FORMAT_ENV) {
            config.output_format = Some(val.parse().map_err(|message| Error::Validation {
                field: OUTPUT_FORMAT_ENV.into(),
                message,
            })?);
        }

        Ok(())
    }

    fn var(name: &str) -> Option<String> {
        env::var(name).ok().filter(|v| !v.trim().is_empty())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}

fn is_blank(value: &std::ffi::OsStr) -> bool {
    value.to_str().is_some_and(|s| s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use serial_test::serial;

    const ALL: [&str; 5] = [ROOT_ENV, TO_ENV, FROM_ENV, DRY_RUN_ENV, OUTPUT_FORMAT_ENV];

    fn clear_env() {
        for name in ALL {
            env::remove_var(name);
        }
    }

    #[test]
    #[serial]
    fn test_no_overrides_leaves_config() {
        clear_env();
        let mut config = Config {
            root: Some("/data".into()),
            ..Default::default()
        };
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        assert_eq!(config.root, Some("/data".into()));
        assert!(config.to.is_none());
    }

    #[test]
    #[serial]
    fn test_string_overrides() {
        clear_env();
        env::set_var(ROOT_ENV, "/srv");
        env::set_var(TO_ENV, "alice");
        env::set_var(FROM_ENV, "S-1-22-1-1000");

        let mut config = Config {
            root: Some("/data".into()),
            ..Default::default()
        };
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        clear_env();

        assert_eq!(config.root, Some("/srv".into()));
        assert_eq!(config.to, Some("alice".into()));
        assert_eq!(config.from, Some("S-1-22-1-1000".into()));
    }

    #[test]
    #[serial]
    fn test_empty_value_ignored() {
        clear_env();
        env::set_var(TO_ENV, "  ");
        let mut config = Config::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        clear_env();
        assert!(config.to.is_none());
    }

    #[test]
    #[serial]
    fn test_dry_run_and_format() {
        clear_env();
        env::set_var(DRY_RUN_ENV, "YES");
        env::set_var(OUTPUT_FORMAT_ENV, "json");
        let mut config = Config::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        clear_env();
        assert_eq!(config.dry_run, Some(true));
        assert_eq!(config.output_format, Some(OutputFormat::Json));
    }

    #[test]
    #[serial]
    fn test_invalid_bool_rejected() {
        clear_env();
        env::set_var(DRY_RUN_ENV, "maybe");
        let mut config = Config::default();
        let err = EnvironmentConfig::apply_overrides(&mut config).unwrap_err();
        clear_env();
        assert!(err.is_validation());
        assert!(err.to_string().contains(DRY_RUN_ENV));
    }

    #[test]
    #[serial]
    fn test_invalid_format_rejected() {
        clear_env();
        env::set_var(OUTPUT_FORMAT_ENV, "xml");
        let mut config = Config::default();
        let result = EnvironmentConfig::apply_overrides(&mut config);
        clear_env();
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_bool_variants() {
        for s in ["true", "TRUE", "1", "yes", "On"] {
            assert!(EnvironmentConfig::parse_bool("f", s).unwrap());
        }
        for s in ["false", "0", "No", "OFF"] {
            assert!(!EnvironmentConfig::parse_bool("f", s).unwrap());
        }
    }

    mod proptests {
        use super::super::EnvironmentConfig;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_bool_parsing_roundtrip(value in any::<bool>()) {
                let parsed = EnvironmentConfig::parse_bool("test", &value.to_string()).unwrap();
                prop_assert_eq!(parsed, value);

                let numeric = if value { "1" } else { "0" };
                prop_assert_eq!(EnvironmentConfig::parse_bool("test", numeric).unwrap(), value);
            }

            #[test]
            fn prop_bool_parsing_rejects_invalid(
                s in "[a-z]{2,10}".prop_filter("Not a valid bool string", |s| {
                    !matches!(s.as_str(), "true" | "false" | "yes" | "no" | "on" | "off")
                })
            ) {
                prop_assert!(EnvironmentConfig::parse_bool("test", &s).is_err());
            }
        }
    }
}
