//! Configuration schema definitions.
//!
//! [`Config`] is the loosely-typed layer every source produces: a YAML
//! file, the environment, or the command line. All fields are optional so
//! that sources can be merged. [`RunConfig`] is the validated result the
//! walker consumes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Layered run configuration.
///
/// # Examples
///
/// ```
/// use reowner::config::Config;
///
/// let config: Config = serde_yaml::from_str("root: /data\nto: alice\ndry_run: true\n").unwrap();
/// assert_eq!(config.to.as_deref(), Some("alice"));
/// assert_eq!(config.dry_run, Some(true));
/// assert!(config.from.is_none());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory the walk starts from.
    pub root: Option<PathBuf>,

    /// Owner to assign, as a SID or an account name.
    pub to: Option<String>,

    /// Owner to replace. Absent means every owner is replaced.
    pub from: Option<String>,

    /// Count matches without writing.
    pub dry_run: Option<bool>,

    /// How the run summary is rendered.
    pub output_format: Option<OutputFormat>,
}

/// Rendering of the run summary.
///
/// # Examples
///
/// ```
/// use reowner::config::OutputFormat;
///
/// let format: OutputFormat = "JSON".parse().unwrap();
/// assert_eq!(format, OutputFormat::Json);
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text block.
    #[default]
    Human,
    /// A JSON document.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: '{s}' (expected human or json)")),
        }
    }
}

/// Validated, immutable settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Directory the walk starts from, as given.
    pub root: PathBuf,
    /// Owner to assign.
    pub to: String,
    /// Owner to replace, if restricted.
    pub from: Option<String>,
    /// Suppress owner writes.
    pub dry_run: bool,
    /// Summary rendering.
    pub output_format: OutputFormat,
}
