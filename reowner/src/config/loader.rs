//! Configuration file loading.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Loads a YAML configuration file.
///
/// # Examples
///
/// ```no_run
/// use reowner::config::ConfigLoader;
/// use std::path::Path;
///
/// let config = ConfigLoader::load_file(Path::new("reowner.yaml")).unwrap();
/// println!("root: {:?}", config.root);
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Read and parse the configuration at `path`.
    ///
    /// An empty file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] or [`Error::PermissionDenied`] when
    /// the file cannot be read, and [`Error::Configuration`] when it is not
    /// valid YAML for [`Config`].
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::from_io(path, e))?;
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Load `path` if given, otherwise return the default configuration.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigLoader::load_file`].
    pub fn load_optional(path: Option<&Path>) -> Result<Config> {
        path.map_or_else(|| Ok(Config::default()), Self::load_file)
    }
}
