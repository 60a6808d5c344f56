//! Lexical normalization of the traversal root.
//!
//! Nothing here touches the filesystem: links in the root path are kept as
//! written, so a root given through a symlink is walked under the name the
//! user typed.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expand a leading `~` to the home directory.
///
/// Handles `~` and `~/path`. `~user` is rejected.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] for `~user` paths or when the home
/// directory cannot be determined.
///
/// # Examples
///
/// ```
/// use reowner::path::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/share")).unwrap();
/// assert!(expanded.ends_with("share"));
///
/// assert_eq!(expand_tilde(Path::new("/srv")).unwrap(), Path::new("/srv"));
/// assert!(expand_tilde(Path::new("~alice/share")).is_err());
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let mut components = path.components();
    let first = match components.next() {
        Some(Component::Normal(first)) => first,
        _ => return Ok(path.to_path_buf()),
    };

    if first != "~" {
        if first.to_string_lossy().starts_with('~') {
            return Err(Error::InvalidPath {
                path: path.to_path_buf(),
                reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
            });
        }
        return Ok(path.to_path_buf());
    }

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "cannot determine home directory".to_string(),
    })?;
    Ok(home.join(components.as_path()))
}

/// Drop `.` and apply `..` lexically.
///
/// `..` at the root stays at the root, matching how the operating system
/// resolves `/..`. A relative path keeps leading `..` components it cannot
/// cancel.
///
/// # Examples
///
/// ```
/// use reowner::path::resolve_components;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(resolve_components(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
/// assert_eq!(resolve_components(Path::new("/../x")), PathBuf::from("/x"));
/// ```
#[must_use]
pub fn resolve_components(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    parts.iter().map(|c| c.as_os_str()).collect()
}

/// Normalize a traversal root to an absolute, lexically clean path.
///
/// Expands `~`, joins relative paths onto the current directory and
/// resolves `.` and `..`. An empty result means the current directory.
///
/// # Errors
///
/// Returns an error if tilde expansion fails or the current directory
/// cannot be determined.
///
/// # Examples
///
/// ```no_run
/// use reowner::path::normalize;
/// use std::path::Path;
///
/// let root = normalize(Path::new("./share/../data")).unwrap();
/// assert!(root.is_absolute());
/// assert!(root.ends_with("data"));
/// ```
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        let cwd = env::current_dir().map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("cannot get current directory: {e}"),
        })?;
        cwd.join(expanded)
    };

    Ok(resolve_components(&absolute))
}
