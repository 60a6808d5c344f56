//! Error types for the reowner library.
//!
//! Run-level failures (bad identity strings, unusable configuration, an
//! unopenable root) are reported through [`Error`]. Failures scoped to a
//! single filesystem entry are values of their own, see
//! [`EntryFailure`](crate::operations::EntryFailure), because they never
//! abort a run.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a reowner error.
///
/// # Examples
///
/// ```
/// use reowner::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(1000)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the reowner library.
#[derive(Debug, Error)]
pub enum Error {
    /// An owner string could not be parsed as a security identifier.
    #[error("invalid identity '{value}': {reason}")]
    InvalidIdentity {
        /// The string that was supplied.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An account name did not resolve to a known principal.
    #[error("unknown account '{name}'")]
    UnknownAccount {
        /// The account name that failed to resolve.
        name: String,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A path does not exist.
    #[error("path not found: {}", path.display())]
    PathNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Permission denied accessing a path.
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        /// The path that could not be accessed.
        path: PathBuf,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The host platform cannot perform the requested operation.
    #[error("unsupported on this platform: {operation}")]
    Unsupported {
        /// The operation that was attempted.
        operation: String,
    },
}

impl Error {
    /// Check if error indicates a path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use reowner::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PathNotFound { path: PathBuf::from("/nonexistent") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound { .. })
    }

    /// Check if error is a missing or malformed setting.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Maps an I/O error on `path` to the most specific variant.
    pub(crate) fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::PathNotFound {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Self::Io(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_identity_error() {
        let err = Error::InvalidIdentity {
            value: "S-1-x".to_string(),
            reason: "bad sub-authority".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("invalid identity"));
        assert!(display.contains("S-1-x"));
        assert!(display.contains("bad sub-authority"));
    }

    #[test]
    fn test_unknown_account_error() {
        let err = Error::UnknownAccount {
            name: "nobody-here".to_string(),
        };
        assert_eq!(format!("{err}"), "unknown account 'nobody-here'");
    }

    #[test]
    fn test_invalid_path_error() {
        let err = Error::InvalidPath {
            path: PathBuf::from("/invalid/path"),
            reason: "does not exist".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("invalid path"));
        let normalized = display.replace(std::path::MAIN_SEPARATOR, "/");
        assert!(normalized.contains("/invalid/path"));
    }

    #[test]
    fn test_validation_error() {
        let err = Error::Validation {
            field: "to".to_string(),
            message: "must be non-empty".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("validation error"));
        assert!(display.contains("'to'"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err: Error = io_err.into();
        assert!(format!("{err}").contains("I/O error"));
    }

    #[test]
    fn test_from_io_maps_kinds() {
        let path = std::path::Path::new("/data");
        let not_found = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(Error::from_io(path, not_found).is_not_found());

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no");
        assert!(matches!(
            Error::from_io(path, denied),
            Error::PermissionDenied { .. }
        ));

        let other = std::io::Error::new(std::io::ErrorKind::Other, "other");
        assert!(matches!(Error::from_io(path, other), Error::Io(_)));
    }
}
