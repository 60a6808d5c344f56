//! CLI-specific error type.
//!
//! The process exits with status 0 whatever happens, so errors only decide
//! what is printed: usage problems add the usage line.

use std::fmt;

use reowner::Error as LibError;

/// Errors that stop a run before or after the walk.
#[derive(Debug)]
pub enum CliError {
    /// Required settings are missing or blank.
    Usage(String),

    /// Library error (wrapped).
    Library(LibError),

    /// Writing output failed.
    Io(std::io::Error),
}

impl CliError {
    /// Whether the usage line should follow the message.
    pub fn shows_usage(&self) -> bool {
        matches!(self, CliError::Usage(_))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Library(e) => write!(f, "{e}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::Usage(_) => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        match e {
            LibError::Validation { field, message } if field == "root" || field == "to" => {
                CliError::Usage(format!("missing required option --{field} ({message})"))
            }
            other => CliError::Library(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
