//! Filesystem access used by the ownership walker.
//!
//! The walker never touches the operating system directly. Everything it
//! needs (opening the root, listing a directory, reading and writing an
//! owner) goes through the [`Filesystem`] trait, implemented by
//! [`HostFilesystem`] for real trees and [`MemoryFilesystem`] for tests.

mod host;
mod memory;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::attributes::Attributes;
use crate::identity::Sid;

pub use host::HostFilesystem;
pub use memory::MemoryFilesystem;

/// Whether an entry is a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Anything that is not a directory.
    File,
    /// A directory, or a link to one.
    Directory,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Directory => write!(f, "directory"),
        }
    }
}

/// A discovered file or directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Full path of the entry.
    pub path: PathBuf,
    /// File or directory.
    pub kind: EntryKind,
    /// Attribute bits observed when the entry was discovered.
    pub attributes: Attributes,
}

impl Entry {
    /// Creates an entry.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind, attributes: Attributes) -> Self {
        Self {
            path: path.into(),
            kind,
            attributes,
        }
    }

    /// Whether the entry redirects elsewhere.
    #[must_use]
    pub fn is_reparse_point(&self) -> bool {
        self.attributes.is_reparse_point()
    }
}

/// The immediate children of one directory, split by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Non-directory children.
    pub files: Vec<Entry>,
    /// Subdirectories, including links to directories.
    pub directories: Vec<Entry>,
}

impl Listing {
    /// Adds `entry` to the group matching its kind.
    pub fn push(&mut self, entry: Entry) {
        match entry.kind {
            EntryKind::File => self.files.push(entry),
            EntryKind::Directory => self.directories.push(entry),
        }
    }
}

/// Failure reading or writing an entry's owner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OwnerError {
    /// The operating system refused or failed the call.
    #[error("{message}")]
    Io {
        /// The I/O error kind.
        kind: io::ErrorKind,
        /// The operating system's message.
        message: String,
    },

    /// The owner cannot be expressed in the form the filesystem stores.
    #[error("owner {owner} cannot be represented on this filesystem")]
    Unrepresentable {
        /// The identifier that could not be converted.
        owner: String,
    },
}

impl OwnerError {
    /// Whether this is the narrow conversion failure rather than an I/O failure.
    #[must_use]
    pub fn is_unrepresentable(&self) -> bool {
        matches!(self, Self::Unrepresentable { .. })
    }
}

impl From<io::Error> for OwnerError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Operations the walker performs against a filesystem.
///
/// Listing methods return entries in a stable order; the walker's
/// traversal order follows from it.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem {
    /// Resolves `path` to a directory entry.
    ///
    /// # Errors
    ///
    /// Fails if the path does not exist, cannot be read, or is not a directory.
    fn open_dir(&self, path: &Path) -> io::Result<Entry>;

    /// Lists the immediate children of `dir` in one pass.
    ///
    /// A child that vanishes or cannot be examined after it was listed is
    /// still returned; the failure surfaces when its owner is read.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be enumerated.
    fn list(&self, dir: &Entry) -> io::Result<Listing>;

    /// Reads the entry's current owner.
    ///
    /// # Errors
    ///
    /// Fails if the owner cannot be read or converted.
    fn owner(&self, entry: &Entry) -> Result<Sid, OwnerError>;

    /// Replaces the entry's owner. Links themselves are changed, never their targets.
    ///
    /// # Errors
    ///
    /// Fails if the owner cannot be written or converted.
    fn set_owner(&self, entry: &Entry, owner: &Sid) -> Result<(), OwnerError>;
}
