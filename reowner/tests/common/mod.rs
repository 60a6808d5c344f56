//! Common test utilities for integration tests.
//!
//! Builds real directory trees under a temporary directory.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A tree under a temporary directory, removed when dropped.
pub struct TreeFixture {
    dir: TempDir,
}

impl TreeFixture {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// The tree's root directory.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `relative` inside the tree.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Creates a file, and any missing parent directories.
    pub fn file(self, relative: &str) -> Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, relative.as_bytes()).unwrap();
        self
    }

    /// Creates a directory, and any missing parents.
    pub fn dir(self, relative: &str) -> Self {
        fs::create_dir_all(self.path(relative)).unwrap();
        self
    }

    /// Creates a symbolic link at `relative` pointing at `target`.
    #[cfg(unix)]
    pub fn symlink(self, relative: &str, target: &Path) -> Self {
        std::os::unix::fs::symlink(target, self.path(relative)).unwrap();
        self
    }
}

/// Writes a YAML configuration file into `dir`.
pub fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("reowner.yaml");
    fs::write(&path, content).unwrap();
    path
}

/// Uid owning `path`, without following links.
#[cfg(unix)]
pub fn uid_of(path: &Path) -> u32 {
    use std::os::unix::fs::MetadataExt;
    fs::symlink_metadata(path).unwrap().uid()
}
