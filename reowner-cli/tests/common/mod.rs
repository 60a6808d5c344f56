//! Common test utilities for CLI integration tests.
//!
//! Provides an isolated environment with a sample tree under a temporary
//! directory and a command builder with `REOWNER_*` variables cleared.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ENV_VARS: [&str; 7] = [
    "REOWNER_ROOT",
    "REOWNER_TO",
    "REOWNER_FROM",
    "REOWNER_DRY_RUN",
    "REOWNER_OUTPUT_FORMAT",
    "REOWNER_CONFIG",
    "REOWNER_LOG_MODE",
];

/// Test environment with an isolated temporary directory.
pub struct TestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            temp_path,
        }
    }

    /// A command for the reowner binary with no inherited settings.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("reowner").expect("Failed to find reowner binary");
        for var in ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Build `tree/` holding `a.txt`, `sub/b.txt` and a link `link -> sub`.
    ///
    /// Returns the tree root.
    pub fn sample_tree(&self) -> PathBuf {
        let root = self.temp_path.join("tree");
        std::fs::create_dir_all(root.join("sub")).expect("Failed to create tree");
        std::fs::write(root.join("a.txt"), "a").expect("Failed to write file");
        std::fs::write(root.join("sub").join("b.txt"), "b").expect("Failed to write file");
        #[cfg(unix)]
        std::os::unix::fs::symlink(root.join("sub"), root.join("link"))
            .expect("Failed to create link");
        root
    }

    /// Write a YAML configuration file and return its path.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.temp_path.join("reowner.yaml");
        std::fs::write(&path, content).expect("Failed to write config");
        path
    }
}

/// The owner of `path` as an identifier string.
#[cfg(unix)]
pub fn owner_sid(path: &Path) -> String {
    use std::os::unix::fs::MetadataExt;
    let uid = std::fs::symlink_metadata(path)
        .expect("Failed to stat path")
        .uid();
    format!("S-1-22-1-{uid}")
}
