//! Run counters and the terminal summary.

use std::path::PathBuf;

use serde::Serialize;

/// Counters accumulated by the walker.
///
/// Every counter only grows during a run. `directories_processed` never
/// exceeds `directories_discovered`, and the two are equal once the
/// frontier is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Directories accepted into the frontier, root included.
    pub directories_discovered: u64,
    /// Directories popped from the frontier and enumerated.
    pub directories_processed: u64,
    /// Files the owner mutator was attempted on, successful or not.
    pub files_processed: u64,
    /// Directory links excluded from mutation and descent.
    pub reparse_points_skipped: u64,
    /// Entries whose owner matched and was (or in a dry run would be) replaced.
    pub changed: u64,
    /// Entries or listings that failed and were skipped.
    pub failures: u64,
}

impl RunStats {
    /// Whether every discovered directory has been processed.
    #[must_use]
    pub fn is_drained(&self) -> bool {
        self.directories_processed == self.directories_discovered
    }
}

/// Final report of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// The normalized traversal root.
    pub root: PathBuf,
    /// Whether writes were suppressed.
    pub dry_run: bool,
    /// Whether the root could be opened at all.
    pub root_opened: bool,
    /// Counters at the end of the run.
    pub stats: RunStats,
}

impl RunSummary {
    /// Summary for a run whose root could not be opened.
    #[must_use]
    pub fn unopened(root: PathBuf, dry_run: bool) -> Self {
        Self {
            root,
            dry_run,
            root_opened: false,
            stats: RunStats::default(),
        }
    }
}
