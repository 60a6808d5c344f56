//! Depth-first ownership walk over a directory tree.
//!
//! The walk keeps an explicit stack of pending directories instead of
//! recursing, so depth is bounded only by memory. A directory's own owner
//! is handled before it is pushed, and directory links are neither
//! mutated nor descended into.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::fs::{Entry, Filesystem};
use crate::logging::Logger;

use super::mutate::{Outcome, OwnerMutator};
use super::report::{EntryFailure, Reporter, RunEvent};
use super::stats::{RunStats, RunSummary};

/// Walks a tree and applies an [`OwnerMutator`] to every file and directory.
///
/// # Examples
///
/// ```
/// use reowner::fs::MemoryFilesystem;
/// use reowner::identity::{Identity, Sid};
/// use reowner::operations::{OwnerMutator, RecordingReporter, TreeWalker};
/// use std::path::Path;
///
/// let old = Sid::unix_user(1);
/// let fs = MemoryFilesystem::new("/data", old.clone())
///     .with_file("/data/a.txt", old.clone())
///     .with_dir("/data/sub", old.clone())
///     .with_link_dir("/data/link", old.clone());
///
/// let mutator = OwnerMutator::new(
///     Some(Identity::from_sid(old)),
///     Identity::from_sid(Sid::unix_user(2)),
///     false,
/// );
/// let mut reporter = RecordingReporter::new();
/// let summary = TreeWalker::new(&fs, mutator).run(Path::new("/data"), &mut reporter);
///
/// assert_eq!(summary.stats.changed, 3);
/// assert_eq!(summary.stats.reparse_points_skipped, 1);
/// assert_eq!(summary.stats.directories_processed, 2);
/// ```
pub struct TreeWalker<'a, F: Filesystem + ?Sized> {
    fs: &'a F,
    mutator: OwnerMutator,
    logger: Logger,
}

/// Mutable state of one walk.
struct Traversal {
    frontier: Vec<Entry>,
    visited: HashSet<PathBuf>,
    stats: RunStats,
}

impl<'a, F: Filesystem + ?Sized> TreeWalker<'a, F> {
    /// Creates a walker over `fs`.
    #[must_use]
    pub fn new(fs: &'a F, mutator: OwnerMutator) -> Self {
        Self {
            fs,
            mutator,
            logger: Logger::default(),
        }
    }

    /// Sets the logger used for diagnostics.
    #[must_use]
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Walks the tree rooted at `root`.
    ///
    /// Never fails: an unopenable root yields an empty summary with
    /// `root_opened == false`, and every other failure is reported and
    /// skipped.
    pub fn run(&self, root: &Path, reporter: &mut dyn Reporter) -> RunSummary {
        let dry_run = self.mutator.is_dry_run();
        let root_entry = match self.fs.open_dir(root) {
            Ok(entry) => entry,
            Err(err) => {
                reporter.report(&RunEvent::RootUnavailable {
                    path: root.to_path_buf(),
                    message: err.to_string(),
                });
                return RunSummary::unopened(root.to_path_buf(), dry_run);
            }
        };

        let mut traversal = Traversal {
            frontier: Vec::new(),
            visited: HashSet::new(),
            stats: RunStats::default(),
        };

        traversal.visited.insert(root_entry.path.clone());
        traversal.stats.directories_discovered += 1;
        self.process(&root_entry, &mut traversal.stats, reporter);
        traversal.frontier.push(root_entry);

        while let Some(dir) = traversal.frontier.pop() {
            traversal.stats.directories_processed += 1;
            self.logger
                .debug(&format!("processing directory {}", dir.path.display()));

            // Children not yet reached when a listing fails are dropped for this run.
            if let Err(failure) = self.process_children(&dir, &mut traversal, reporter) {
                traversal.stats.failures += 1;
                self.logger.debug(&failure.to_string());
                reporter.report(&RunEvent::EntryFailed(failure));
            }

            reporter.report(&RunEvent::DirectoryProcessed(traversal.stats));
        }

        RunSummary {
            root: root.to_path_buf(),
            dry_run,
            root_opened: true,
            stats: traversal.stats,
        }
    }

    fn process_children(
        &self,
        dir: &Entry,
        traversal: &mut Traversal,
        reporter: &mut dyn Reporter,
    ) -> Result<(), EntryFailure> {
        let listing = self
            .fs
            .list(dir)
            .map_err(|err| EntryFailure::enumeration(dir, &err))?;
        for file in &listing.files {
            self.process(file, &mut traversal.stats, reporter);
            traversal.stats.files_processed += 1;
        }

        for child in listing.directories {
            if child.is_reparse_point() {
                traversal.stats.reparse_points_skipped += 1;
                self.logger
                    .debug(&format!("skipping linked directory {}", child.path.display()));
                continue;
            }
            if !traversal.visited.insert(child.path.clone()) {
                self.logger
                    .debug(&format!("already visited {}", child.path.display()));
                continue;
            }
            traversal.stats.directories_discovered += 1;
            self.process(&child, &mut traversal.stats, reporter);
            traversal.frontier.push(child);
        }
        Ok(())
    }

    fn process(&self, entry: &Entry, stats: &mut RunStats, reporter: &mut dyn Reporter) {
        match self.mutator.apply(self.fs, entry) {
            Ok(Outcome::Changed) => {
                stats.changed += 1;
                reporter.report(&RunEvent::OwnerChanged {
                    path: entry.path.clone(),
                    kind: entry.kind,
                    owner: self.mutator.target().label().to_string(),
                });
            }
            // Counted as changed once matched, even though the write failed.
            Ok(Outcome::WriteFailed(failure)) => {
                stats.changed += 1;
                stats.failures += 1;
                reporter.report(&RunEvent::EntryFailed(failure));
            }
            Ok(Outcome::Untouched) => {}
            Err(failure) => {
                stats.failures += 1;
                reporter.report(&RunEvent::EntryFailed(failure));
            }
        }
    }
}
