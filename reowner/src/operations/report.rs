//! Events emitted while walking a tree, and the sinks that receive them.
//!
//! Events deliberately carry no dry-run flag: a dry run and a live run over
//! the same tree emit the same stream.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::attributes::Attributes;
use crate::fs::{Entry, EntryKind, OwnerError};

use super::stats::RunStats;

/// Why a single entry was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The entry carries attribute bits outside the allow-list.
    UnknownAttributes(Attributes),
    /// Reading or writing the owner failed.
    Owner(OwnerError),
    /// The directory's children could not be enumerated.
    Enumeration {
        /// The I/O error kind.
        kind: io::ErrorKind,
        /// The operating system's message.
        message: String,
    },
}

/// A failure scoped to one entry. The run continues past it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFailure {
    /// The entry that failed.
    pub path: PathBuf,
    /// File or directory.
    pub kind: EntryKind,
    /// What went wrong.
    pub reason: FailureReason,
}

impl EntryFailure {
    /// The attribute guard rejected `entry`.
    #[must_use]
    pub fn unknown_attributes(entry: &Entry, unexpected: Attributes) -> Self {
        Self::new(entry, FailureReason::UnknownAttributes(unexpected))
    }

    /// Owner access failed for `entry`.
    #[must_use]
    pub fn owner(entry: &Entry, error: OwnerError) -> Self {
        Self::new(entry, FailureReason::Owner(error))
    }

    /// Listing the children of `dir` failed.
    #[must_use]
    pub fn enumeration(dir: &Entry, error: &io::Error) -> Self {
        Self::new(
            dir,
            FailureReason::Enumeration {
                kind: error.kind(),
                message: error.to_string(),
            },
        )
    }

    fn new(entry: &Entry, reason: FailureReason) -> Self {
        Self {
            path: entry.path.clone(),
            kind: entry.kind,
            reason,
        }
    }

    /// Whether this is the narrow owner-conversion failure.
    #[must_use]
    pub fn is_unrepresentable_owner(&self) -> bool {
        matches!(&self.reason, FailureReason::Owner(err) if err.is_unrepresentable())
    }
}

impl fmt::Display for EntryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match &self.reason {
            FailureReason::UnknownAttributes(bits) => {
                write!(f, "unknown attributes on {} '{path}': {bits}", self.kind)
            }
            FailureReason::Owner(err @ OwnerError::Unrepresentable { .. }) => {
                write!(f, "unrepresentable owner processing {} '{path}': {err}", self.kind)
            }
            FailureReason::Owner(err) => {
                write!(f, "failed processing {} '{path}': {err}", self.kind)
            }
            FailureReason::Enumeration { message, .. } => {
                write!(f, "cannot enumerate directory '{path}': {message}")
            }
        }
    }
}

/// Something that happened during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// The root could not be opened; nothing else follows.
    RootUnavailable {
        /// The root as requested.
        path: PathBuf,
        /// Why it could not be opened.
        message: String,
    },
    /// An entry matched and its owner was (or would be) replaced.
    OwnerChanged {
        /// The entry.
        path: PathBuf,
        /// File or directory.
        kind: EntryKind,
        /// Label of the new owner.
        owner: String,
    },
    /// An entry or listing failed and was skipped.
    EntryFailed(EntryFailure),
    /// A directory was popped and its children handled.
    DirectoryProcessed(RunStats),
}

/// Receives run events as they happen.
pub trait Reporter {
    /// Handles one event.
    fn report(&mut self, event: &RunEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _event: &RunEvent) {}
}

/// Keeps every event in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    /// Events received so far.
    pub events: Vec<RunEvent>,
}

impl RecordingReporter {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths of all `OwnerChanged` events, in order.
    #[must_use]
    pub fn changed_paths(&self) -> Vec<PathBuf> {
        self.events
            .iter()
            .filter_map(|event| match event {
                RunEvent::OwnerChanged { path, .. } => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    /// All failures, in order.
    #[must_use]
    pub fn failures(&self) -> Vec<&EntryFailure> {
        self.events
            .iter()
            .filter_map(|event| match event {
                RunEvent::EntryFailed(failure) => Some(failure),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, event: &RunEvent) {
        self.events.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str) -> Entry {
        Entry::new(path, EntryKind::File, Attributes::ARCHIVE)
    }

    #[test]
    fn test_unknown_attributes_message() {
        let failure = EntryFailure::unknown_attributes(&file("/d/x"), Attributes::ENCRYPTED);
        assert_eq!(
            failure.to_string(),
            "unknown attributes on file '/d/x': encrypted"
        );
    }

    #[test]
    fn test_owner_failure_messages_differ_by_class() {
        let generic = EntryFailure::owner(
            &file("/d/x"),
            OwnerError::Io {
                kind: io::ErrorKind::PermissionDenied,
                message: "Permission denied".to_string(),
            },
        );
        assert_eq!(
            generic.to_string(),
            "failed processing file '/d/x': Permission denied"
        );
        assert!(!generic.is_unrepresentable_owner());

        let narrow = EntryFailure::owner(
            &file("/d/x"),
            OwnerError::Unrepresentable {
                owner: "S-1-5-21-1-2".to_string(),
            },
        );
        assert!(narrow
            .to_string()
            .starts_with("unrepresentable owner processing file '/d/x'"));
        assert!(narrow.is_unrepresentable_owner());
    }

    #[test]
    fn test_enumeration_message() {
        let dir = Entry::new("/d", EntryKind::Directory, Attributes::DIRECTORY);
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        let failure = EntryFailure::enumeration(&dir, &err);
        assert_eq!(failure.to_string(), "cannot enumerate directory '/d': nope");
    }

    #[test]
    fn test_recording_reporter_helpers() {
        let mut recorder = RecordingReporter::new();
        recorder.report(&RunEvent::OwnerChanged {
            path: PathBuf::from("/d/a"),
            kind: EntryKind::File,
            owner: "NEW".to_string(),
        });
        recorder.report(&RunEvent::EntryFailed(EntryFailure::unknown_attributes(
            &file("/d/b"),
            Attributes::OFFLINE,
        )));
        recorder.report(&RunEvent::DirectoryProcessed(RunStats::default()));

        assert_eq!(recorder.events.len(), 3);
        assert_eq!(recorder.changed_paths(), vec![PathBuf::from("/d/a")]);
        assert_eq!(recorder.failures().len(), 1);
    }
}
