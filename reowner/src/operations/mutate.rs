//! Owner match-and-replace for a single entry.

use crate::attributes::check_attributes;
use crate::fs::{Entry, EntryKind, Filesystem};
use crate::identity::Identity;

use super::report::EntryFailure;

/// Decides, for one entry at a time, whether its owner is replaced.
///
/// An entry matches when no source owner was given or its current owner
/// equals the source owner. A matching entry gets the target owner unless
/// the mutator is in dry-run mode; either way it counts as changed.
///
/// # Examples
///
/// ```
/// use reowner::fs::{Filesystem, MemoryFilesystem};
/// use reowner::identity::{Identity, Sid};
/// use reowner::operations::{Outcome, OwnerMutator};
///
/// let old = Sid::unix_user(1);
/// let fs = MemoryFilesystem::new("/data", old.clone()).with_file("/data/a", old.clone());
/// let root = fs.open_dir("/data".as_ref()).unwrap();
/// let file = fs.list(&root).unwrap().files.remove(0);
///
/// let mutator = OwnerMutator::new(
///     Some(Identity::from_sid(old)),
///     Identity::with_label(Sid::unix_user(2), "NEW"),
///     false,
/// );
/// assert_eq!(mutator.apply(&fs, &file).unwrap(), Outcome::Changed);
/// assert_eq!(fs.owner_of("/data/a"), Some(Sid::unix_user(2)));
/// ```
#[derive(Debug, Clone)]
pub struct OwnerMutator {
    from: Option<Identity>,
    to: Identity,
    dry_run: bool,
}

impl OwnerMutator {
    /// Creates a mutator. `from == None` matches every owner.
    #[must_use]
    pub fn new(from: Option<Identity>, to: Identity, dry_run: bool) -> Self {
        Self { from, to, dry_run }
    }

    /// The source owner, if any.
    #[must_use]
    pub fn source(&self) -> Option<&Identity> {
        self.from.as_ref()
    }

    /// The target owner.
    #[must_use]
    pub fn target(&self) -> &Identity {
        &self.to
    }

    /// Whether writes are suppressed.
    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Applies the match-and-replace rule to `entry`.
    ///
    /// A match counts as changed before the write is attempted, so a
    /// failed write yields [`Outcome::WriteFailed`] rather than an error.
    /// Directory links return [`Outcome::Untouched`] without their owner
    /// being read.
    ///
    /// # Errors
    ///
    /// Returns an [`EntryFailure`] when the entry carries unexpected
    /// attributes or its owner cannot be read.
    pub fn apply<F>(&self, fs: &F, entry: &Entry) -> Result<Outcome, EntryFailure>
    where
        F: Filesystem + ?Sized,
    {
        check_attributes(entry.attributes)
            .map_err(|bits| EntryFailure::unknown_attributes(entry, bits))?;

        // The walker never hands over directory links, but attributes may
        // have changed between discovery and now.
        if entry.kind == EntryKind::Directory && entry.is_reparse_point() {
            return Ok(Outcome::Untouched);
        }

        let current = fs
            .owner(entry)
            .map_err(|err| EntryFailure::owner(entry, err))?;
        let matches = self.from.as_ref().map_or(true, |from| *from == current);
        if !matches {
            return Ok(Outcome::Untouched);
        }

        if self.dry_run {
            return Ok(Outcome::Changed);
        }
        match fs.set_owner(entry, self.to.sid()) {
            Ok(()) => Ok(Outcome::Changed),
            Err(err) => Ok(Outcome::WriteFailed(EntryFailure::owner(entry, err))),
        }
    }
}

/// What [`OwnerMutator::apply`] did with one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The owner did not match, or the entry is a directory link.
    Untouched,
    /// The owner matched and the target was written, or would have been.
    Changed,
    /// The owner matched but writing the target failed.
    WriteFailed(EntryFailure),
}

impl Outcome {
    /// Whether the entry's owner matched the source owner.
    #[must_use]
    pub fn is_match(&self) -> bool {
        !matches!(self, Self::Untouched)
    }
}
