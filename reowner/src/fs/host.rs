//! The real filesystem.
//!
//! On Unix an entry's owner is its uid, exposed as `S-1-22-1-<uid>`.
//! Symbolic links carry the reparse-point bit and are never followed when
//! reading or writing owners.

use std::fs::{self, DirEntry, FileType, Metadata};
use std::io;
use std::path::Path;

use super::{Entry, EntryKind, Filesystem, Listing, OwnerError};
use crate::attributes::Attributes;
use crate::identity::Sid;

/// [`Filesystem`] backed by the host operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFilesystem;

impl HostFilesystem {
    /// Creates a host filesystem handle.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn list_children(dir: &Entry) -> io::Result<Listing> {
        let mut listing = Listing::default();
        for item in fs::read_dir(&dir.path)? {
            listing.push(Self::describe(&item?));
        }
        listing.files.sort_by(|a, b| a.path.cmp(&b.path));
        listing.directories.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(listing)
    }

    /// Classifies one listed child.
    ///
    /// A child that cannot be stat'ed (usually because it vanished after the
    /// listing) keeps the type the listing reported and no other attributes.
    fn describe(item: &DirEntry) -> Entry {
        let path = item.path();
        match fs::symlink_metadata(&path) {
            Ok(meta) => {
                let kind = kind_of(&path, meta.file_type());
                let attributes = attributes_of(&path, &meta, kind);
                Entry::new(path, kind, attributes)
            }
            Err(_) => {
                let kind = item
                    .file_type()
                    .map_or(EntryKind::File, |file_type| kind_of(&path, file_type));
                let attributes = match kind {
                    EntryKind::Directory => Attributes::DIRECTORY,
                    EntryKind::File => Attributes::EMPTY,
                };
                Entry::new(path, kind, attributes)
            }
        }
    }
}

fn kind_of(path: &Path, file_type: FileType) -> EntryKind {
    if file_type.is_dir() || (file_type.is_symlink() && points_to_dir(path)) {
        EntryKind::Directory
    } else {
        EntryKind::File
    }
}

fn points_to_dir(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

#[cfg_attr(windows, allow(dead_code))]
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

#[cfg(unix)]
fn attributes_of(path: &Path, meta: &Metadata, kind: EntryKind) -> Attributes {
    use std::os::unix::fs::FileTypeExt;

    let file_type = meta.file_type();
    let mut attrs = Attributes::EMPTY;
    if kind == EntryKind::Directory {
        attrs |= Attributes::DIRECTORY;
    }
    if file_type.is_symlink() {
        attrs |= Attributes::REPARSE_POINT;
    } else if meta.permissions().readonly() {
        attrs |= Attributes::READONLY;
    }
    if file_type.is_fifo()
        || file_type.is_socket()
        || file_type.is_char_device()
        || file_type.is_block_device()
    {
        attrs |= Attributes::DEVICE;
    }
    if is_hidden(path) {
        attrs |= Attributes::HIDDEN;
    }
    attrs
}

#[cfg(windows)]
fn attributes_of(_path: &Path, meta: &Metadata, _kind: EntryKind) -> Attributes {
    use std::os::windows::fs::MetadataExt;

    Attributes::from_bits(meta.file_attributes())
}

#[cfg(not(any(unix, windows)))]
fn attributes_of(path: &Path, meta: &Metadata, kind: EntryKind) -> Attributes {
    let mut attrs = Attributes::EMPTY;
    if kind == EntryKind::Directory {
        attrs |= Attributes::DIRECTORY;
    }
    if meta.file_type().is_symlink() {
        attrs |= Attributes::REPARSE_POINT;
    } else if meta.permissions().readonly() {
        attrs |= Attributes::READONLY;
    }
    if is_hidden(path) {
        attrs |= Attributes::HIDDEN;
    }
    attrs
}

impl Filesystem for HostFilesystem {
    fn open_dir(&self, path: &Path) -> io::Result<Entry> {
        let meta = fs::symlink_metadata(path)?;
        if kind_of(path, meta.file_type()) != EntryKind::Directory {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", path.display()),
            ));
        }
        let attributes = attributes_of(path, &meta, EntryKind::Directory);
        Ok(Entry::new(path, EntryKind::Directory, attributes))
    }

    fn list(&self, dir: &Entry) -> io::Result<Listing> {
        Self::list_children(dir)
    }

    #[cfg(unix)]
    fn owner(&self, entry: &Entry) -> Result<Sid, OwnerError> {
        use std::os::unix::fs::MetadataExt;

        let meta = fs::symlink_metadata(&entry.path)?;
        Ok(Sid::unix_user(meta.uid()))
    }

    #[cfg(unix)]
    fn set_owner(&self, entry: &Entry, owner: &Sid) -> Result<(), OwnerError> {
        let uid = owner
            .as_unix_uid()
            .ok_or_else(|| OwnerError::Unrepresentable {
                owner: owner.to_string(),
            })?;
        std::os::unix::fs::lchown(&entry.path, Some(uid), None)?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn owner(&self, _entry: &Entry) -> Result<Sid, OwnerError> {
        Err(unsupported())
    }

    #[cfg(not(unix))]
    fn set_owner(&self, _entry: &Entry, _owner: &Sid) -> Result<(), OwnerError> {
        Err(unsupported())
    }
}

#[cfg(not(unix))]
fn unsupported() -> OwnerError {
    OwnerError::Io {
        kind: io::ErrorKind::Unsupported,
        message: "owner access is not supported on this platform".to_string(),
    }
}
