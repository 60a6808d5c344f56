//! An in-memory filesystem tree.
//!
//! Used by tests, property tests and benchmarks to drive the walker over
//! trees that would be awkward to build on disk: foreign owners, links,
//! unknown attribute bits and injected I/O failures.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use super::{Entry, EntryKind, Filesystem, Listing, OwnerError};
use crate::attributes::Attributes;
use crate::identity::Sid;

#[derive(Debug, Clone)]
struct Node {
    kind: EntryKind,
    attributes: Attributes,
    owner: Sid,
    read_error: Option<OwnerError>,
    write_error: Option<OwnerError>,
    listing_error: Option<io::ErrorKind>,
}

/// [`Filesystem`] over an in-memory tree of absolute paths.
///
/// # Examples
///
/// ```
/// use reowner::fs::{Filesystem, MemoryFilesystem};
/// use reowner::identity::Sid;
///
/// let old = Sid::unix_user(1);
/// let fs = MemoryFilesystem::new("/data", old.clone())
///     .with_file("/data/a.txt", old.clone())
///     .with_dir("/data/sub", old.clone());
///
/// let root = fs.open_dir("/data".as_ref()).unwrap();
/// let listing = fs.list(&root).unwrap();
/// assert_eq!(listing.files.len(), 1);
/// assert_eq!(listing.directories.len(), 1);
/// ```
#[derive(Debug)]
pub struct MemoryFilesystem {
    nodes: RefCell<BTreeMap<PathBuf, Node>>,
    writes: Cell<usize>,
}

impl MemoryFilesystem {
    /// Creates a tree holding only the directory `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, owner: Sid) -> Self {
        let fs = Self {
            nodes: RefCell::new(BTreeMap::new()),
            writes: Cell::new(0),
        };
        fs.insert(root.into(), EntryKind::Directory, Attributes::DIRECTORY, owner);
        fs
    }

    fn insert(&self, path: PathBuf, kind: EntryKind, attributes: Attributes, owner: Sid) {
        self.nodes.borrow_mut().insert(
            path,
            Node {
                kind,
                attributes,
                owner,
                read_error: None,
                write_error: None,
                listing_error: None,
            },
        );
    }

    fn update(&self, path: &Path, f: impl FnOnce(&mut Node)) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(path) {
            f(node);
        }
    }

    /// Adds a regular file.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, owner: Sid) -> Self {
        self.insert(path.into(), EntryKind::File, Attributes::ARCHIVE, owner);
        self
    }

    /// Adds a directory.
    #[must_use]
    pub fn with_dir(self, path: impl Into<PathBuf>, owner: Sid) -> Self {
        self.insert(path.into(), EntryKind::Directory, Attributes::DIRECTORY, owner);
        self
    }

    /// Adds a directory link. Children added beneath it are reachable only
    /// by following the link.
    #[must_use]
    pub fn with_link_dir(self, path: impl Into<PathBuf>, owner: Sid) -> Self {
        self.insert(
            path.into(),
            EntryKind::Directory,
            Attributes::DIRECTORY | Attributes::REPARSE_POINT,
            owner,
        );
        self
    }

    /// Adds extra attribute bits to an existing entry.
    #[must_use]
    pub fn with_attributes(self, path: impl AsRef<Path>, extra: Attributes) -> Self {
        self.update(path.as_ref(), |node| node.attributes |= extra);
        self
    }

    /// Makes reading the owner of `path` fail.
    #[must_use]
    pub fn with_owner_read_error(self, path: impl AsRef<Path>, error: OwnerError) -> Self {
        self.update(path.as_ref(), |node| node.read_error = Some(error));
        self
    }

    /// Makes writing the owner of `path` fail.
    #[must_use]
    pub fn with_owner_write_error(self, path: impl AsRef<Path>, error: OwnerError) -> Self {
        self.update(path.as_ref(), |node| node.write_error = Some(error));
        self
    }

    /// Makes listing the directory `path` fail.
    #[must_use]
    pub fn with_listing_error(self, path: impl AsRef<Path>, kind: io::ErrorKind) -> Self {
        self.update(path.as_ref(), |node| node.listing_error = Some(kind));
        self
    }

    /// The current owner of `path`, if it exists.
    #[must_use]
    pub fn owner_of(&self, path: impl AsRef<Path>) -> Option<Sid> {
        self.nodes
            .borrow()
            .get(path.as_ref())
            .map(|node| node.owner.clone())
    }

    /// Number of successful owner writes so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    fn children(&self, dir: &Entry) -> io::Result<Listing> {
        let nodes = self.nodes.borrow();
        let node = nodes.get(&dir.path).ok_or_else(|| not_found(&dir.path))?;
        if let Some(kind) = node.listing_error {
            return Err(io::Error::new(
                kind,
                format!("cannot enumerate {}", dir.path.display()),
            ));
        }
        let mut listing = Listing::default();
        nodes
            .iter()
            .filter(|(path, _)| path.parent() == Some(dir.path.as_path()))
            .for_each(|(path, child)| {
                listing.push(Entry::new(path.clone(), child.kind, child.attributes));
            });
        Ok(listing)
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{} does not exist", path.display()),
    )
}

impl Filesystem for MemoryFilesystem {
    fn open_dir(&self, path: &Path) -> io::Result<Entry> {
        let nodes = self.nodes.borrow();
        let node = nodes.get(path).ok_or_else(|| not_found(path))?;
        if node.kind != EntryKind::Directory {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", path.display()),
            ));
        }
        Ok(Entry::new(path, EntryKind::Directory, node.attributes))
    }

    fn list(&self, dir: &Entry) -> io::Result<Listing> {
        self.children(dir)
    }

    fn owner(&self, entry: &Entry) -> Result<Sid, OwnerError> {
        let nodes = self.nodes.borrow();
        let node = nodes.get(&entry.path).ok_or_else(|| not_found(&entry.path))?;
        match &node.read_error {
            Some(err) => Err(err.clone()),
            None => Ok(node.owner.clone()),
        }
    }

    fn set_owner(&self, entry: &Entry, owner: &Sid) -> Result<(), OwnerError> {
        let mut nodes = self.nodes.borrow_mut();
        let node = nodes
            .get_mut(&entry.path)
            .ok_or_else(|| not_found(&entry.path))?;
        if let Some(err) = &node.write_error {
            return Err(err.clone());
        }
        node.owner = owner.clone();
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
