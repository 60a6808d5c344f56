//! Filesystem attribute bits and the pre-mutation attribute check.
//!
//! Bit values follow the conventional file attribute encoding so that
//! masks read the same on every backend.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use serde::Serialize;

/// A file attribute bitmask.
///
/// # Examples
///
/// ```
/// use reowner::Attributes;
///
/// let attrs = Attributes::DIRECTORY | Attributes::HIDDEN;
/// assert!(attrs.contains(Attributes::DIRECTORY));
/// assert!(!attrs.is_reparse_point());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Attributes(u32);

impl Attributes {
    /// No attributes.
    pub const EMPTY: Self = Self(0);
    /// Read-only.
    pub const READONLY: Self = Self(0x0001);
    /// Hidden from ordinary listings.
    pub const HIDDEN: Self = Self(0x0002);
    /// Used by the operating system.
    pub const SYSTEM: Self = Self(0x0004);
    /// A directory.
    pub const DIRECTORY: Self = Self(0x0010);
    /// Marked for backup.
    pub const ARCHIVE: Self = Self(0x0020);
    /// Device nodes, FIFOs and sockets.
    pub const DEVICE: Self = Self(0x0040);
    /// Explicitly no other attributes.
    pub const NORMAL: Self = Self(0x0080);
    /// Temporary storage.
    pub const TEMPORARY: Self = Self(0x0100);
    /// Sparse file.
    pub const SPARSE_FILE: Self = Self(0x0200);
    /// Symbolic links and junctions.
    pub const REPARSE_POINT: Self = Self(0x0400);
    /// Compressed by the filesystem.
    pub const COMPRESSED: Self = Self(0x0800);
    /// Data moved to offline storage.
    pub const OFFLINE: Self = Self(0x1000);
    /// Excluded from content indexing.
    pub const NOT_CONTENT_INDEXED: Self = Self(0x2000);
    /// Encrypted by the filesystem.
    pub const ENCRYPTED: Self = Self(0x4000);

    /// Bits an entry may carry and still have its owner changed.
    pub const ALLOWED: Self = Self(
        Self::READONLY.0
            | Self::HIDDEN.0
            | Self::SYSTEM.0
            | Self::DIRECTORY.0
            | Self::ARCHIVE.0
            | Self::NOT_CONTENT_INDEXED.0
            | Self::TEMPORARY.0
            | Self::REPARSE_POINT.0,
    );

    const NAMES: [(Self, &'static str); 14] = [
        (Self::READONLY, "readonly"),
        (Self::HIDDEN, "hidden"),
        (Self::SYSTEM, "system"),
        (Self::DIRECTORY, "directory"),
        (Self::ARCHIVE, "archive"),
        (Self::DEVICE, "device"),
        (Self::NORMAL, "normal"),
        (Self::TEMPORARY, "temporary"),
        (Self::SPARSE_FILE, "sparse"),
        (Self::REPARSE_POINT, "reparse-point"),
        (Self::COMPRESSED, "compressed"),
        (Self::OFFLINE, "offline"),
        (Self::NOT_CONTENT_INDEXED, "not-content-indexed"),
        (Self::ENCRYPTED, "encrypted"),
    ];

    /// Wraps raw attribute bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether every bit of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no bit is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether the entry is a symbolic link or junction.
    #[must_use]
    pub const fn is_reparse_point(self) -> bool {
        self.contains(Self::REPARSE_POINT)
    }

    /// Whether the entry is a directory.
    #[must_use]
    pub const fn is_directory(self) -> bool {
        self.contains(Self::DIRECTORY)
    }

    /// The bits outside [`Attributes::ALLOWED`].
    #[must_use]
    pub const fn unexpected(self) -> Self {
        Self(self.0 & !Self::ALLOWED.0)
    }
}

impl BitOr for Attributes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Attributes {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Attributes {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for Attributes {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut remaining = *self;
        let mut first = true;
        for (flag, name) in Self::NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
                remaining = remaining & !flag;
            }
        }
        if !remaining.is_empty() {
            if !first {
                f.write_str("|")?;
            }
            write!(f, "{:#x}", remaining.0)?;
        }
        Ok(())
    }
}

/// Rejects entries carrying attribute bits outside the allow-list.
///
/// Nothing is modified. On rejection the unexpected bits are returned so
/// the caller can report them.
///
/// # Errors
///
/// Returns the leftover bits when any bit outside
/// [`Attributes::ALLOWED`] is set.
///
/// # Examples
///
/// ```
/// use reowner::attributes::check_attributes;
/// use reowner::Attributes;
///
/// assert!(check_attributes(Attributes::ARCHIVE | Attributes::HIDDEN).is_ok());
/// assert_eq!(
///     check_attributes(Attributes::ARCHIVE | Attributes::ENCRYPTED),
///     Err(Attributes::ENCRYPTED)
/// );
/// ```
pub fn check_attributes(attributes: Attributes) -> Result<(), Attributes> {
    let unexpected = attributes.unexpected();
    if unexpected.is_empty() {
        Ok(())
    } else {
        Err(unexpected)
    }
}
