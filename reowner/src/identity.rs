//! Owner identities: classification, parsing and resolution.
//!
//! Owner strings come in two forms. A string shaped like a raw security
//! identifier (`S-1-22-1-1000`) is parsed directly; anything else is an
//! account name that the host resolves. Both end up as an [`Identity`]
//! whose equality is decided by its [`Sid`] alone, so an account name and
//! the identifier it resolves to compare equal.
//!
//! # Examples
//!
//! ```
//! use reowner::identity::{resolve, IdentitySpec, Sid, StaticResolver};
//!
//! let spec = IdentitySpec::classify("S-1-22-1-1000").unwrap();
//! assert!(spec.is_sid());
//!
//! let resolver = StaticResolver::new().with_account("alice", Sid::unix_user(1000));
//! let by_name = resolve("alice", &resolver).unwrap();
//! let by_sid = resolve("S-1-22-1-1000", &resolver).unwrap();
//! assert_eq!(by_name, by_sid);
//! assert_eq!(by_name.to_string(), "alice");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Pattern a raw security identifier string must match.
const SID_PATTERN: &str = r"^S-\d-\d+-(\d+-){1,14}\d+$";

/// Identifier authorities are 48-bit values.
const MAX_AUTHORITY: u64 = 0xFFFF_FFFF_FFFF;

/// Authority and leading sub-authority of the "Unix user" identifier family.
const UNIX_USER_AUTHORITY: u64 = 22;
const UNIX_USER_RID: u32 = 1;

fn sid_regex() -> &'static Regex {
    static SID_RE: OnceLock<Regex> = OnceLock::new();
    SID_RE.get_or_init(|| Regex::new(SID_PATTERN).expect("SID pattern is a valid regex"))
}

/// A parsed security identifier.
///
/// `Display` renders the canonical `S-R-A-S1-...-Sn` text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sid {
    revision: u8,
    authority: u64,
    sub_authorities: Vec<u32>,
}

impl Sid {
    /// Builds an identifier from its parts.
    #[must_use]
    pub fn new(revision: u8, authority: u64, sub_authorities: Vec<u32>) -> Self {
        Self {
            revision,
            authority,
            sub_authorities,
        }
    }

    /// The identifier for a Unix user id (`S-1-22-1-<uid>`).
    ///
    /// ```
    /// use reowner::identity::Sid;
    ///
    /// assert_eq!(Sid::unix_user(0).to_string(), "S-1-22-1-0");
    /// ```
    #[must_use]
    pub fn unix_user(uid: u32) -> Self {
        Self::new(1, UNIX_USER_AUTHORITY, vec![UNIX_USER_RID, uid])
    }

    /// Returns the Unix user id if this identifier belongs to the Unix user family.
    #[must_use]
    pub fn as_unix_uid(&self) -> Option<u32> {
        match (self.revision, self.authority, self.sub_authorities.as_slice()) {
            (1, UNIX_USER_AUTHORITY, [UNIX_USER_RID, uid]) => Some(*uid),
            _ => None,
        }
    }

    /// Parses a string of raw identifier shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentity`] if the string does not match the
    /// identifier pattern or a component overflows.
    pub fn parse(value: &str) -> Result<Self> {
        if !sid_regex().is_match(value) {
            return Err(invalid(value, "not a security identifier"));
        }

        // The pattern guarantees "S" followed by dash-separated digit runs.
        let mut parts = value.split('-').skip(1);
        let revision = parts
            .next()
            .and_then(|p| p.parse::<u8>().ok())
            .ok_or_else(|| invalid(value, "bad revision"))?;
        let authority = parts
            .next()
            .and_then(|p| p.parse::<u64>().ok())
            .filter(|a| *a <= MAX_AUTHORITY)
            .ok_or_else(|| invalid(value, "identifier authority out of range"))?;
        let sub_authorities = parts
            .map(|p| p.parse::<u32>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| invalid(value, "sub-authority out of range"))?;

        Ok(Self::new(revision, authority, sub_authorities))
    }
}

impl fmt::Display for Sid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}-{}", self.revision, self.authority)?;
        for sub in &self.sub_authorities {
            write!(f, "-{sub}")?;
        }
        Ok(())
    }
}

impl FromStr for Sid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn invalid(value: &str, reason: &str) -> Error {
    Error::InvalidIdentity {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// How an owner string was interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySpec {
    /// A raw security identifier.
    Sid(Sid),
    /// A display name to be resolved by the host.
    Account(String),
}

impl IdentitySpec {
    /// Classifies an owner string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentity`] for an empty string, or for a
    /// string of identifier shape whose numbers do not fit.
    pub fn classify(value: &str) -> Result<Self> {
        if value.trim().is_empty() {
            return Err(invalid(value, "owner must not be empty"));
        }
        if sid_regex().is_match(value) {
            Sid::parse(value).map(Self::Sid)
        } else {
            Ok(Self::Account(value.to_string()))
        }
    }

    /// Whether the string was a raw identifier.
    #[must_use]
    pub fn is_sid(&self) -> bool {
        matches!(self, Self::Sid(_))
    }

    /// Short human description of the form, for console output.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Sid(_) => "a SID",
            Self::Account(_) => "an account name",
        }
    }
}

/// A resolved owner: the identifier plus the text the user supplied.
///
/// Two identities are equal when their identifiers are equal.
#[derive(Debug, Clone)]
pub struct Identity {
    sid: Sid,
    label: String,
}

impl Identity {
    /// Wraps an identifier, labelled with its own canonical text.
    #[must_use]
    pub fn from_sid(sid: Sid) -> Self {
        let label = sid.to_string();
        Self { sid, label }
    }

    /// Wraps an identifier with a user-facing label.
    #[must_use]
    pub fn with_label(sid: Sid, label: impl Into<String>) -> Self {
        Self {
            sid,
            label: label.into(),
        }
    }

    /// The identifier.
    #[must_use]
    pub fn sid(&self) -> &Sid {
        &self.sid
    }

    /// The label shown in reports.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.sid == other.sid
    }
}

impl Eq for Identity {}

impl PartialEq<Sid> for Identity {
    fn eq(&self, other: &Sid) -> bool {
        &self.sid == other
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Resolves account names to identifiers.
pub trait IdentityResolver {
    /// Looks up an account by display name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAccount`] if no such account exists, or an
    /// error from the underlying account database.
    fn lookup_account(&self, name: &str) -> Result<Sid>;
}

/// Resolves account names against the host's account database.
///
/// On Unix, names are looked up in the user database and mapped to the
/// `S-1-22-1-<uid>` family. A purely numeric name that is not a known
/// account is taken as a uid, as `chown` does.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostResolver;

impl HostResolver {
    /// Creates a host resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[cfg(unix)]
impl IdentityResolver for HostResolver {
    fn lookup_account(&self, name: &str) -> Result<Sid> {
        let user = nix::unistd::User::from_name(name)
            .map_err(|e| Error::Io(std::io::Error::from(e)))?;
        match user {
            Some(user) => Ok(Sid::unix_user(user.uid.as_raw())),
            None => name
                .parse::<u32>()
                .map(Sid::unix_user)
                .map_err(|_| Error::UnknownAccount {
                    name: name.to_string(),
                }),
        }
    }
}

#[cfg(not(unix))]
impl IdentityResolver for HostResolver {
    fn lookup_account(&self, name: &str) -> Result<Sid> {
        Err(Error::Unsupported {
            operation: format!("account lookup for '{name}'"),
        })
    }
}

/// A fixed name-to-identifier table.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    accounts: HashMap<String, Sid>,
}

impl StaticResolver {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an account.
    #[must_use]
    pub fn with_account(mut self, name: impl Into<String>, sid: Sid) -> Self {
        self.accounts.insert(name.into(), sid);
        self
    }
}

impl IdentityResolver for StaticResolver {
    fn lookup_account(&self, name: &str) -> Result<Sid> {
        self.accounts
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownAccount {
                name: name.to_string(),
            })
    }
}

/// Classifies `value` and resolves it to an [`Identity`].
///
/// The identity's label is the string as supplied.
///
/// # Errors
///
/// Returns an error if the string is empty, malformed, or names an
/// unknown account.
pub fn resolve(value: &str, resolver: &dyn IdentityResolver) -> Result<Identity> {
    let sid = match IdentitySpec::classify(value)? {
        IdentitySpec::Sid(sid) => sid,
        IdentitySpec::Account(name) => resolver.lookup_account(&name)?,
    };
    Ok(Identity::with_label(sid, value))
}
