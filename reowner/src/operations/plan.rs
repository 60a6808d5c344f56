//! Run planning: everything that happens before the first directory is opened.
//!
//! A plan resolves both owner strings once, normalizes the root and fixes
//! the dry-run flag. Executing it walks the tree.

use std::path::{Path, PathBuf};

use crate::config::RunConfig;
use crate::error::Result;
use crate::fs::Filesystem;
use crate::identity::{resolve, IdentityResolver, IdentitySpec};
use crate::logging::Logger;
use crate::path::normalize;

use super::mutate::OwnerMutator;
use super::report::Reporter;
use super::stats::RunSummary;
use super::walker::TreeWalker;

/// A validated run, ready to execute.
///
/// # Examples
///
/// ```
/// use reowner::config::{OutputFormat, RunConfig};
/// use reowner::fs::MemoryFilesystem;
/// use reowner::identity::{Sid, StaticResolver};
/// use reowner::operations::{OwnershipPlan, RecordingReporter};
/// use reowner::Logger;
///
/// let config = RunConfig {
///     root: "/data".into(),
///     to: "alice".to_string(),
///     from: Some("S-1-22-1-1000".to_string()),
///     dry_run: true,
///     output_format: OutputFormat::Human,
/// };
/// let resolver = StaticResolver::new().with_account("alice", Sid::unix_user(1001));
/// let plan = OwnershipPlan::build(&config, &resolver).unwrap();
///
/// let fs = MemoryFilesystem::new("/data", Sid::unix_user(1000));
/// let mut reporter = RecordingReporter::new();
/// let summary = plan.execute(&fs, &mut reporter, Logger::default());
/// assert_eq!(summary.stats.changed, 1);
/// assert_eq!(fs.write_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct OwnershipPlan {
    root: PathBuf,
    mutator: OwnerMutator,
}

impl OwnershipPlan {
    /// Resolve identities and normalize the root.
    ///
    /// # Errors
    ///
    /// Returns an error if either owner string is malformed or names an
    /// unknown account, or the root cannot be normalized.
    pub fn build(config: &RunConfig, resolver: &dyn IdentityResolver) -> Result<Self> {
        let from = config
            .from
            .as_deref()
            .map(|from| resolve(from, resolver))
            .transpose()?;
        let to = resolve(&config.to, resolver)?;
        let root = normalize(&config.root)?;

        Ok(Self {
            root,
            mutator: OwnerMutator::new(from, to, config.dry_run),
        })
    }

    /// One line per owner string describing how it was classified.
    ///
    /// Classification needs no resolver, so this works even when
    /// [`OwnershipPlan::build`] would fail on an unknown account.
    ///
    /// # Errors
    ///
    /// Returns an error if an owner string is empty or malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use reowner::config::{OutputFormat, RunConfig};
    /// use reowner::operations::OwnershipPlan;
    ///
    /// let config = RunConfig {
    ///     root: "/data".into(),
    ///     to: "S-1-5-21-1-2-3".to_string(),
    ///     from: Some("olduser".to_string()),
    ///     dry_run: false,
    ///     output_format: OutputFormat::Human,
    /// };
    /// assert_eq!(
    ///     OwnershipPlan::describe_owners(&config).unwrap(),
    ///     vec![
    ///         "Current owner 'olduser' is an account name".to_string(),
    ///         "New owner 'S-1-5-21-1-2-3' is a SID".to_string(),
    ///     ]
    /// );
    /// ```
    pub fn describe_owners(config: &RunConfig) -> Result<Vec<String>> {
        let mut lines = Vec::with_capacity(2);
        if let Some(from) = config.from.as_deref() {
            let spec = IdentitySpec::classify(from)?;
            lines.push(format!("Current owner '{from}' is {}", spec.kind_name()));
        }
        let spec = IdentitySpec::classify(&config.to)?;
        lines.push(format!("New owner '{}' is {}", config.to, spec.kind_name()));
        Ok(lines)
    }

    /// The normalized traversal root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The mutator every entry is handed to.
    #[must_use]
    pub fn mutator(&self) -> &OwnerMutator {
        &self.mutator
    }

    /// Walk the tree.
    pub fn execute<F>(&self, fs: &F, reporter: &mut dyn Reporter, logger: Logger) -> RunSummary
    where
        F: Filesystem + ?Sized,
    {
        logger.info(&format!(
            "walking {} (target owner {})",
            self.root.display(),
            self.mutator.target()
        ));
        TreeWalker::new(fs, self.mutator.clone())
            .with_logger(logger)
            .run(&self.root, reporter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::fs::MemoryFilesystem;
    use crate::identity::{Sid, StaticResolver};
    use crate::operations::RecordingReporter;
    use crate::Error;

    fn config(to: &str, from: Option<&str>) -> RunConfig {
        RunConfig {
            root: PathBuf::from("/data/./sub/.."),
            to: to.to_string(),
            from: from.map(str::to_string),
            dry_run: false,
            output_format: OutputFormat::Human,
        }
    }

    fn resolver() -> StaticResolver {
        StaticResolver::new()
            .with_account("alice", Sid::unix_user(1001))
            .with_account("bob", Sid::unix_user(1002))
    }

    #[test]
    fn test_build_resolves_accounts() {
        let plan = OwnershipPlan::build(&config("alice", Some("bob")), &resolver()).unwrap();
        assert_eq!(*plan.mutator().target(), Sid::unix_user(1001));
        assert_eq!(*plan.mutator().source().unwrap(), Sid::unix_user(1002));
        assert_eq!(plan.mutator().target().label(), "alice");
    }

    #[test]
    #[cfg(unix)]
    fn test_build_normalizes_root() {
        let plan = OwnershipPlan::build(&config("alice", None), &resolver()).unwrap();
        assert_eq!(plan.root(), Path::new("/data"));
        assert!(plan.mutator().source().is_none());
    }

    #[test]
    fn test_build_unknown_account() {
        let err = OwnershipPlan::build(&config("carol", None), &resolver()).unwrap_err();
        assert!(matches!(err, Error::UnknownAccount { .. }));
    }

    #[test]
    fn test_sid_strings_skip_resolver() {
        let plan = OwnershipPlan::build(
            &config("S-1-22-1-7", Some("S-1-22-1-8")),
            &StaticResolver::new(),
        )
        .unwrap();
        assert_eq!(*plan.mutator().target(), Sid::unix_user(7));
    }

    #[test]
    fn test_describe_owners_without_from() {
        let lines = OwnershipPlan::describe_owners(&config("alice", None)).unwrap();
        assert_eq!(lines, vec!["New owner 'alice' is an account name".to_string()]);
    }

    #[test]
    #[cfg(unix)]
    fn test_execute_walks_normalized_root() {
        let plan = OwnershipPlan::build(&config("alice", Some("bob")), &resolver()).unwrap();
        let fs = MemoryFilesystem::new("/data", Sid::unix_user(1002))
            .with_file("/data/x", Sid::unix_user(1002))
            .with_file("/data/y", Sid::unix_user(5));
        let mut reporter = RecordingReporter::new();

        let summary = plan.execute(&fs, &mut reporter, Logger::default());
        assert!(summary.root_opened);
        assert_eq!(summary.root, PathBuf::from("/data"));
        assert_eq!(summary.stats.changed, 2);
        assert_eq!(fs.owner_of("/data/x"), Some(Sid::unix_user(1001)));
        assert_eq!(fs.owner_of("/data/y"), Some(Sid::unix_user(5)));
    }
}
