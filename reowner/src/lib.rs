#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # reowner
//!
//! A library for reassigning the owner of every file and directory in a
//! tree.
//!
//! The walk is iterative and visits each directory once. Directory links
//! are counted and skipped, never followed. Entries carrying unexpected
//! attribute bits are refused. A failure on one entry or one directory
//! listing is reported and the walk moves on.
//!
//! ## Core Types
//!
//! - [`Sid`], [`Identity`] and [`IdentitySpec`]: owner identities
//! - [`Filesystem`], [`HostFilesystem`] and [`MemoryFilesystem`]: tree access
//! - [`Attributes`]: attribute bitmask and the allow-list check
//! - [`OwnershipPlan`], [`OwnerMutator`] and [`TreeWalker`]: the run itself
//! - [`RunStats`] and [`RunSummary`]: counters and the final report
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use reowner::{Identity, MemoryFilesystem, OwnerMutator, RecordingReporter, Sid, TreeWalker};
//! use std::path::Path;
//!
//! let old = Sid::unix_user(1000);
//! let fs = MemoryFilesystem::new("/data", old.clone())
//!     .with_file("/data/report.txt", old.clone())
//!     .with_link_dir("/data/elsewhere", old.clone());
//!
//! let mutator = OwnerMutator::new(
//!     Some(Identity::from_sid(old)),
//!     Identity::from_sid(Sid::unix_user(1001)),
//!     false,
//! );
//! let mut reporter = RecordingReporter::new();
//! let summary = TreeWalker::new(&fs, mutator).run(Path::new("/data"), &mut reporter);
//!
//! assert_eq!(summary.stats.changed, 2);
//! assert_eq!(summary.stats.reparse_points_skipped, 1);
//! ```

pub mod attributes;
pub mod config;
pub mod error;
pub mod fs;
pub mod identity;
pub mod logging;
pub mod operations;
pub mod output;
pub mod path;

// Re-export key types at crate root for convenience
pub use attributes::{check_attributes, Attributes};
pub use config::{Config, ConfigBuilder, OutputFormat, RunConfig};
pub use error::{Error, Result};
pub use fs::{
    Entry, EntryKind, Filesystem, HostFilesystem, Listing, MemoryFilesystem, OwnerError,
};
pub use identity::{
    HostResolver, Identity, IdentityResolver, IdentitySpec, Sid, StaticResolver,
};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    EntryFailure, FailureReason, NullReporter, Outcome, OwnerMutator, OwnershipPlan,
    RecordingReporter, Reporter, RunEvent, RunStats, RunSummary, TreeWalker,
};
pub use output::SummaryFormatter;
