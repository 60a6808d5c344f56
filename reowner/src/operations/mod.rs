//! Ownership operations using the plan-execute pattern.
//!
//! A run is split into two phases:
//! 1. **Planning**: resolve the owner strings and normalize the root
//!    ([`OwnershipPlan::build`])
//! 2. **Execution**: walk the tree and apply the owner rule to every entry
//!    ([`OwnershipPlan::execute`])
//!
//! The walk never fails as a whole. Problems with single entries or single
//! directory listings are reported through a [`Reporter`] and counted in
//! [`RunStats`]; the run continues with the next entry.
//!
//! # Examples
//!
//! ```no_run
//! use reowner::config::ConfigBuilder;
//! use reowner::fs::HostFilesystem;
//! use reowner::identity::HostResolver;
//! use reowner::operations::{NullReporter, OwnershipPlan};
//! use reowner::Logger;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! let plan = OwnershipPlan::build(&config, &HostResolver::new()).unwrap();
//! let summary = plan.execute(&HostFilesystem::new(), &mut NullReporter, Logger::default());
//! println!("changed {}", summary.stats.changed);
//! ```

pub mod mutate;
pub mod plan;
pub mod report;
pub mod stats;
pub mod walker;

#[cfg(test)]
mod proptests;

pub use mutate::{Outcome, OwnerMutator};
pub use plan::OwnershipPlan;
pub use report::{EntryFailure, FailureReason, NullReporter, RecordingReporter, Reporter, RunEvent};
pub use stats::{RunStats, RunSummary};
pub use walker::TreeWalker;
