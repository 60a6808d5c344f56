//! Library exports for reowner-cli.
//!
//! Exposes the argument definitions so they can be inspected from tests
//! and documentation tooling.

pub mod cli;
pub mod console;
pub mod error;
pub mod run;
pub mod utils;

pub use cli::Cli;
