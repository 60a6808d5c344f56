//! Command-line argument definitions.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use reowner::config::{Config, OutputFormat};

/// Usage line printed after argument errors.
pub const USAGE: &str =
    "usage: reowner --root <PATH> --to <OWNER> [--from <OWNER>] [--dry-run]";

/// Reassign the owner of every file and directory under a root.
///
/// Owners are given either as a security identifier (`S-1-22-1-1000`) or as
/// an account name. Linked directories are never followed.
#[derive(Parser, Debug)]
#[command(name = "reowner")]
#[command(version, about = "Reassign file and directory ownership in bulk", long_about = None)]
pub struct Cli {
    /// Directory to start from
    #[arg(long, value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// New owner (SID or account name)
    #[arg(long, value_name = "OWNER")]
    pub to: Option<String>,

    /// Only replace entries currently owned by this owner
    #[arg(long, value_name = "OWNER")]
    pub from: Option<String>,

    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,

    /// YAML configuration file
    #[arg(long, value_name = "FILE", env = "REOWNER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Summary format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Suppress per-entry and progress output
    #[arg(long)]
    pub quiet: bool,
}

/// Summary format accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FormatArg {
    /// Framed text block
    Human,
    /// JSON document
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Human => Self::Human,
            FormatArg::Json => Self::Json,
        }
    }
}

impl Cli {
    /// The highest-precedence configuration layer.
    ///
    /// Absent flags stay `None` so lower layers show through; `--dry-run`
    /// can only switch dry-run on.
    pub fn to_config(&self) -> Config {
        Config {
            root: self.root.clone(),
            to: self.to.clone(),
            from: self.from.clone(),
            dry_run: self.dry_run.then_some(true),
            output_format: self.format.map(OutputFormat::from),
        }
    }
}
