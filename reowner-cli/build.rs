//! Build script for reowner-cli.
//!
//! Generates the man page at build time using clap_mangen and places it in
//! OUT_DIR.
//!
//! The command is rebuilt here rather than imported, since build scripts
//! cannot depend on the crate being built. Keep it in step with src/cli.rs.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::io;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("reowner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reassign file and directory ownership in bulk")
        .long_about(
            "Walks a directory tree and replaces the owner of every file and directory. \
             Linked directories are counted and skipped, never followed.",
        )
        .arg(
            Arg::new("root")
                .long("root")
                .value_name("PATH")
                .help("Directory to start from"),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .value_name("OWNER")
                .help("New owner (SID or account name)"),
        )
        .arg(
            Arg::new("from")
                .long("from")
                .value_name("OWNER")
                .help("Only replace entries currently owned by this owner"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Report what would change without writing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("YAML configuration file")
                .env("REOWNER_CONFIG"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_name("FORMAT")
                .value_parser(["human", "json"])
                .help("Summary format"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress per-entry and progress output")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "OUT_DIR is not set")
    })?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("reowner.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    Ok(())
}
