//! Main entry point for the reowner CLI.
//!
//! Reassigns the owner of every file and directory under `--root`. The
//! process always exits with status 0; problems are reported on the
//! console.

mod cli;
mod console;
mod error;
mod run;
mod utils;

use clap::error::ErrorKind;
use clap::Parser;
use cli::{Cli, USAGE};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            if !matches!(
                err.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) {
                println!("{USAGE}");
            }
            return;
        }
    };

    let logger = reowner::init_logger(cli.verbose, cli.quiet);

    if let Err(e) = run::execute(&cli, logger) {
        eprintln!("Error: {e}");
        if e.shows_usage() {
            println!("{USAGE}");
        }
    }
}
