//! The single `reowner` operation: configure, plan, walk, summarize.

use std::io::{self, Write};
use std::time::SystemTime;

use reowner::config::{ConfigBuilder, OutputFormat, RunConfig};
use reowner::identity::HostResolver;
use reowner::{HostFilesystem, LogLevel, Logger, OwnershipPlan, RunSummary};

use crate::cli::Cli;
use crate::console::ConsoleReporter;
use crate::error::CliError;
use crate::utils::format_timestamp;

/// Merge the configuration layers for this invocation.
///
/// # Errors
///
/// Returns a usage error when root or target owner is missing, or the
/// library error for an unreadable file or malformed variable.
pub fn load_run_config(cli: &Cli) -> Result<RunConfig, CliError> {
    let mut builder = ConfigBuilder::new().with_config(cli.to_config());
    if let Some(path) = &cli.config {
        builder = builder.with_file(path);
    }
    Ok(builder.build()?)
}

/// Run the walk described by `cli` against the host filesystem.
///
/// Human output prints the owner classification and per-entry lines before
/// the summary. JSON output prints only the summary document on stdout.
///
/// # Errors
///
/// Returns an error when configuration or identity resolution fails; the
/// walk itself never fails.
pub fn execute(cli: &Cli, logger: Logger) -> Result<RunSummary, CliError> {
    let config = load_run_config(cli)?;
    let chatty =
        config.output_format == OutputFormat::Human && logger.level() > LogLevel::Quiet;

    let mut stdout = io::stdout();
    if chatty {
        if config.dry_run {
            writeln!(stdout, "[DRY RUN] no owners will be written")?;
        }
        for line in OwnershipPlan::describe_owners(&config)? {
            writeln!(stdout, "{line}")?;
        }
        writeln!(stdout)?;
    }

    let plan = OwnershipPlan::build(&config, &HostResolver::new())?;
    logger.debug(&format!("normalized root: {}", plan.root().display()));

    let mut reporter = ConsoleReporter::stdout(logger, chatty);
    let summary = plan.execute(&HostFilesystem::new(), &mut reporter, logger);

    let finished_at = format_timestamp(SystemTime::now());
    let text = config
        .output_format
        .create_formatter(Some(finished_at))
        .format(&summary)?;
    writeln!(stdout, "{text}")?;

    Ok(summary)
}
