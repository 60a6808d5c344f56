//! Console rendering of run events.

use std::io::{self, Write};

use reowner::{LogLevel, Logger, Reporter, RunEvent};

/// Prints change and progress lines to a writer and failures via the logger.
///
/// Change and progress lines are suppressed when `chatty` is off.
pub struct ConsoleReporter<W: Write> {
    out: W,
    logger: Logger,
    chatty: bool,
}

impl ConsoleReporter<io::Stdout> {
    /// Reporter writing to standard output.
    pub fn stdout(logger: Logger, chatty: bool) -> Self {
        Self::new(io::stdout(), logger, chatty)
    }
}

impl<W: Write> ConsoleReporter<W> {
    /// Reporter writing to `out`.
    pub fn new(out: W, logger: Logger, chatty: bool) -> Self {
        Self {
            out,
            logger,
            chatty: chatty && logger.level() > LogLevel::Quiet,
        }
    }

    /// The underlying writer.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if self.chatty {
            // A closed stdout must not abort the walk.
            let _ = writeln!(self.out, "{text}");
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, event: &RunEvent) {
        match event {
            RunEvent::RootUnavailable { path, message } => {
                self.logger.error(&format!(
                    "Error opening directory '{}': {message}",
                    path.display()
                ));
            }
            RunEvent::OwnerChanged { path, kind, owner } => {
                self.line(&format!(
                    "Set ownership on {kind} '{}' to '{owner}'",
                    path.display()
                ));
            }
            RunEvent::EntryFailed(failure) => {
                self.logger.warn(&failure.to_string());
            }
            RunEvent::DirectoryProcessed(stats) => {
                self.line(&format!(
                    "Processed {}\\{} directories",
                    stats.directories_processed, stats.directories_discovered
                ));
                self.line(&format!("Processed {} files", stats.files_processed));
            }
        }
    }
}
