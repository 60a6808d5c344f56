//! Rendering of the run summary.
//!
//! The human format prints the framed summary block; the JSON format
//! serializes the [`RunSummary`] for scripts.

mod formatters;

use crate::config::OutputFormat;
use crate::operations::RunSummary;
use crate::Result;

pub use formatters::{HumanFormatter, JsonFormatter};

/// Turns a finished run into text.
pub trait SummaryFormatter {
    /// Render `summary`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format(&self, summary: &RunSummary) -> Result<String>;
}

impl OutputFormat {
    /// Create the formatter for this format.
    ///
    /// `finished_at` is included by the JSON formatter only.
    #[must_use]
    pub fn create_formatter(self, finished_at: Option<String>) -> Box<dyn SummaryFormatter> {
        match self {
            Self::Human => Box::new(HumanFormatter),
            Self::Json => Box::new(JsonFormatter::new(finished_at)),
        }
    }
}
