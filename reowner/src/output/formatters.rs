//! Summary formatter implementations.

use serde::Serialize;

use crate::operations::{RunStats, RunSummary};
use crate::{Error, Result};

use super::SummaryFormatter;

const RULE: &str = "-------------------------";

/// Framed plain-text summary.
pub struct HumanFormatter;

impl SummaryFormatter for HumanFormatter {
    fn format(&self, summary: &RunSummary) -> Result<String> {
        let stats = &summary.stats;
        let mut lines = vec![
            RULE.to_string(),
            "         Summary".to_string(),
            RULE.to_string(),
        ];

        if summary.dry_run {
            lines.push("[DRY RUN] no owners were written".to_string());
        }
        if !summary.root_opened {
            lines.push(format!(
                "Root directory '{}' could not be opened",
                summary.root.display()
            ));
        }

        lines.push(format!(
            "Successfully changed {} directories and files",
            stats.changed
        ));
        lines.push(format!(
            "Skipped {} linked directories",
            stats.reparse_points_skipped
        ));
        lines.push(format!(
            "Processed {}\\{} directories",
            stats.directories_processed, stats.directories_discovered
        ));
        lines.push(format!("Processed {} files", stats.files_processed));
        if stats.failures > 0 {
            lines.push(format!("Failed {} entries", stats.failures));
        }

        Ok(lines.join("\n"))
    }
}

/// JSON summary document.
pub struct JsonFormatter {
    finished_at: Option<String>,
}

impl JsonFormatter {
    /// Create a JSON formatter, optionally stamping the document.
    #[must_use]
    pub fn new(finished_at: Option<String>) -> Self {
        Self { finished_at }
    }
}

#[derive(Serialize)]
struct JsonSummary<'a> {
    root: &'a std::path::Path,
    dry_run: bool,
    root_opened: bool,
    #[serde(flatten)]
    stats: &'a RunStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    finished_at: Option<&'a str>,
}

impl SummaryFormatter for JsonFormatter {
    fn format(&self, summary: &RunSummary) -> Result<String> {
        let document = JsonSummary {
            root: &summary.root,
            dry_run: summary.dry_run,
            root_opened: summary.root_opened,
            stats: &summary.stats,
            finished_at: self.finished_at.as_deref(),
        };

        serde_json::to_string_pretty(&document).map_err(|e| Error::Validation {
            field: "json_output".to_string(),
            message: format!("failed to serialize to JSON: {e}"),
        })
    }
}
