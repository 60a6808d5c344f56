//! Small helpers shared by the CLI.

use std::time::SystemTime;

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a timestamp as RFC 3339 in UTC, to the second.
pub fn format_timestamp(ts: SystemTime) -> String {
    let dt: DateTime<Utc> = ts.into();
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}
