//! Short relative timestamps ("5m ago") for board output.

use chrono::{DateTime, Utc};

use crate::triage::parse_timestamp;

/// Format `timestamp` relative to `now`.
///
/// Under 5 seconds (or in the future) is "Just now"; then seconds, minutes
/// and hours are shown truncated; a day or more falls back to the calendar
/// date.
pub fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - timestamp).num_seconds();

    if secs < 5 {
        "Just now".to_string()
    } else if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 60 * 60 {
        format!("{}m ago", secs / 60)
    } else if secs < 24 * 60 * 60 {
        format!("{}h ago", secs / 3600)
    } else {
        timestamp.format("%b %-d, %Y").to_string()
    }
}

/// Like [`format_time_ago`], for a raw API timestamp. `None` if it does not parse.
pub fn format_time_ago_str(raw: &str, now: DateTime<Utc>) -> Option<String> {
    parse_timestamp(raw).map(|ts| format_time_ago(ts, now))
}
