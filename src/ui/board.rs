//! Terminal and JSON rendering of a [`TriageBoard`].

use chrono::{DateTime, Utc};
use console::style;

use crate::time_ago::format_time_ago;
use crate::triage::{Bucket, EngagementItem, TriageBoard, parse_timestamp};
use crate::ui::icons;

const DEFAULT_WIDTH: usize = 80;
const MAX_RULE_WIDTH: usize = 100;

/// Layout knobs for [`render_text`].
#[derive(Debug, Clone)]
pub struct BoardRenderOptions {
    pub show_empty: bool,
    /// Items listed per bucket before collapsing; 0 lists everything.
    pub max_items: usize,
    /// Width of the rule drawn under each heading.
    pub width: usize,
}

impl Default for BoardRenderOptions {
    fn default() -> Self {
        Self {
            show_empty: true,
            max_items: 10,
            width: DEFAULT_WIDTH,
        }
    }
}

impl BoardRenderOptions {
    /// Size the heading rule to the attached terminal, if there is one.
    pub fn fit_terminal(mut self) -> Self {
        if let Some((terminal_size::Width(w), _)) = terminal_size::terminal_size() {
            self.width = usize::from(w).min(MAX_RULE_WIDTH);
        }
        self
    }
}

/// When the engagement is scheduled, relative to `now`.
fn describe_schedule(item: &EngagementItem, now: DateTime<Utc>) -> String {
    match item.scheduled_time.as_deref().filter(|s| !s.trim().is_empty()) {
        None => "unscheduled".to_string(),
        Some(raw) => match parse_timestamp(raw) {
            Some(ts) if ts > now => format!("on {}", ts.format("%b %-d, %Y %H:%M UTC")),
            Some(ts) => format_time_ago(ts, now),
            None => format!("invalid time {:?}", raw),
        },
    }
}

fn render_item(item: &EngagementItem, now: DateTime<Utc>) -> String {
    let feedback = if item.has_feedback() { " +feedback" } else { "" };
    format!(
        "  {:<24} cycle {:<2} {:<17} {}{}",
        item.id,
        item.reminder_cycle,
        item.status.as_str(),
        style(describe_schedule(item, now)).dim(),
        feedback
    )
}

fn render_heading(bucket: Bucket, count: usize) -> String {
    let title = match bucket {
        Bucket::FeedbackReceived => style(bucket.title()).bold().green(),
        Bucket::FeedbackNotReceived => style(bucket.title()).bold().red(),
        Bucket::Reminder3 => style(bucket.title()).bold().yellow(),
        _ => style(bucket.title()).bold().cyan(),
    };
    format!(
        "{}{} {}",
        icons::for_bucket(bucket),
        title,
        style(format!("({})", count)).dim()
    )
}

/// Render the board as one section per bucket, in column order.
pub fn render_text(board: &TriageBoard, now: DateTime<Utc>, opts: &BoardRenderOptions) -> String {
    let mut lines = Vec::new();

    for (bucket, items) in board.iter() {
        if items.is_empty() && !opts.show_empty {
            continue;
        }

        lines.push(render_heading(bucket, items.len()));
        lines.push(style("─".repeat(opts.width)).dim().to_string());

        if items.is_empty() {
            lines.push(format!("  {}", style("(none)").dim()));
        }

        let shown = if opts.max_items == 0 {
            items.len()
        } else {
            items.len().min(opts.max_items)
        };
        for item in &items[..shown] {
            lines.push(render_item(item, now));
        }
        if shown < items.len() {
            lines.push(format!(
                "  {}",
                style(format!("... and {} more", items.len() - shown)).dim()
            ));
        }
        lines.push(String::new());
    }

    lines.push(format!(
        "{} engagements as of {}",
        board.len(),
        now.format("%Y-%m-%d %H:%M UTC")
    ));

    lines.join("\n")
}

/// Render the board as pretty-printed JSON keyed by bucket name.
pub fn render_json(board: &TriageBoard) -> serde_json::Result<String> {
    serde_json::to_string_pretty(board)
}
