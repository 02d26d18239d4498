use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::{debug, warn};

use super::types::{Bucket, EngagementItem, TriageBoard};

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Hours after the scheduled time that a third-reminder engagement stays
/// in `reminder3` before it is written off as `feedbackNotReceived`.
pub const FINAL_REMINDER_WINDOW_HOURS: f64 = 24.0;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an API timestamp.
///
/// Accepts RFC 3339 (with `Z` or an offset), naive date-times which are
/// taken as UTC, and bare dates which map to midnight UTC. Returns `None`
/// for anything else, including empty strings.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Resolve the scheduled time of an engagement, logging values that are
/// present but unparseable.
fn scheduled_at(item: &EngagementItem) -> Option<DateTime<Utc>> {
    let raw = item.scheduled_time.as_deref()?;
    if raw.trim().is_empty() {
        return None;
    }
    let parsed = parse_timestamp(raw);
    if parsed.is_none() {
        warn!(
            id = %item.id,
            scheduled_time = raw,
            "unparseable scheduled_time, treating engagement as unscheduled"
        );
    }
    parsed
}

/// Pick the triage bucket for a single engagement at `now`.
///
/// Rules, first match wins:
/// - unscheduled: `feedbackReceived` when verified with feedback, else
///   `feedbackNotReceived`
/// - verified with feedback: `feedbackReceived`, whatever the cycle
/// - waiting on feedback: by reminder cycle; cycle 0 is `meetingBooked`
///   before the meeting and `reminder1` after it, cycle 3 moves to
///   `feedbackNotReceived` once more than 24h have passed
/// - everything else: `feedbackNotReceived`
pub fn bucket_for(item: &EngagementItem, now: DateTime<Utc>) -> Bucket {
    let verified_with_feedback = item.status.is_verified() && item.has_feedback();

    let Some(scheduled) = scheduled_at(item) else {
        return if verified_with_feedback {
            Bucket::FeedbackReceived
        } else {
            Bucket::FeedbackNotReceived
        };
    };

    if verified_with_feedback {
        return Bucket::FeedbackReceived;
    }

    // Unknown statuses and verified-without-feedback: catch-all bucket.
    if !item.status.is_waiting_feedback() {
        return Bucket::FeedbackNotReceived;
    }

    let hours_since_scheduled = (now - scheduled).num_milliseconds() as f64 / MS_PER_HOUR;

    match item.reminder_cycle {
        0 if now < scheduled => Bucket::MeetingBooked,
        // Meeting has happened but no reminder went out yet.
        0 => Bucket::Reminder1,
        1 => Bucket::Reminder1,
        2 => Bucket::Reminder2,
        3 if hours_since_scheduled <= FINAL_REMINDER_WINDOW_HOURS => Bucket::Reminder3,
        3 => Bucket::FeedbackNotReceived,
        _ => Bucket::FeedbackNotReceived,
    }
}

/// Partition `records` into the six triage buckets as of `now`.
///
/// Every record lands in exactly one bucket and input order is kept
/// within each bucket.
pub fn classify(records: &[EngagementItem], now: DateTime<Utc>) -> TriageBoard {
    let mut board = TriageBoard::default();
    for item in records {
        board.push(bucket_for(item, now), item.clone());
    }

    debug!(
        total = records.len(),
        meeting_booked = board.meeting_booked.len(),
        reminder1 = board.reminder1.len(),
        reminder2 = board.reminder2.len(),
        reminder3 = board.reminder3.len(),
        feedback_received = board.feedback_received.len(),
        feedback_not_received = board.feedback_not_received.len(),
        "classified engagements"
    );

    board
}
