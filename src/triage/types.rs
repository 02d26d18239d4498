use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Reminder cycle recorded when the API sends `null` or a non-integer.
/// Out of range, so it classifies as `feedbackNotReceived`.
pub const INVALID_REMINDER_CYCLE: i64 = -1;

/// Strings pass through; numbers and other scalars keep their JSON text so
/// a bad value still reaches the timestamp parser and gets reported there.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

fn lenient_cycle<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().unwrap_or(INVALID_REMINDER_CYCLE),
        Value::String(s) => s.trim().parse().unwrap_or(INVALID_REMINDER_CYCLE),
        _ => INVALID_REMINDER_CYCLE,
    })
}

fn lenient_status<'de, D>(deserializer: D) -> Result<EngagementStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(EngagementStatus::from(
        lenient_string(deserializer)?.unwrap_or_default(),
    ))
}

/// Feedback status reported by the Pipeline API for an engagement.
///
/// Only `waiting_feedback` and `verified` drive classification. Any other
/// value is kept verbatim so it survives a round trip through the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EngagementStatus {
    WaitingFeedback,
    Verified,
    Other(String),
}

impl EngagementStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::WaitingFeedback => "waiting_feedback",
            Self::Verified => "verified",
            Self::Other(s) => s,
        }
    }

    pub fn is_waiting_feedback(&self) -> bool {
        matches!(self, Self::WaitingFeedback)
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }
}

impl From<String> for EngagementStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "waiting_feedback" => Self::WaitingFeedback,
            "verified" => Self::Verified,
            _ => Self::Other(s),
        }
    }
}

impl From<EngagementStatus> for String {
    fn from(status: EngagementStatus) -> Self {
        match status {
            EngagementStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for EngagementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled meeting tracked through the feedback-collection lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementItem {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    /// Raw ISO 8601 timestamp, parsed at classification time.
    #[serde(default, deserialize_with = "lenient_string")]
    pub scheduled_time: Option<String>,
    /// Number of reminder notifications sent so far; `null` and
    /// non-integers become [`INVALID_REMINDER_CYCLE`].
    #[serde(default, deserialize_with = "lenient_cycle")]
    pub reminder_cycle: i64,
    #[serde(deserialize_with = "lenient_status")]
    pub status: EngagementStatus,
    /// Opaque feedback payload. JSON `null` deserializes to `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<serde_json::Value>,
    /// Remaining API fields, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl EngagementItem {
    pub fn new(id: impl Into<String>, status: EngagementStatus) -> Self {
        Self {
            id: id.into(),
            scheduled_time: None,
            reminder_cycle: 0,
            status,
            feedback: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_scheduled_time(mut self, scheduled_time: impl Into<String>) -> Self {
        self.scheduled_time = Some(scheduled_time.into());
        self
    }

    pub fn with_reminder_cycle(mut self, cycle: i64) -> Self {
        self.reminder_cycle = cycle;
        self
    }

    pub fn with_feedback(mut self, feedback: serde_json::Value) -> Self {
        self.feedback = Some(feedback);
        self
    }

    pub fn has_feedback(&self) -> bool {
        self.feedback.as_ref().is_some_and(|v| !v.is_null())
    }
}

/// One of the six kanban stages an engagement can land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    MeetingBooked,
    Reminder1,
    Reminder2,
    Reminder3,
    FeedbackReceived,
    FeedbackNotReceived,
}

impl Bucket {
    /// Display order of the board columns.
    pub const ALL: [Bucket; 6] = [
        Bucket::MeetingBooked,
        Bucket::Reminder1,
        Bucket::Reminder2,
        Bucket::Reminder3,
        Bucket::FeedbackReceived,
        Bucket::FeedbackNotReceived,
    ];

    /// Key used in the serialized board.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MeetingBooked => "meetingBooked",
            Self::Reminder1 => "reminder1",
            Self::Reminder2 => "reminder2",
            Self::Reminder3 => "reminder3",
            Self::FeedbackReceived => "feedbackReceived",
            Self::FeedbackNotReceived => "feedbackNotReceived",
        }
    }

    /// Column heading shown to operators.
    pub fn title(&self) -> &'static str {
        match self {
            Self::MeetingBooked => "Meeting Booked",
            Self::Reminder1 => "Reminder 1",
            Self::Reminder2 => "Reminder 2",
            Self::Reminder3 => "Reminder 3",
            Self::FeedbackReceived => "Feedback Received",
            Self::FeedbackNotReceived => "Feedback Not Received",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partition of a set of engagements into the six triage buckets.
///
/// Serializes to an object with one array per bucket, keyed by
/// [`Bucket::as_str`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageBoard {
    pub meeting_booked: Vec<EngagementItem>,
    pub reminder1: Vec<EngagementItem>,
    pub reminder2: Vec<EngagementItem>,
    pub reminder3: Vec<EngagementItem>,
    pub feedback_received: Vec<EngagementItem>,
    pub feedback_not_received: Vec<EngagementItem>,
}

impl TriageBoard {
    pub fn bucket(&self, bucket: Bucket) -> &[EngagementItem] {
        match bucket {
            Bucket::MeetingBooked => &self.meeting_booked,
            Bucket::Reminder1 => &self.reminder1,
            Bucket::Reminder2 => &self.reminder2,
            Bucket::Reminder3 => &self.reminder3,
            Bucket::FeedbackReceived => &self.feedback_received,
            Bucket::FeedbackNotReceived => &self.feedback_not_received,
        }
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<EngagementItem> {
        match bucket {
            Bucket::MeetingBooked => &mut self.meeting_booked,
            Bucket::Reminder1 => &mut self.reminder1,
            Bucket::Reminder2 => &mut self.reminder2,
            Bucket::Reminder3 => &mut self.reminder3,
            Bucket::FeedbackReceived => &mut self.feedback_received,
            Bucket::FeedbackNotReceived => &mut self.feedback_not_received,
        }
    }

    pub(crate) fn push(&mut self, bucket: Bucket, item: EngagementItem) {
        self.bucket_mut(bucket).push(item);
    }

    /// Buckets in display order, paired with their contents.
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &[EngagementItem])> {
        Bucket::ALL.into_iter().map(move |b| (b, self.bucket(b)))
    }

    /// Total number of engagements across all buckets.
    pub fn len(&self) -> usize {
        self.iter().map(|(_, items)| items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bucket holding the engagement with `id`, if any.
    pub fn locate(&self, id: &str) -> Option<Bucket> {
        self.iter()
            .find(|(_, items)| items.iter().any(|item| item.id == id))
            .map(|(bucket, _)| bucket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_round_trips_unknown_values() {
        let status: EngagementStatus = serde_json::from_value(json!("archived")).unwrap();
        assert_eq!(status, EngagementStatus::Other("archived".to_string()));
        assert_eq!(serde_json::to_value(&status).unwrap(), json!("archived"));
    }

    #[test]
    fn test_status_known_values() {
        let waiting: EngagementStatus = serde_json::from_value(json!("waiting_feedback")).unwrap();
        assert!(waiting.is_waiting_feedback());
        let verified: EngagementStatus = serde_json::from_value(json!("verified")).unwrap();
        assert!(verified.is_verified());
        assert_eq!(verified.to_string(), "verified");
    }

    #[test]
    fn test_item_deserializes_api_shape() {
        let item: EngagementItem = serde_json::from_value(json!({
            "id": "eng-1",
            "scheduled_time": "2024-06-01T10:00:00Z",
            "reminder_cycle": 2,
            "status": "waiting_feedback",
            "feedback": null,
            "prospect_name": "Ada"
        }))
        .unwrap();

        assert_eq!(item.id, "eng-1");
        assert_eq!(item.reminder_cycle, 2);
        assert!(!item.has_feedback());
        assert_eq!(item.extra.get("prospect_name"), Some(&json!("Ada")));
    }

    #[test]
    fn test_item_defaults_missing_optional_fields() {
        let item: EngagementItem =
            serde_json::from_value(json!({"id": "x", "status": "verified"})).unwrap();
        assert_eq!(item.scheduled_time, None);
        assert_eq!(item.reminder_cycle, 0);
        assert_eq!(item.feedback, None);
    }

    #[test]
    fn test_item_keeps_non_string_scheduled_time_as_raw_text() {
        let item: EngagementItem = serde_json::from_value(json!({
            "id": "n",
            "scheduled_time": 1717200000,
            "status": "waiting_feedback"
        }))
        .unwrap();
        assert_eq!(item.scheduled_time.as_deref(), Some("1717200000"));

        let item: EngagementItem = serde_json::from_value(json!({
            "id": "o",
            "scheduled_time": {"at": "2024-06-01"},
            "status": "waiting_feedback"
        }))
        .unwrap();
        assert_eq!(item.scheduled_time.as_deref(), Some(r#"{"at":"2024-06-01"}"#));
    }

    #[test]
    fn test_item_invalid_reminder_cycle_is_out_of_range() {
        for cycle in [json!(null), json!(1.5), json!("soon"), json!([1])] {
            let item: EngagementItem = serde_json::from_value(json!({
                "id": "c",
                "reminder_cycle": cycle,
                "status": "waiting_feedback"
            }))
            .unwrap();
            assert_eq!(item.reminder_cycle, INVALID_REMINDER_CYCLE);
        }

        let item: EngagementItem = serde_json::from_value(json!({
            "id": "c",
            "reminder_cycle": "2",
            "status": "waiting_feedback"
        }))
        .unwrap();
        assert_eq!(item.reminder_cycle, 2);
    }

    #[test]
    fn test_item_accepts_numeric_id_and_status() {
        let item: EngagementItem =
            serde_json::from_value(json!({"id": 42, "status": 7})).unwrap();
        assert_eq!(item.id, "42");
        assert_eq!(item.status, EngagementStatus::Other("7".to_string()));
    }

    #[test]
    fn test_board_serializes_camel_case_keys() {
        let value = serde_json::to_value(TriageBoard::default()).unwrap();
        let obj = value.as_object().unwrap();
        for bucket in Bucket::ALL {
            assert!(obj.contains_key(bucket.as_str()), "missing {}", bucket);
        }
        assert_eq!(obj.len(), 6);
    }

    #[test]
    fn test_board_locate() {
        let mut board = TriageBoard::default();
        board.push(
            Bucket::Reminder3,
            EngagementItem::new("r3", EngagementStatus::WaitingFeedback),
        );
        assert_eq!(board.locate("r3"), Some(Bucket::Reminder3));
        assert_eq!(board.locate("missing"), None);
        assert_eq!(board.len(), 1);
    }
}
