//! Where engagement records come from.
//!
//! | Source       | Origin                                   |
//! |--------------|------------------------------------------|
//! | `RestSource` | Pipeline REST API, bearer-token auth     |
//! | `FileSource` | JSON file on disk, or stdin for `-`      |
//!
//! Both accept the same body shapes: a bare JSON array of engagements, or
//! an object wrapping the array under `data`.

use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::SourceError;
use crate::triage::EngagementItem;

pub mod file;
pub mod rest;

pub use file::FileSource;
pub use rest::{Credentials, RestSource};

/// Abstraction over engagement loading so commands can switch between the
/// live API and a local export.
#[async_trait]
pub trait EngagementSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<EngagementItem>, SourceError>;

    /// Human-readable origin for log lines and error messages.
    fn describe(&self) -> String;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EngagementsBody {
    List(Vec<EngagementItem>),
    Wrapped { data: Vec<EngagementItem> },
}

/// Decode an engagements payload in either supported shape.
pub fn parse_engagements(origin: &str, bytes: &[u8]) -> Result<Vec<EngagementItem>, SourceError> {
    // Decode to a Value first so shape errors report serde's message
    // instead of the untagged "did not match any variant".
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|source| SourceError::Decode {
            origin: origin.to_string(),
            source,
        })?;

    let body = match value {
        serde_json::Value::Array(_) => serde_json::from_value::<Vec<EngagementItem>>(value)
            .map(EngagementsBody::List),
        other => serde_json::from_value::<EngagementsBody>(other),
    }
    .map_err(|source| SourceError::Decode {
        origin: origin.to_string(),
        source,
    })?;

    Ok(match body {
        EngagementsBody::List(items) | EngagementsBody::Wrapped { data: items } => items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_engagements_bare_array() {
        let body = br#"[{"id": "a", "status": "waiting_feedback", "reminder_cycle": 1}]"#;
        let items = parse_engagements("test", body).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].reminder_cycle, 1);
    }

    #[test]
    fn test_parse_engagements_wrapped_data() {
        let body = br#"{"data": [{"id": "a", "status": "verified"}, {"id": "b", "status": "verified"}], "total": 2}"#;
        let items = parse_engagements("test", body).unwrap();
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_engagements_empty_array() {
        assert!(parse_engagements("test", b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_engagements_invalid_json() {
        let err = parse_engagements("engagements.json", b"{not json").unwrap_err();
        match err {
            SourceError::Decode { origin, .. } => assert_eq!(origin, "engagements.json"),
            other => panic!("Expected Decode, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_engagements_keeps_good_records_next_to_malformed_fields() {
        use crate::triage::{Bucket, classify};
        use chrono::{TimeZone, Utc};

        let body = br#"[
            {"id": "good", "status": "waiting_feedback", "reminder_cycle": 2,
             "scheduled_time": "2024-05-31T12:00:00Z"},
            {"id": "numeric-time", "status": "waiting_feedback", "reminder_cycle": 1,
             "scheduled_time": 1717200000},
            {"id": "null-cycle", "status": "waiting_feedback", "reminder_cycle": null,
             "scheduled_time": "2024-05-31T12:00:00Z"}
        ]"#;
        let items = parse_engagements("test", body).unwrap();
        assert_eq!(items.len(), 3);

        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let board = classify(&items, now);
        let ids = |b: Bucket| {
            board
                .bucket(b)
                .iter()
                .map(|i| i.id.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(Bucket::Reminder2), vec!["good"]);
        assert_eq!(
            ids(Bucket::FeedbackNotReceived),
            vec!["numeric-time", "null-cycle"]
        );
    }

    #[test]
    fn test_parse_engagements_missing_status_reports_field() {
        let err = parse_engagements("test", br#"[{"id": "a"}]"#).unwrap_err();
        assert!(err.to_string().contains("status"), "got: {}", err);
    }
}
