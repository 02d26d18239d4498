pub mod errors;
pub mod logging;
pub mod source;
pub mod time_ago;
pub mod triage;
pub mod triage_config;
pub mod ui;

pub use errors::SourceError;
pub use time_ago::{format_time_ago, format_time_ago_str};
pub use triage::{
    Bucket, EngagementItem, EngagementStatus, TriageBoard, bucket_for, classify, parse_timestamp,
};
