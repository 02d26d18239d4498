//! Engagement triage: bucket meetings awaiting feedback into kanban stages.
//!
//! The classifier is a pure function of the engagement list and an
//! injected `now`; it never reads the system clock and never fails.

pub mod classifier;
pub mod types;

pub use classifier::{bucket_for, classify, parse_timestamp};
pub use types::{Bucket, EngagementItem, EngagementStatus, TriageBoard};
