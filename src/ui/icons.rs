//! Shared UI icons and emojis.
//!
//! One marker per triage bucket so the text board stays scannable when
//! colors are off.

use console::Emoji;

use crate::triage::Bucket;

pub static CALENDAR: Emoji<'_, '_> = Emoji("📅 ", "[B]");
pub static BELL: Emoji<'_, '_> = Emoji("🔔 ", "[R]");
pub static ALARM: Emoji<'_, '_> = Emoji("⏰ ", "[!]");
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[X]");

/// Marker shown before a bucket heading.
pub fn for_bucket(bucket: Bucket) -> &'static Emoji<'static, 'static> {
    match bucket {
        Bucket::MeetingBooked => &CALENDAR,
        Bucket::Reminder1 | Bucket::Reminder2 => &BELL,
        Bucket::Reminder3 => &ALARM,
        Bucket::FeedbackReceived => &CHECK,
        Bucket::FeedbackNotReceived => &CROSS,
    }
}
