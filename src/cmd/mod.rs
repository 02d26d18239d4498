//! CLI command implementations.
//!
//! | Module     | Commands handled |
//! |------------|------------------|
//! | `board`    | `Board`          |
//! | `classify` | `Classify`       |
//! | `config`   | `Config`         |

pub mod board;
pub mod classify;
pub mod config;

pub use board::{BoardArgs, cmd_board};
pub use classify::cmd_classify;
pub use config::cmd_config;

use chrono::{DateTime, Utc};

/// Parse the `--now` flag. Accepts the same forms as engagement timestamps.
pub fn parse_now(raw: &str) -> Result<DateTime<Utc>, String> {
    pipeline_triage::parse_timestamp(raw)
        .ok_or_else(|| format!("invalid timestamp '{}', expected RFC 3339", raw))
}

/// `--now` if given, otherwise the wall clock.
pub fn resolve_now(now: Option<DateTime<Utc>>) -> DateTime<Utc> {
    now.unwrap_or_else(Utc::now)
}
