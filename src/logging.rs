//! Tracing subscriber setup for the CLI.
//!
//! Logs always go to stderr so board and JSON output on stdout stay
//! machine-readable.

use tracing_subscriber::EnvFilter;

/// Env var consulted before `RUST_LOG`.
pub const LOG_ENV: &str = "PIPELINE_TRIAGE_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Filter from `PIPELINE_TRIAGE_LOG`, then `RUST_LOG`, then `warn`
/// (`debug` when verbose).
pub fn env_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "warn" };
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_tracing(verbose: bool, format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
