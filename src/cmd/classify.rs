//! One-shot JSON classification — `pipeline-triage classify`.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::info;

use pipeline_triage::source::{EngagementSource, FileSource};
use pipeline_triage::{classify, ui};

pub async fn cmd_classify(file: &Path, now: Option<DateTime<Utc>>) -> Result<()> {
    let now = super::resolve_now(now);
    let source = FileSource::new(file);
    let records = source.fetch().await?;

    let board = classify(&records, now);
    info!(source = %source.describe(), total = board.len(), "classified engagements");

    let json = ui::render_json(&board).context("Failed to serialize triage board")?;
    println!("{}", json);
    Ok(())
}
