//! Fetch, classify and render — `pipeline-triage board`.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::info;

use pipeline_triage::SourceError;
use pipeline_triage::source::{Credentials, EngagementSource, FileSource, RestSource};
use pipeline_triage::triage_config::{CliOverrides, OutputFormat, TriageConfig};
use pipeline_triage::ui::{self, BoardRenderOptions};
use pipeline_triage::{TriageBoard, classify};

/// Flags of the `board` subcommand.
#[derive(Debug, Clone, Default)]
pub struct BoardArgs {
    pub file: Option<PathBuf>,
    pub now: Option<DateTime<Utc>>,
    pub format: Option<OutputFormat>,
    pub limit: Option<usize>,
    pub hide_empty: bool,
    pub api_url: Option<String>,
}

fn build_source(config: &TriageConfig, file: Option<&Path>) -> Result<Box<dyn EngagementSource>> {
    if let Some(path) = file {
        return Ok(Box::new(FileSource::new(path)));
    }

    let base_url = config.api_url().ok_or_else(|| {
        anyhow::anyhow!(
            "No API URL configured. Set [api].base_url in {}, PIPELINE_API_URL, or pass --api-url (or use --file)",
            config.config_path().display()
        )
    })?;
    let credentials = config
        .api_token()
        .and_then(Credentials::bearer)
        .ok_or(SourceError::MissingToken)?;

    let source = RestSource::new(
        &base_url,
        config.engagements_path(),
        credentials,
        config.timeout(),
    )?;
    Ok(Box::new(source))
}

fn render(config: &TriageConfig, board: &TriageBoard, now: DateTime<Utc>) -> Result<String> {
    match config.format() {
        OutputFormat::Json => ui::render_json(board).context("Failed to serialize triage board"),
        OutputFormat::Text => {
            let opts = BoardRenderOptions {
                show_empty: config.show_empty(),
                max_items: config.max_items_per_column(),
                ..Default::default()
            }
            .fit_terminal();
            Ok(ui::render_text(board, now, &opts))
        }
    }
}

pub async fn cmd_board(project_dir: &Path, config_path: Option<&Path>, args: BoardArgs) -> Result<()> {
    let config = TriageConfig::load(project_dir, config_path)?.with_overrides(CliOverrides {
        api_url: args.api_url,
        format: args.format,
        max_items: args.limit,
        hide_empty: args.hide_empty,
    });

    let source = build_source(&config, args.file.as_deref())?;
    let records = source
        .fetch()
        .await
        .with_context(|| format!("Failed to load engagements from {}", source.describe()))?;

    let now = super::resolve_now(args.now);
    let board = classify(&records, now);
    info!(source = %source.describe(), total = board.len(), "built triage board");

    println!("{}", render(&config, &board, now)?);
    Ok(())
}
