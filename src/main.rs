use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::warn;

use pipeline_triage::logging::{LogFormat, init_tracing};
use pipeline_triage::triage_config::OutputFormat;

mod cmd;

#[derive(Parser)]
#[command(name = "pipeline-triage")]
#[command(version, about = "Triage Pipeline engagements into feedback stages")]
pub struct Cli {
    /// Debug logging (overridden by PIPELINE_TRIAGE_LOG / RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log line format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// Directory holding .pipeline/triage.toml (defaults to the current directory)
    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Explicit config file, bypassing the project and user lookup
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch engagements, classify them and print the triage board
    Board {
        /// Read engagements from a JSON file ('-' for stdin) instead of the API
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Evaluate as of this time (RFC 3339) instead of the current time
        #[arg(long, value_parser = cmd::parse_now)]
        now: Option<chrono::DateTime<chrono::Utc>>,

        /// Output format (overrides [board].format)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Items listed per bucket, 0 for all (overrides [board].max_items_per_column)
        #[arg(long)]
        limit: Option<usize>,

        /// Skip buckets with no engagements
        #[arg(long)]
        hide_empty: bool,

        /// Pipeline API base URL (overrides PIPELINE_API_URL and [api].base_url)
        #[arg(long)]
        api_url: Option<String>,
    },
    /// Classify engagements from a JSON file and print the board as JSON
    Classify {
        /// JSON file of engagements ('-' for stdin)
        #[arg(short, long)]
        file: PathBuf,

        /// Evaluate as of this time (RFC 3339) instead of the current time
        #[arg(long, value_parser = cmd::parse_now)]
        now: Option<chrono::DateTime<chrono::Utc>>,
    },
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default .pipeline/triage.toml file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    // Only the project's own .env is read, never one from a parent directory.
    let dotenv_path = project_dir.join(".env");
    let dotenv_result = dotenv_path
        .is_file()
        .then(|| dotenvy::from_path(&dotenv_path));

    init_tracing(cli.verbose, cli.log_format);

    if let Some(Err(e)) = dotenv_result {
        warn!(path = %dotenv_path.display(), error = %e, "failed to load .env");
    }

    match &cli.command {
        Commands::Board {
            file,
            now,
            format,
            limit,
            hide_empty,
            api_url,
        } => {
            let args = cmd::BoardArgs {
                file: file.clone(),
                now: *now,
                format: *format,
                limit: *limit,
                hide_empty: *hide_empty,
                api_url: api_url.clone(),
            };
            cmd::cmd_board(&project_dir, cli.config.as_deref(), args).await?;
        }
        Commands::Classify { file, now } => {
            cmd::cmd_classify(file, *now).await?;
        }
        Commands::Config { command } => {
            cmd::cmd_config(&project_dir, cli.config.as_deref(), command.clone())?;
        }
    }

    Ok(())
}
