//! Configuration view and validation commands — `pipeline-triage config`.

use anyhow::Result;
use std::path::Path;

use super::super::ConfigCommands;

pub fn cmd_config(
    project_dir: &Path,
    config_path: Option<&Path>,
    command: Option<ConfigCommands>,
) -> Result<()> {
    use pipeline_triage::triage_config::{
        API_TOKEN_ENV, API_URL_ENV, TriageConfig, TriageToml, project_config_path,
    };

    match command {
        None | Some(ConfigCommands::Show) => {
            let config = TriageConfig::load(project_dir, config_path)?;
            let toml = config.toml();

            println!();
            println!("Pipeline Triage Configuration");
            println!("=============================");
            println!();

            if config.loaded_from_file() {
                println!("Config file: {}", config.config_path().display());
            } else {
                println!("No triage.toml found at {}", config.config_path().display());
                println!("Using default configuration.");
            }
            println!();

            println!("[api]");
            match &toml.api.base_url {
                Some(url) => println!("  base_url = \"{}\"", url),
                None => println!("  base_url = (unset)"),
            }
            println!("  engagements_path = \"{}\"", toml.api.engagements_path);
            println!("  timeout_secs = {}", toml.api.timeout_secs);
            if toml.api.token.is_some() {
                println!("  token = (set)");
            }
            println!();

            println!("[board]");
            println!("  format = \"{}\"", toml.board.format);
            println!("  show_empty = {}", toml.board.show_empty);
            println!(
                "  max_items_per_column = {}",
                toml.board.max_items_per_column
            );
            println!();

            println!("Effective values (with env overrides):");
            println!(
                "  api_url = {}",
                config.api_url().unwrap_or_else(|| "(unset)".to_string())
            );
            println!(
                "  api_token = {}",
                if config.api_token().is_some() {
                    "(set)"
                } else {
                    "(unset)"
                }
            );
            println!();

            if !config.loaded_from_file() {
                println!("Run 'pipeline-triage config init' to create a triage.toml file.");
                println!(
                    "Set {} and {} to point at the Pipeline API.",
                    API_URL_ENV, API_TOKEN_ENV
                );
                println!();
            }
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            let config = TriageConfig::load(project_dir, config_path)?;
            if !config.loaded_from_file() {
                println!("No triage.toml found. Using defaults (valid).");
                return Ok(());
            }

            let warnings = config.validate();
            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            let path = match config_path {
                Some(p) => p.to_path_buf(),
                None => project_config_path(project_dir),
            };

            if path.exists() {
                println!("triage.toml already exists at {}", path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
                && !parent.exists()
            {
                std::fs::create_dir_all(parent)?;
            }

            TriageToml::default().save(&path)?;

            println!("Created triage.toml at {}", path.display());
            println!();
            println!("You can now customize:");
            println!("  - [api] base_url, engagements_path, timeout_secs");
            println!("  - [board] format, show_empty, max_items_per_column");
            println!();
        }
    }

    Ok(())
}
