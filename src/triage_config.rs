//! Configuration for `pipeline-triage`, read from `.pipeline/triage.toml`.
//!
//! Values are layered file → environment → CLI:
//! - `PIPELINE_API_URL` overrides `[api].base_url`
//! - `PIPELINE_API_TOKEN` overrides `[api].token`
//! - command-line flags override both
//!
//! # Configuration File Format
//!
//! ```toml
//! [api]
//! base_url = "https://api.pipeline.example"
//! engagements_path = "/api/engagements"
//! timeout_secs = 30
//!
//! [board]
//! format = "text"
//! show_empty = true
//! max_items_per_column = 10
//! ```
//!
//! When no project file exists, `$XDG_CONFIG_HOME/pipeline-triage/triage.toml`
//! (or the platform equivalent) is used if present.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_DIR: &str = ".pipeline";
pub const CONFIG_FILE: &str = "triage.toml";
pub const API_URL_ENV: &str = "PIPELINE_API_URL";
pub const API_TOKEN_ENV: &str = "PIPELINE_API_TOKEN";

/// How the board is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Column-per-bucket listing for terminals
    #[default]
    Text,
    /// The board object with one array per bucket
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Pipeline REST API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    /// Base URL of the Pipeline API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Path of the engagements listing endpoint
    #[serde(default = "default_engagements_path")]
    pub engagements_path: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Bearer token. Prefer PIPELINE_API_TOKEN over storing it here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_engagements_path() -> String {
    "/api/engagements".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: None,
            engagements_path: default_engagements_path(),
            timeout_secs: default_timeout_secs(),
            token: None,
        }
    }
}

/// Board rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSection {
    #[serde(default)]
    pub format: OutputFormat,
    /// Print buckets with no engagements
    #[serde(default = "default_show_empty")]
    pub show_empty: bool,
    /// Items listed per bucket before collapsing; 0 lists everything
    #[serde(default = "default_max_items_per_column")]
    pub max_items_per_column: usize,
}

fn default_show_empty() -> bool {
    true
}

fn default_max_items_per_column() -> usize {
    10
}

impl Default for BoardSection {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            show_empty: default_show_empty(),
            max_items_per_column: default_max_items_per_column(),
        }
    }
}

/// The complete triage.toml structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriageToml {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub board: BoardSection,
}

impl TriageToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse triage.toml")
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize triage.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration, returning any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(url) = &self.api.base_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            warnings.push(format!(
                "Invalid base_url '{}': should start with http:// or https://",
                url
            ));
        }

        if !self.api.engagements_path.starts_with('/') {
            warnings.push(format!(
                "engagements_path '{}' should start with '/'",
                self.api.engagements_path
            ));
        }

        if self.api.timeout_secs == 0 {
            warnings.push("timeout_secs is 0; requests would time out immediately".to_string());
        }

        if self.api.token.is_some() {
            warnings.push(format!(
                "[api].token is stored in plain text; prefer the {} environment variable",
                API_TOKEN_ENV
            ));
        }

        warnings
    }
}

/// Values supplied on the command line, applied on top of file and env.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_url: Option<String>,
    pub format: Option<OutputFormat>,
    pub max_items: Option<usize>,
    pub hide_empty: bool,
}

/// Resolved configuration for one invocation.
#[derive(Debug, Clone)]
pub struct TriageConfig {
    config_path: PathBuf,
    loaded_from_file: bool,
    toml: TriageToml,
    overrides: CliOverrides,
}

/// Project-local config path under `project_dir`.
pub fn project_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Per-user config path, if the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pipeline-triage").join(CONFIG_FILE))
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl TriageConfig {
    /// Load configuration for `project_dir`.
    ///
    /// An explicit path must exist. Otherwise the project file is tried,
    /// then the per-user file, then built-in defaults.
    pub fn load(project_dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let toml = TriageToml::load(path)?;
            return Ok(Self::from_toml(path.to_path_buf(), true, toml));
        }

        let project_path = project_config_path(project_dir);
        if project_path.exists() {
            let toml = TriageToml::load(&project_path)?;
            return Ok(Self::from_toml(project_path, true, toml));
        }

        if let Some(user_path) = user_config_path()
            && user_path.exists()
        {
            let toml = TriageToml::load(&user_path)?;
            return Ok(Self::from_toml(user_path, true, toml));
        }

        Ok(Self::from_toml(project_path, false, TriageToml::default()))
    }

    pub fn from_toml(config_path: PathBuf, loaded_from_file: bool, toml: TriageToml) -> Self {
        Self {
            config_path,
            loaded_from_file,
            toml,
            overrides: CliOverrides::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: CliOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Path the configuration was read from, or would be written to.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn loaded_from_file(&self) -> bool {
        self.loaded_from_file
    }

    pub fn toml(&self) -> &TriageToml {
        &self.toml
    }

    /// API base URL (CLI → env → file).
    pub fn api_url(&self) -> Option<String> {
        self.overrides
            .api_url
            .clone()
            .or_else(|| non_empty_env(API_URL_ENV))
            .or_else(|| self.toml.api.base_url.clone())
    }

    /// API token (env → file).
    pub fn api_token(&self) -> Option<String> {
        non_empty_env(API_TOKEN_ENV).or_else(|| self.toml.api.token.clone())
    }

    pub fn engagements_path(&self) -> &str {
        &self.toml.api.engagements_path
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.toml.api.timeout_secs)
    }

    /// Output format (CLI → file).
    pub fn format(&self) -> OutputFormat {
        self.overrides.format.unwrap_or(self.toml.board.format)
    }

    pub fn show_empty(&self) -> bool {
        !self.overrides.hide_empty && self.toml.board.show_empty
    }

    /// Items per bucket before collapsing (CLI → file); 0 means unlimited.
    pub fn max_items_per_column(&self) -> usize {
        self.overrides
            .max_items
            .unwrap_or(self.toml.board.max_items_per_column)
    }

    pub fn validate(&self) -> Vec<String> {
        self.toml.validate()
    }
}
