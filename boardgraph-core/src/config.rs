//! Configuration management for boardgraph
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (BOARDGRAPH_*)
//! 3. Config file (~/.config/boardgraph/config.toml)
//! 4. Default values
//!
//! Once loaded the configuration is an immutable value handed to the Jira
//! client, the graph builder, the navigator and the renderer.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Jira board selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct JiraConfig {
    /// Base URL of the Jira instance, e.g. `https://jira.example.com`
    pub host: String,

    /// Project key prefix shared by in-scope issues (without the trailing `-`)
    pub prefix: String,

    /// Agile board identifier
    pub board_id: u64,

    /// Only issues whose classification equals this value are graphed
    pub filter_text: Option<String>,
}

/// Names of the Jira custom fields the issue model reads
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Numeric story point estimate
    pub story_points: String,

    /// Single-select option used for board filtering
    pub classification: String,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            story_points: "customfield_10100".to_string(),
            classification: "customfield_10401".to_string(),
        }
    }
}

/// Page output settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Where the rendered page is written
    pub output: PathBuf,

    /// Page title
    pub title: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("board.html"),
            title: "Board issue links".to_string(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Board selection
    pub jira: JiraConfig,

    /// Custom field mapping
    pub fields: FieldConfig,

    /// Page output
    pub render: RenderConfig,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub prefix: Option<String>,
    pub board_id: Option<u64>,
    pub filter_text: Option<String>,
    pub output: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/boardgraph/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("boardgraph").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - BOARDGRAPH_HOST: Jira base URL
    /// - BOARDGRAPH_PREFIX: Project key prefix
    /// - BOARDGRAPH_BOARD_ID: Board identifier
    /// - BOARDGRAPH_FILTER: Classification filter value
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    fn with_overrides_from(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(host) = var("BOARDGRAPH_HOST") {
            self.jira.host = host;
        }

        if let Some(prefix) = var("BOARDGRAPH_PREFIX") {
            self.jira.prefix = prefix;
        }

        if let Some(board_id) = var("BOARDGRAPH_BOARD_ID") {
            self.jira.board_id = board_id.trim().parse().map_err(|_| {
                Error::Config(format!("BOARDGRAPH_BOARD_ID is not a number: {}", board_id))
            })?;
        }

        if let Some(filter) = var("BOARDGRAPH_FILTER") {
            self.jira.filter_text = Some(filter);
        }

        Ok(self)
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(host) = overrides.host {
            self.jira.host = host;
        }

        if let Some(prefix) = overrides.prefix {
            self.jira.prefix = prefix;
        }

        if let Some(board_id) = overrides.board_id {
            self.jira.board_id = board_id;
        }

        if let Some(filter) = overrides.filter_text {
            self.jira.filter_text = Some(filter);
        }

        if let Some(output) = overrides.output {
            self.render.output = output;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(overrides: ConfigOverrides) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()?
            .with_cli_overrides(overrides))
    }

    /// Check that everything needed to reach a board is present
    pub fn validate(&self) -> Result<()> {
        if self.jira.host.trim().is_empty() {
            return Err(Error::Config(
                "Jira host is not set. Use --host, BOARDGRAPH_HOST or [jira].host".to_string(),
            ));
        }

        url::Url::parse(self.jira.host.trim())
            .map_err(|e| Error::Config(format!("Invalid Jira host {}: {}", self.jira.host, e)))?;

        if self.jira.prefix.trim().is_empty() {
            return Err(Error::Config(
                "Project prefix is not set. Use --prefix, BOARDGRAPH_PREFIX or [jira].prefix"
                    .to_string(),
            ));
        }

        // Keys are matched against the prefix verbatim
        if self.jira.prefix.chars().any(char::is_whitespace) {
            return Err(Error::Config(format!(
                "Project prefix {:?} must not contain whitespace",
                self.jira.prefix
            )));
        }

        if self.jira.board_id == 0 {
            return Err(Error::Config(
                "Board id is not set. Use --board, BOARDGRAPH_BOARD_ID or [jira].board_id"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Jira base URL without a trailing slash
    pub fn host(&self) -> &str {
        self.jira.host.trim().trim_end_matches('/')
    }
}
