//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/ticketscope/config.toml`, then
//! selected values can be overridden from the environment.
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/ticketscope/` (~/.config/ticketscope/)
//! - State/Logs: `$XDG_STATE_HOME/ticketscope/` (~/.local/state/ticketscope/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    /// Cache and fetch-window settings
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Jira connection (optional when tickets come from a file)
    #[serde(default)]
    pub jira: JiraConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analytics cache configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AnalyticsConfig {
    /// Seconds a fetched ticket table stays fresh
    #[serde(default = "default_cache_duration_secs")]
    pub cache_duration_secs: u64,

    /// Days of ticket history to fetch, counted back from today
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            cache_duration_secs: default_cache_duration_secs(),
            lookback_days: default_lookback_days(),
        }
    }
}

/// Longest accepted history window (about a century)
pub const MAX_LOOKBACK_DAYS: u32 = 36_500;

impl AnalyticsConfig {
    pub fn cache_duration(&self) -> Duration {
        Duration::from_secs(self.cache_duration_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.lookback_days == 0 {
            return Err(Error::Config(
                "analytics.lookback_days must be at least 1".to_string(),
            ));
        }
        if self.lookback_days > MAX_LOOKBACK_DAYS {
            return Err(Error::Config(format!(
                "analytics.lookback_days must be at most {}",
                MAX_LOOKBACK_DAYS
            )));
        }
        Ok(())
    }
}

fn default_cache_duration_secs() -> u64 {
    300
}

fn default_lookback_days() -> u32 {
    180
}

/// Jira Cloud connection settings
#[derive(Debug, Deserialize, Clone)]
pub struct JiraConfig {
    /// Site URL (e.g., `https://example.atlassian.net`)
    pub base_url: Option<String>,

    /// Account email used for basic auth
    pub email: Option<String>,

    /// API token (can also use JIRA_API_TOKEN)
    pub api_token: Option<String>,

    /// Issues requested per search call
    #[serde(default = "default_jira_page_size")]
    pub page_size: u32,

    /// Upper bound on issues fetched per refresh
    #[serde(default = "default_jira_max_issues")]
    pub max_issues: u32,

    /// HTTP request timeout in seconds
    #[serde(default = "default_jira_timeout")]
    pub timeout_secs: u64,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            email: None,
            api_token: None,
            page_size: default_jira_page_size(),
            max_issues: default_jira_max_issues(),
            timeout_secs: default_jira_timeout(),
        }
    }
}

impl JiraConfig {
    /// Check if all credentials are present
    pub fn is_ready(&self) -> bool {
        self.base_url.is_some() && self.email.is_some() && self.api_token.is_some()
    }

    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_none() {
            return Err(Error::Config(
                "jira.base_url is required (or set JIRA_URL)".to_string(),
            ));
        }
        if self.email.is_none() {
            return Err(Error::Config(
                "jira.email is required (or set JIRA_EMAIL)".to_string(),
            ));
        }
        if self.api_token.is_none() {
            return Err(Error::Config(
                "jira.api_token is required (or set JIRA_API_TOKEN)".to_string(),
            ));
        }
        if self.page_size == 0 || self.page_size > 100 {
            return Err(Error::Config(
                "jira.page_size must be between 1 and 100".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_jira_page_size() -> u32 {
    100
}

fn default_jira_max_issues() -> u32 {
    5000
}

fn default_jira_timeout() -> u64 {
    30
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path, then apply env overrides
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Config::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Validate settings, including Jira credentials when `use_jira` is set
    pub fn validate(&self, use_jira: bool) -> Result<()> {
        self.analytics.validate()?;
        if use_jira {
            self.jira.validate()?;
        }
        Ok(())
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Overlay values from the environment.
    ///
    /// Recognized: `JIRA_URL`, `JIRA_EMAIL`, `JIRA_API_TOKEN`,
    /// `TICKETSCOPE_CACHE_SECS`, `TICKETSCOPE_LOOKBACK_DAYS`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty("JIRA_URL") {
            self.jira.base_url = Some(url);
        }
        if let Some(email) = non_empty("JIRA_EMAIL") {
            self.jira.email = Some(email);
        }
        if let Some(token) = non_empty("JIRA_API_TOKEN") {
            self.jira.api_token = Some(token);
        }
        if let Some(secs) = non_empty("TICKETSCOPE_CACHE_SECS") {
            self.analytics.cache_duration_secs = secs.trim().parse().map_err(|_| {
                Error::Config(format!("TICKETSCOPE_CACHE_SECS is not a number: {}", secs))
            })?;
        }
        if let Some(days) = non_empty("TICKETSCOPE_LOOKBACK_DAYS") {
            self.analytics.lookback_days = days.trim().parse().map_err(|_| {
                Error::Config(format!("TICKETSCOPE_LOOKBACK_DAYS is not a number: {}", days))
            })?;
        }
        Ok(())
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/ticketscope/config.toml` (~/.config/ticketscope/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("ticketscope").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/ticketscope/` (~/.local/state/ticketscope/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("ticketscope")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/ticketscope/ticketscope.log` (~/.local/state/ticketscope/ticketscope.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("ticketscope.log")
    }
}
