//! Configuration loading, validation, and management for FieldLog.
//!
//! Loads configuration from `~/.fieldlog/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.fieldlog/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Agent backend endpoint configuration
    #[serde(default)]
    pub agent: AgentConfig,

    /// Session behavior toggles
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Base URL of the agent backend. Overridable via `AGENT_BASE_URL`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds (single attempt, no retries)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".into()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Announce follow-up suggestions in the chat transcript.
    /// Off by default: suggestions land in the record without comment.
    #[serde(default)]
    pub announce_follow_up: bool,

    /// Clear the pending input when a send fails.
    /// Off by default so the operator can retry the same utterance.
    #[serde(default)]
    pub clear_input_on_failure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            announce_follow_up: false,
            clear_input_on_failure: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.fieldlog/config.toml).
    ///
    /// Environment variable overrides (highest priority):
    /// - `AGENT_BASE_URL` — agent backend endpoint
    /// - `FIELDLOG_ANNOUNCE_FOLLOW_UP` — "true"/"1" to announce follow-ups
    /// - `FIELDLOG_CLEAR_INPUT_ON_FAILURE` — "true"/"1" to clear input on failure
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(url) = std::env::var("AGENT_BASE_URL") {
            config.agent.base_url = url;
        }

        if let Ok(v) = std::env::var("FIELDLOG_ANNOUNCE_FOLLOW_UP") {
            config.session.announce_follow_up = env_flag(&v);
        }

        if let Ok(v) = std::env::var("FIELDLOG_CLEAR_INPUT_ON_FAILURE") {
            config.session.clear_input_on_failure = env_flag(&v);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".fieldlog")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.agent.base_url.starts_with("http://") && !self.agent.base_url.starts_with("https://")
        {
            return Err(ConfigError::ValidationError(format!(
                "agent.base_url must be an http(s) URL, got {:?}",
                self.agent.base_url
            )));
        }

        if self.agent.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "agent.timeout_secs must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            agent: AgentConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

/// "true"/"1"/"yes" (case-insensitive) enable a boolean env override.
fn env_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
