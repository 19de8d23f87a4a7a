//! Configuration loading, validation, and management for Jirabot.
//!
//! Loads configuration from `~/.jirabot/config.toml` with environment
//! variable overrides. Validates all settings at startup. Secrets never
//! appear in `Debug` output.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.jirabot/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// LLM API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// LLM endpoint (any OpenAI-compatible chat-completions API)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default)]
    pub temperature: f32,

    /// LLM request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Upper bound on consecutive tool-call cycles within one user turn
    #[serde(default = "default_max_tool_cycles")]
    pub max_tool_cycles: u32,

    /// Jira connection and scoping settings
    #[serde(default)]
    pub jira: JiraConfig,
}

fn default_api_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-4o".into()
}
fn default_request_timeout_secs() -> u64 {
    120
}
fn default_max_tool_cycles() -> u32 {
    10
}

/// Jira Cloud connection settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct JiraConfig {
    /// Jira Cloud base URL (e.g., "https://yourdomain.atlassian.net")
    #[serde(default)]
    pub url: String,

    /// The email used to log into Jira Cloud
    #[serde(default)]
    pub email: String,

    /// Jira Cloud API token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Default project key for scoping searches and new tickets
    #[serde(default = "default_project_key")]
    pub project_key: String,

    /// Maximum results per JQL search
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,
}

fn default_project_key() -> String {
    "KAN".into()
}
fn default_search_limit() -> u32 {
    10
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            email: String::new(),
            api_token: None,
            project_key: default_project_key(),
            search_limit: default_search_limit(),
        }
    }
}

fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_tool_cycles", &self.max_tool_cycles)
            .field("jira", &self.jira)
            .finish()
    }
}

impl std::fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraConfig")
            .field("url", &self.url)
            .field("email", &self.email)
            .field("api_token", &redact(&self.api_token))
            .field("project_key", &self.project_key)
            .field("search_limit", &self.search_limit)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.jirabot/config.toml).
    ///
    /// Environment variables take priority over the file:
    /// - `OPENAI_API_KEY` — LLM key
    /// - `JIRA_URL`, `JIRA_EMAIL`, `JIRA_API_TOKEN` — Jira credentials
    /// - `JIRABOT_MODEL`, `JIRABOT_PROJECT_KEY` — overrides
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            config.api_key = Some(key);
        }
        if let Ok(url) = std::env::var("JIRA_URL") {
            config.jira.url = url;
        }
        if let Ok(email) = std::env::var("JIRA_EMAIL") {
            config.jira.email = email;
        }
        if let Ok(token) = std::env::var("JIRA_API_TOKEN") {
            config.jira.api_token = Some(token);
        }
        if let Ok(model) = std::env::var("JIRABOT_MODEL") {
            config.model = model;
        }
        if let Ok(key) = std::env::var("JIRABOT_PROJECT_KEY") {
            config.jira.project_key = key;
        }

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
        dirs_home().join(".jirabot")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.temperature < 0.0 || self.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.max_tool_cycles == 0 {
            return Err(ConfigError::ValidationError(
                "max_tool_cycles must be at least 1".into(),
            ));
        }

        if !self.jira.url.is_empty()
            && !self.jira.url.starts_with("http://")
            && !self.jira.url.starts_with("https://")
        {
            return Err(ConfigError::ValidationError(
                "jira.url must start with http:// or https://".into(),
            ));
        }

        if self.jira.search_limit == 0 {
            return Err(ConfigError::ValidationError(
                "jira.search_limit must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Check that everything needed to start a session is present.
    pub fn require_credentials(&self) -> Result<(), ConfigError> {
        if self.api_key.is_none() {
            return Err(ConfigError::MissingCredential("OPENAI_API_KEY".into()));
        }
        if self.jira.url.is_empty() {
            return Err(ConfigError::MissingCredential("JIRA_URL".into()));
        }
        if self.jira.email.is_empty() {
            return Err(ConfigError::MissingCredential("JIRA_EMAIL".into()));
        }
        if self.jira.api_token.is_none() {
            return Err(ConfigError::MissingCredential("JIRA_API_TOKEN".into()));
        }
        Ok(())
    }

    /// Generate a default config TOML string (for `onboard`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
            model: default_model(),
            temperature: 0.0,
            request_timeout_secs: default_request_timeout_secs(),
            max_tool_cycles: default_max_tool_cycles(),
            jira: JiraConfig::default(),
        }
    }
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

    #[error("Missing credential: set {0} or add it to the config file")]
    MissingCredential(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.jira.project_key, "KAN");
        assert_eq!(config.request_timeout_secs, 120);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.model, config.model);
        assert_eq!(parsed.jira.search_limit, config.jira.search_limit);
    }

    #[test]
    fn invalid_temperature_rejected() {
        let config = AppConfig {
            temperature: 5.0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_tool_cycles_rejected() {
        let config = AppConfig {
            max_tool_cycles: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_jira_url_rejected() {
        let mut config = AppConfig::default();
        config.jira.url = "yourdomain.atlassian.net".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().model, "gpt-4o");
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
model = "gpt-4o-mini"

[jira]
url = "https://example.atlassian.net"
email = "pm@example.com"
project_key = "OPS"
search_limit = 25
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.jira.project_key, "OPS");
        assert_eq!(config.jira.search_limit, 25);
        // Unset fields fall back to defaults
        assert_eq!(config.request_timeout_secs, 120);
    }

    #[test]
    fn require_credentials_reports_first_missing() {
        let config = AppConfig::default();
        let err = config.require_credentials().unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let mut config = AppConfig::default();
        config.api_key = Some("sk-secret".into());
        config.jira.api_token = Some("atl-secret".into());
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(!debug.contains("atl-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("gpt-4o"));
        assert!(toml_str.contains("KAN"));
    }
}
