//! Configuration management for the story test-case generator
//!
//! Loads configuration from optional config files and environment variables.
//! Environment variables override file values; the bare `OPENAI_API_KEY`,
//! `JIRA_API_TOKEN` and `JIRA_USER_EMAIL` variables override everything.

use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

use crate::constants::defaults;
use crate::error::AppResult;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Text-generation service configuration
    pub openai: OpenAiConfig,
    /// Jira tracker configuration
    pub jira: JiraConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Verbose diagnostics (debug-level logging)
    #[serde(default = "default_debug")]
    pub debug: bool,
}

fn default_host() -> String {
    defaults::HOST.to_string()
}

fn default_port() -> u16 {
    defaults::PORT
}

fn default_debug() -> bool {
    true
}

/// Chat-completion endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    /// API key (from OPENAI_API_KEY)
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL; `/chat/completions` is appended
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
    /// Model identifier
    #[serde(default = "default_openai_model")]
    pub model: String,
    /// Request timeout in seconds. None waits indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_openai_base_url() -> String {
    defaults::OPENAI_BASE_URL.to_string()
}

fn default_openai_model() -> String {
    defaults::OPENAI_MODEL.to_string()
}

/// Jira REST API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JiraConfig {
    /// Jira base URL
    #[serde(default = "default_jira_base_url")]
    pub base_url: String,
    /// Project the Test issues are filed under
    #[serde(default = "default_jira_project_key")]
    pub project_key: String,
    /// Basic-auth user (from JIRA_USER_EMAIL)
    #[serde(default)]
    pub user_email: Option<String>,
    /// Basic-auth API token (from JIRA_API_TOKEN)
    #[serde(default)]
    pub api_token: Option<SecretString>,
    /// Request timeout in seconds. None waits indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_jira_base_url() -> String {
    defaults::JIRA_BASE_URL.to_string()
}

fn default_jira_project_key() -> String {
    defaults::JIRA_PROJECT_KEY.to_string()
}

impl OpenAiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl JiraConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Priority (highest to lowest):
    /// 1. OPENAI_API_KEY, JIRA_API_TOKEN, JIRA_USER_EMAIL
    /// 2. Environment variables (TESTGEN_*)
    /// 3. config/config.{yaml,toml,json} (if exists)
    /// 4. config.{yaml,toml,json} (if exists)
    /// 5. Default values
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("server.host", defaults::HOST)?
            .set_default("server.port", i64::from(defaults::PORT))?
            .set_default("server.debug", true)?
            .set_default("openai.base_url", defaults::OPENAI_BASE_URL)?
            .set_default("openai.model", defaults::OPENAI_MODEL)?
            .set_default("jira.base_url", defaults::JIRA_BASE_URL)?
            .set_default("jira.project_key", defaults::JIRA_PROJECT_KEY)?
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("config/config").required(false))
            // TESTGEN_SERVER__PORT=7000 -> server.port = 7000
            .add_source(
                Environment::with_prefix("TESTGEN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("openai.api_key", std::env::var("OPENAI_API_KEY").ok())?
            .set_override_option("jira.api_token", std::env::var("JIRA_API_TOKEN").ok())?
            .set_override_option("jira.user_email", std::env::var("JIRA_USER_EMAIL").ok())?
            .build()?;

        config.try_deserialize()
    }

    /// Load and validate in one step
    pub fn load_validated() -> AppResult<Self> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.openai.api_key.is_none() {
            return Err(ConfigError::Message(
                "OpenAI API key must be set via OPENAI_API_KEY".to_string(),
            ));
        }

        if self.jira.api_token.is_none() {
            return Err(ConfigError::Message(
                "Jira API token must be set via JIRA_API_TOKEN".to_string(),
            ));
        }

        if self
            .jira
            .user_email
            .as_deref()
            .map_or(true, |email| email.trim().is_empty())
        {
            return Err(ConfigError::Message(
                "Jira user email must be set via JIRA_USER_EMAIL".to_string(),
            ));
        }

        if self.jira.project_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "Jira project key must not be empty".to_string(),
            ));
        }

        for (name, url) in [
            ("jira.base_url", &self.jira.base_url),
            ("openai.base_url", &self.openai.base_url),
        ] {
            if let Err(e) = reqwest::Url::parse(url) {
                return Err(ConfigError::Message(format!(
                    "{} is not a valid URL ({}): {}",
                    name, url, e
                )));
            }
        }

        Ok(())
    }
}
