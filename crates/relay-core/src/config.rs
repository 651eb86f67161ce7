//! TOML configuration loading and validation.

use crate::error::RelayError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level relay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub relay: RelayConfig,
    pub telegram: TelegramConfig,
    pub provider: ProviderConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub handoff: HandoffConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_level: default_log_level(),
        }
    }
}

/// Telegram bot config. The operator group and administrator identity are
/// distinguished ids supplied here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: String,
    /// User id of the administrator (receives urgent escalations, teaches
    /// the assistant via private messages).
    #[serde(default)]
    pub admin_id: i64,
    /// Chat id of the operator group (receives relayed customer messages).
    #[serde(default)]
    pub operator_group_id: i64,
}

/// Completion API config (OpenAI-compatible; Groq by default).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

/// Memory config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
    /// Most-recent-N history entries supplied to the assistant.
    #[serde(default = "default_context_limit")]
    pub context_limit: i64,
    /// Most-recent-N taught knowledge entries injected into the prompt.
    #[serde(default = "default_knowledge_limit")]
    pub knowledge_limit: i64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            context_limit: default_context_limit(),
            knowledge_limit: default_knowledge_limit(),
        }
    }
}

/// Handoff scheduling config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandoffConfig {
    /// Minutes before a human-assisted conversation reverts to automated.
    #[serde(default = "default_resume_after_mins")]
    pub resume_after_mins: u64,
    /// Maximum retained operator-notification → conversation mappings.
    /// Oldest entries are evicted beyond this.
    #[serde(default = "default_relay_map_capacity")]
    pub relay_map_capacity: usize,
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            resume_after_mins: default_resume_after_mins(),
            relay_map_capacity: default_relay_map_capacity(),
        }
    }
}

/// Catalog data config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_name() -> String {
    "relay".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_temperature() -> f64 {
    0.8
}

fn default_db_path() -> String {
    "memory.db".to_string()
}

fn default_context_limit() -> i64 {
    50
}

fn default_knowledge_limit() -> i64 {
    30
}

fn default_resume_after_mins() -> u64 {
    60
}

fn default_relay_map_capacity() -> usize {
    4096
}

fn default_catalog_path() -> String {
    "data.json".to_string()
}

/// Load config from a TOML file and validate required credentials.
///
/// Unlike purely optional settings, the bot token, API key, and the
/// admin/operator identities have no sane defaults — missing values abort
/// startup.
pub fn load(path: &str) -> Result<Config, RelayError> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(RelayError::Config(format!(
            "config file not found: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| RelayError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| RelayError::Config(format!("failed to parse config: {e}")))?;

    validate(&config)?;
    Ok(config)
}

/// Check that every required credential/identity is present.
pub fn validate(config: &Config) -> Result<(), RelayError> {
    if config.telegram.bot_token.is_empty() {
        return Err(RelayError::Config(
            "telegram.bot_token is required".to_string(),
        ));
    }
    if config.provider.api_key.is_empty() {
        return Err(RelayError::Config(
            "provider.api_key is required".to_string(),
        ));
    }
    if config.telegram.admin_id == 0 {
        return Err(RelayError::Config(
            "telegram.admin_id is required".to_string(),
        ));
    }
    if config.telegram.operator_group_id == 0 {
        return Err(RelayError::Config(
            "telegram.operator_group_id is required".to_string(),
        ));
    }
    Ok(())
}
