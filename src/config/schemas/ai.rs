//! AI analysis configuration

use serde::{Deserialize, Serialize};

/// Settings for the analysis engine and its completion provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Provider identifier (only "openai" is wired up)
    #[serde(default = "default_provider")]
    pub default_provider: String,

    /// OpenAI provider settings
    #[serde(default)]
    pub openai: ProviderConfig,

    /// Timeout for a single completion request
    #[serde(default = "default_timeout_seconds")]
    pub request_timeout_seconds: u64,

    /// Retries after the first attempt (rate-limit / transient errors only)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay for exponential backoff between retries
    #[serde(default = "default_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            openai: ProviderConfig::default(),
            request_timeout_seconds: default_timeout_seconds(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_backoff_ms(),
        }
    }
}

/// Single completion-provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key; leave empty to use the environment variable instead
    #[serde(default)]
    pub api_key: String,

    /// Environment variable consulted when `api_key` is empty
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum requests per minute
    #[serde(default = "default_rate_limit")]
    pub rate_limit_per_minute: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_key_env: default_api_key_env(),
            model: default_model(),
            rate_limit_per_minute: default_rate_limit(),
        }
    }
}

impl ProviderConfig {
    /// Credential from config, falling back to the environment variable.
    /// Returns `None` when neither is set - the health endpoint reports
    /// "unavailable" in that case, but the engine still attempts calls.
    pub fn resolved_api_key(&self) -> Option<String> {
        if !self.api_key.trim().is_empty() {
            return Some(self.api_key.clone());
        }
        match std::env::var(&self.api_key_env) {
            Ok(v) if !v.trim().is_empty() => Some(v),
            _ => None,
        }
    }
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_rate_limit() -> u32 {
    60
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    2
}

fn default_backoff_ms() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_key_wins_over_env() {
        let config = ProviderConfig {
            api_key: "sk-from-config".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.resolved_api_key(),
            Some("sk-from-config".to_string())
        );
    }

    #[test]
    fn test_missing_key_resolves_none() {
        let config = ProviderConfig {
            api_key: String::new(),
            api_key_env: "FINSIGHT_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolved_api_key(), None);
    }
}
