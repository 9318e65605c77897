//! Chat-completion provider configuration.

use integration_chat::ChatConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Configuration for the hosted chat-completion endpoint
#[derive(Clone, Serialize, Deserialize)]
pub struct ChatAppConfig {
    /// Endpoint base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Model used when a request does not name one
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Sampling temperature used when a request does not set one
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    /// Upper bound on generated tokens per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds (default: 60)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.aimlapi.com/v1".to_string()
}

fn default_model() -> String {
    domain::DEFAULT_MODEL.to_string()
}

const fn default_temperature() -> f32 {
    domain::DEFAULT_TEMPERATURE
}

const fn default_max_tokens() -> u32 {
    1000
}

const fn default_timeout() -> u64 {
    60
}

impl Default for ChatAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            default_model: default_model(),
            default_temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout(),
        }
    }
}

impl std::fmt::Debug for ChatAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatAppConfig")
            .field("base_url", &self.base_url)
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("default_model", &self.default_model)
            .field("default_temperature", &self.default_temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ChatAppConfig {
    /// Convert to the chat client configuration
    #[must_use]
    pub fn to_chat_config(&self) -> ChatConfig {
        ChatConfig {
            base_url: self.base_url.clone(),
            api_key: self
                .api_key
                .as_ref()
                .map(|key| SecretString::from(key.expose_secret().to_owned())),
            timeout_secs: self.timeout_secs,
        }
    }
}
