//! Chat-completion port
//!
//! Defines the interface to the hosted chat-completion provider.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A fully assembled chat-completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatPrompt {
    /// System instruction
    pub system: String,
    /// User message (prompt + weather data + report template)
    pub user: String,
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Upper bound on response length
    pub max_tokens: u32,
}

impl ChatPrompt {
    /// Create a prompt with the given system and user messages
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            model: domain::DEFAULT_MODEL.to_string(),
            temperature: domain::DEFAULT_TEMPERATURE,
            max_tokens: 1000,
        }
    }

    /// Set the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the response-length bound
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// The extracted reply from a chat completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Content of the first completion choice
    pub content: String,
    /// Model that produced the reply
    pub model: String,
}

/// Port for chat-completion operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChatPort: Send + Sync {
    /// Send one completion request; a single attempt, no retries
    async fn complete(&self, prompt: &ChatPrompt) -> Result<ChatReply, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn ChatPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ChatPort>();
    }

    #[test]
    fn prompt_defaults_match_documented_contract() {
        let prompt = ChatPrompt::new("system", "user");
        assert_eq!(prompt.model, "gpt-4o-mini");
        assert!((prompt.temperature - 0.4).abs() < f32::EPSILON);
        assert_eq!(prompt.max_tokens, 1000);
    }

    #[test]
    fn builders_override_fields() {
        let prompt = ChatPrompt::new("s", "u")
            .with_model("gpt-5-nano")
            .with_temperature(0.9)
            .with_max_tokens(256);
        assert_eq!(prompt.model, "gpt-5-nano");
        assert!((prompt.temperature - 0.9).abs() < f32::EPSILON);
        assert_eq!(prompt.max_tokens, 256);
    }
}
