//! Chat-completion wire types
//!
//! OpenAI-compatible request and response shapes for the hosted
//! completion endpoint.

use serde::{Deserialize, Serialize};

/// Chat-completion request body
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages, system first
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    pub temperature: f32,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
}

/// One conversation message
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Message role (`system`, `user`, `assistant`)
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat-completion response body
///
/// Every field is defaulted: providers vary in what they include, and
/// the absence of usable content is reported by the client as a
/// malformed response rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Completion choices, first is the answer
    #[serde(default)]
    pub choices: Vec<ChatChoice>,

    /// Model that served the request
    #[serde(default)]
    pub model: Option<String>,

    /// Token accounting, when the provider reports it
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

impl ChatCompletionResponse {
    /// Extract the content of the first choice, if the response has one
    #[must_use]
    pub fn into_first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
    }
}

/// One completion choice
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The generated message
    pub message: ResponseMessage,

    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The assistant message inside a choice
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Message role, usually `assistant`
    #[serde(default)]
    pub role: Option<String>,

    /// Message content; may be null for non-text responses
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage reported by the provider
#[derive(Debug, Clone, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// A successfully extracted completion
#[derive(Debug, Clone)]
pub struct Completion {
    /// Content of the first choice
    pub content: String,
    /// Model that produced the reply
    pub model: String,
    /// Token accounting, when reported
    pub usage: Option<TokenUsage>,
}
