//! Hosted chat-completion client
//!
//! HTTP client for an OpenAI-compatible `/chat/completions` endpoint.
//! One request, one attempt; retrying a slow completion only queues
//! more work behind it.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{ChatCompletionRequest, ChatCompletionResponse, Completion};

/// Chat client errors
#[derive(Debug, Error)]
pub enum ChatError {
    /// Failed to connect to the completion endpoint
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the completion endpoint failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response arrived but did not carry a usable completion
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// No API key configured
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// Timeout during completion
    #[error("Completion timeout")]
    Timeout,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Server error
    #[error("Server error: {0}")]
    ServerError(String),
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ChatError::Timeout
        } else if err.is_connect() {
            ChatError::ConnectionFailed(err.to_string())
        } else {
            ChatError::RequestFailed(err.to_string())
        }
    }
}

/// Chat-completion endpoint configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Endpoint base URL (default: <https://api.aimlapi.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds (default: 60)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.aimlapi.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    60
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl std::fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatConfig")
            .field("base_url", &self.base_url)
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ChatConfig {
    /// Get the API key as a string reference (for requests)
    #[must_use]
    pub fn api_key_str(&self) -> Option<&str> {
        self.api_key.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Whether an API key is present and non-empty
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key_str().is_some_and(|key| !key.is_empty())
    }
}

/// HTTP client for the completion endpoint
#[derive(Debug)]
pub struct ChatClient {
    client: Client,
    config: ChatConfig,
}

impl ChatClient {
    /// Create a new chat client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: ChatConfig) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ChatError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Build the URL for an endpoint under the configured base
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Send one completion request and extract the first choice
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::NotConfigured`] without sending anything when
    /// no API key is set, [`ChatError::MalformedResponse`] when the
    /// response parses but carries no choice content, and transport or
    /// status errors otherwise.
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn complete(&self, request: ChatCompletionRequest) -> Result<Completion, ChatError> {
        let Some(key) = self.config.api_key_str().filter(|key| !key.is_empty()) else {
            return Err(ChatError::NotConfigured(
                "chat completion API key missing".to_string(),
            ));
        };

        debug!(messages = request.messages.len(), "Sending completion request");

        let response = self
            .client
            .post(self.api_url("chat/completions"))
            .bearer_auth(key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ChatError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Completion request failed");
            return Err(ChatError::ServerError(format!("Status {status}: {body}")));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ChatError::MalformedResponse(e.to_string()))?;

        let model = completion
            .model
            .clone()
            .unwrap_or_else(|| request.model.clone());
        let usage = completion.usage.clone();

        debug!(model = %model, usage = ?usage, "Completion received");

        let content = completion.into_first_content().ok_or_else(|| {
            ChatError::MalformedResponse("no completion choices in response".to_string())
        })?;

        Ok(Completion {
            content,
            model,
            usage,
        })
    }
}
