//! Chat adapter - implements `ChatPort` using `integration_chat`

use application::error::ApplicationError;
use application::ports::{ChatPort, ChatPrompt, ChatReply};
use async_trait::async_trait;
use integration_chat::{ChatClient, ChatCompletionRequest, ChatConfig, ChatError, ChatMessage};
use tracing::{debug, instrument};

/// Map integration chat errors to application errors
fn map_error(err: ChatError) -> ApplicationError {
    match err {
        ChatError::ConnectionFailed(e)
        | ChatError::RequestFailed(e)
        | ChatError::ServerError(e) => ApplicationError::ExternalService(e),
        ChatError::Timeout => ApplicationError::ExternalService("completion timeout".to_string()),
        ChatError::MalformedResponse(e) => ApplicationError::MalformedResponse(e),
        ChatError::NotConfigured(e) => ApplicationError::Configuration(e),
        ChatError::RateLimited => ApplicationError::RateLimited,
    }
}

/// Adapter for the hosted OpenAI-compatible completion endpoint
#[derive(Debug)]
pub struct ChatCompletionAdapter {
    client: ChatClient,
}

impl ChatCompletionAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: ChatConfig) -> Result<Self, ApplicationError> {
        let client =
            ChatClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ChatPort for ChatCompletionAdapter {
    #[instrument(skip(self, prompt), fields(model = %prompt.model))]
    async fn complete(&self, prompt: &ChatPrompt) -> Result<ChatReply, ApplicationError> {
        let request = ChatCompletionRequest {
            model: prompt.model.clone(),
            messages: vec![
                ChatMessage::system(&prompt.system),
                ChatMessage::user(&prompt.user),
            ],
            temperature: prompt.temperature,
            max_tokens: prompt.max_tokens,
        };

        let completion = self.client.complete(request).await.map_err(map_error)?;

        debug!(
            model = %completion.model,
            chars = completion.content.len(),
            "Completion received"
        );

        Ok(ChatReply {
            content: completion.content,
            model: completion.model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_creation() {
        let adapter = ChatCompletionAdapter::with_config(ChatConfig::default());
        assert!(adapter.is_ok());
    }

    #[tokio::test]
    async fn missing_key_maps_to_configuration_error() {
        let adapter = ChatCompletionAdapter::with_config(ChatConfig::default()).unwrap();
        let prompt = ChatPrompt::new("system", "user");
        let result = adapter.complete(&prompt).await;
        assert!(matches!(result, Err(ApplicationError::Configuration(_))));
    }

    #[test]
    fn map_error_timeout_is_retryable() {
        let err = map_error(ChatError::Timeout);
        assert!(matches!(err, ApplicationError::ExternalService(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn map_error_server_error_is_external() {
        let err = map_error(ChatError::ServerError("Status 500: boom".into()));
        assert!(matches!(err, ApplicationError::ExternalService(_)));
    }

    #[test]
    fn map_error_malformed_response() {
        let err = map_error(ChatError::MalformedResponse("no choices".into()));
        assert!(matches!(err, ApplicationError::MalformedResponse(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn map_error_rate_limited() {
        let err = map_error(ChatError::RateLimited);
        assert!(matches!(err, ApplicationError::RateLimited));
    }

    #[test]
    fn adapter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ChatCompletionAdapter>();
    }
}
