//! Policy composition service
//!
//! Orchestrates the full recommendation pipeline: topic guard, weather
//! aggregation, prompt templating, and the chat completion call.

use std::{fmt, sync::Arc, time::Instant};

use async_trait::async_trait;
use domain::{PolicyOutcome, PolicyParams, PolicyResult};
use tracing::{debug, instrument};

use crate::{
    error::ApplicationError,
    ports::{ChatPort, ChatPrompt, PolicyPort, PromptTemplatePort, TopicGuardPort},
    services::WeatherService,
};

/// System prompt framing every completion request
pub const POLICY_SYSTEM_PROMPT: &str = "You are a climate policy expert.";

/// Message returned when the topic guard rejects a prompt
pub const REJECTION_MESSAGE: &str =
    "This model is designed for climate-related problems. Please provide a climate-related prompt.";

/// Default completion token ceiling for policy generation
pub const MAX_COMPLETION_TOKENS: u32 = 1000;

/// Service composing policy recommendations from weather data
pub struct PolicyService {
    weather: Arc<WeatherService>,
    chat: Arc<dyn ChatPort>,
    guard: Arc<dyn TopicGuardPort>,
    templates: Arc<dyn PromptTemplatePort>,
    max_tokens: u32,
}

impl fmt::Debug for PolicyService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyService").finish_non_exhaustive()
    }
}

impl PolicyService {
    /// Create a new policy service
    pub fn new(
        weather: Arc<WeatherService>,
        chat: Arc<dyn ChatPort>,
        guard: Arc<dyn TopicGuardPort>,
        templates: Arc<dyn PromptTemplatePort>,
    ) -> Self {
        Self {
            weather,
            chat,
            guard,
            templates,
            max_tokens: MAX_COMPLETION_TOKENS,
        }
    }

    /// Override the completion token ceiling
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[async_trait]
impl PolicyPort for PolicyService {
    /// Generate a policy recommendation for the given parameters
    ///
    /// Off-topic prompts are rejected before any weather or model call
    /// is made. The weather bundle is embedded in the result even when
    /// it carries provider errors; only chat and templating failures
    /// abort the pipeline.
    #[instrument(
        skip(self, params),
        fields(city = %params.city, model = %params.model, temperature = params.temperature)
    )]
    async fn generate(&self, params: &PolicyParams) -> Result<PolicyOutcome, ApplicationError> {
        if !self.guard.in_scope(&params.user_prompt) {
            debug!("Prompt rejected by topic guard");
            return Ok(PolicyOutcome::Rejected {
                message: REJECTION_MESSAGE.to_string(),
            });
        }

        let start = Instant::now();

        let weather = self.weather.fetch_bundle(&params.city).await;
        let weather_json = serde_json::to_string(&weather)
            .map_err(|e| ApplicationError::Internal(format!("weather serialization: {e}")))?;

        let user_prompt = self.templates.render_policy_prompt(
            &params.user_prompt,
            params.city.as_str(),
            &weather_json,
        )?;

        let prompt = ChatPrompt::new(POLICY_SYSTEM_PROMPT, user_prompt)
            .with_model(&params.model)
            .with_temperature(params.temperature)
            .with_max_tokens(self.max_tokens);

        let reply = self.chat.complete(&prompt).await?;

        debug!(
            latency_ms = start.elapsed().as_millis(),
            weather_error = weather.has_error(),
            policy_chars = reply.content.len(),
            "Policy generated"
        );

        Ok(PolicyOutcome::Generated(PolicyResult {
            city: params.city.to_string(),
            weather,
            policy_text: reply.content,
        }))
    }
}
