//! Policy generation handler

use axum::{
    Json,
    extract::{Query, State},
};
use domain::{CityName, PolicyOutcome, PolicyParams};
use infrastructure::ChatAppConfig;
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;

use crate::{error::ApiError, state::AppState};

/// Query parameters for `/policy`
///
/// Everything except `city` is optional; defaults come from the chat
/// configuration so the dashboard controls and the bare single-parameter
/// call produce the same request.
#[derive(Debug, Deserialize, IntoParams)]
pub struct PolicyQuery {
    /// City to generate policy for
    pub city: Option<String>,
    /// Free-form prompt steering the policy
    pub user_prompt: Option<String>,
    /// Chat model to use
    pub model: Option<String>,
    /// Sampling temperature, 0.0 to 1.0
    pub temperature: Option<f32>,
}

/// Resolve query parameters against the configured defaults
fn build_params(query: PolicyQuery, chat: &ChatAppConfig) -> Result<PolicyParams, ApiError> {
    let city = CityName::new(query.city.unwrap_or_default())?;
    let params = PolicyParams::new(
        city,
        query
            .user_prompt
            .unwrap_or_else(|| domain::DEFAULT_PROMPT.to_string()),
        query.model.unwrap_or_else(|| chat.default_model.clone()),
        query.temperature.unwrap_or(chat.default_temperature),
    )?;
    Ok(params)
}

/// Generate a climate policy suggestion for a city
///
/// Served through the response cache. A generated result also becomes the
/// dashboard session's latest entry; rejections and failures leave the
/// session untouched.
#[utoipa::path(
    get,
    path = "/policy",
    tag = "policy",
    params(PolicyQuery),
    responses(
        (status = 200, description = "Generated policy or topic-guard rejection", body = crate::openapi::PolicyResultSchema),
        (status = 422, description = "Invalid city or temperature", body = crate::error::ErrorResponse),
        (status = 502, description = "Chat provider failed", body = crate::error::ErrorResponse)
    )
)]
#[instrument(
    skip(state, query),
    fields(
        city = query.city.as_deref().unwrap_or_default(),
        model = query.model.as_deref().unwrap_or_default(),
    )
)]
pub async fn get_policy(
    State(state): State<AppState>,
    Query(query): Query<PolicyQuery>,
) -> Result<Json<PolicyOutcome>, ApiError> {
    let params = build_params(query, &state.config.chat)?;
    let outcome = state.policy.generate(&params).await?;

    if let Some(result) = outcome.result() {
        state.session.store(result.clone());
    }

    Ok(Json(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(json: &str) -> PolicyQuery {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn query_deserializes_all_fields() {
        let q = query(
            r#"{"city": "Lahore", "user_prompt": "Reduce smog", "model": "gpt-5-nano", "temperature": 0.7}"#,
        );
        assert_eq!(q.city.as_deref(), Some("Lahore"));
        assert_eq!(q.user_prompt.as_deref(), Some("Reduce smog"));
        assert_eq!(q.model.as_deref(), Some("gpt-5-nano"));
        assert_eq!(q.temperature, Some(0.7));
    }

    #[test]
    fn query_deserializes_city_only() {
        let q = query(r#"{"city": "Lahore"}"#);
        assert_eq!(q.city.as_deref(), Some("Lahore"));
        assert!(q.user_prompt.is_none());
        assert!(q.model.is_none());
        assert!(q.temperature.is_none());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let params = build_params(query(r#"{"city": "Lahore"}"#), &ChatAppConfig::default()).unwrap();
        assert_eq!(params.city.as_str(), "Lahore");
        assert_eq!(params.user_prompt, domain::DEFAULT_PROMPT);
        assert_eq!(params.model, domain::DEFAULT_MODEL);
        assert!((params.temperature - domain::DEFAULT_TEMPERATURE).abs() < f32::EPSILON);
    }

    #[test]
    fn explicit_values_win_over_defaults() {
        let params = build_params(
            query(r#"{"city": "Berlin", "user_prompt": "Focus on transit", "model": "gpt-5-nano", "temperature": 0.9}"#),
            &ChatAppConfig::default(),
        )
        .unwrap();
        assert_eq!(params.city.as_str(), "Berlin");
        assert_eq!(params.user_prompt, "Focus on transit");
        assert_eq!(params.model, "gpt-5-nano");
        assert!((params.temperature - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn configured_model_becomes_the_default() {
        let chat = ChatAppConfig {
            default_model: "gpt-5-nano".to_string(),
            ..Default::default()
        };
        let params = build_params(query(r#"{"city": "Lahore"}"#), &chat).unwrap();
        assert_eq!(params.model, "gpt-5-nano");
    }

    #[test]
    fn missing_city_is_a_validation_error() {
        let err = build_params(query("{}"), &ChatAppConfig::default()).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn blank_city_is_a_validation_error() {
        let err = build_params(query(r#"{"city": "   "}"#), &ChatAppConfig::default()).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn out_of_range_temperature_is_a_validation_error() {
        let err = build_params(
            query(r#"{"city": "Lahore", "temperature": 1.5}"#),
            &ChatAppConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn boundary_temperatures_are_accepted() {
        for json in [
            r#"{"city": "Lahore", "temperature": 0.0}"#,
            r#"{"city": "Lahore", "temperature": 1.0}"#,
        ] {
            assert!(build_params(query(json), &ChatAppConfig::default()).is_ok());
        }
    }
}
