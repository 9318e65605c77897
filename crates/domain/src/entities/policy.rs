//! Policy generation request parameters and outcomes

use serde::{Deserialize, Serialize};

use crate::{entities::WeatherBundle, errors::DomainError, value_objects::CityName};

/// Default model when the caller supplies none
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default sampling temperature when the caller supplies none
pub const DEFAULT_TEMPERATURE: f32 = 0.4;

/// Default prompt for the single-parameter calling convention
pub const DEFAULT_PROMPT: &str = "Suggest climate-friendly policy for this city.";

/// Validated parameters for one policy generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyParams {
    pub city: CityName,
    pub user_prompt: String,
    pub model: String,
    pub temperature: f32,
}

impl PolicyParams {
    /// Create parameters, validating the temperature range
    ///
    /// # Errors
    ///
    /// Returns an error if `temperature` is outside `0.0..=1.0` or the
    /// model name is blank.
    pub fn new(
        city: CityName,
        user_prompt: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
    ) -> Result<Self, DomainError> {
        if !(0.0..=1.0).contains(&temperature) || !temperature.is_finite() {
            return Err(DomainError::InvalidTemperature { value: temperature });
        }
        let model = model.into().trim().to_string();
        if model.is_empty() {
            return Err(DomainError::validation("model must not be empty"));
        }
        Ok(Self {
            city,
            user_prompt: user_prompt.into(),
            model,
            temperature,
        })
    }

    /// Create parameters with the documented defaults for prompt, model,
    /// and temperature
    ///
    /// # Errors
    ///
    /// Never fails for the defaults themselves; kept as a `Result` so the
    /// signature matches [`PolicyParams::new`].
    pub fn with_defaults(city: CityName) -> Result<Self, DomainError> {
        Self::new(city, DEFAULT_PROMPT, DEFAULT_MODEL, DEFAULT_TEMPERATURE)
    }
}

/// Outcome of a policy generation: either the topic guard rejected the
/// prompt, or the model produced a policy
///
/// Serialized untagged so the two wire shapes stay distinct:
/// `{"message": ...}` for rejections, `{"city", "weather", "policy"}`
/// for generated results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PolicyOutcome {
    /// The model produced a policy suggestion
    Generated(PolicyResult),
    /// The prompt was out of scope for this system
    Rejected { message: String },
}

impl PolicyOutcome {
    /// Whether the outcome is a topic-guard rejection
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// The generated policy text, if any
    #[must_use]
    pub fn policy_text(&self) -> Option<&str> {
        match self {
            Self::Generated(result) => Some(&result.policy_text),
            Self::Rejected { .. } => None,
        }
    }

    /// The generated result, if any
    #[must_use]
    pub const fn result(&self) -> Option<&PolicyResult> {
        match self {
            Self::Generated(result) => Some(result),
            Self::Rejected { .. } => None,
        }
    }
}

/// A generated policy together with the weather data it was based on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyResult {
    pub city: String,
    pub weather: WeatherBundle,
    #[serde(rename = "policy")]
    pub policy_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(name: &str) -> CityName {
        CityName::new(name).expect("valid city")
    }

    #[test]
    fn params_accept_valid_temperature_range() {
        assert!(PolicyParams::new(city("Lahore"), "p", "gpt-4o-mini", 0.0).is_ok());
        assert!(PolicyParams::new(city("Lahore"), "p", "gpt-4o-mini", 0.4).is_ok());
        assert!(PolicyParams::new(city("Lahore"), "p", "gpt-4o-mini", 1.0).is_ok());
    }

    #[test]
    fn params_reject_out_of_range_temperature() {
        assert!(PolicyParams::new(city("Lahore"), "p", "gpt-4o-mini", -0.1).is_err());
        assert!(PolicyParams::new(city("Lahore"), "p", "gpt-4o-mini", 1.1).is_err());
        assert!(PolicyParams::new(city("Lahore"), "p", "gpt-4o-mini", f32::NAN).is_err());
    }

    #[test]
    fn params_reject_blank_model() {
        assert!(PolicyParams::new(city("Lahore"), "p", "  ", 0.4).is_err());
    }

    #[test]
    fn defaults_match_documented_contract() {
        let params = PolicyParams::with_defaults(city("Lahore")).expect("defaults valid");
        assert_eq!(params.model, "gpt-4o-mini");
        assert!((params.temperature - 0.4).abs() < f32::EPSILON);
        assert_eq!(params.user_prompt, DEFAULT_PROMPT);
    }

    #[test]
    fn rejected_outcome_serializes_as_message() {
        let outcome = PolicyOutcome::Rejected {
            message: "out of scope".to_string(),
        };
        let json = serde_json::to_value(&outcome).expect("serialize");
        assert_eq!(json["message"], "out of scope");
        assert!(json.get("policy").is_none());
    }

    #[test]
    fn generated_outcome_uses_policy_wire_name() {
        let outcome = PolicyOutcome::Generated(PolicyResult {
            city: "Lahore".to_string(),
            weather: WeatherBundle::new("Lahore"),
            policy_text: "Plant trees.".to_string(),
        });
        let json = serde_json::to_value(&outcome).expect("serialize");
        assert_eq!(json["policy"], "Plant trees.");
        assert_eq!(json["city"], "Lahore");
        assert!(json.get("message").is_none());
    }

    #[test]
    fn outcome_round_trips_both_variants() {
        let rejected = PolicyOutcome::Rejected {
            message: "nope".to_string(),
        };
        let json = serde_json::to_string(&rejected).expect("serialize");
        let back: PolicyOutcome = serde_json::from_str(&json).expect("deserialize");
        assert!(back.is_rejected());

        let generated = PolicyOutcome::Generated(PolicyResult {
            city: "Lahore".to_string(),
            weather: WeatherBundle::city_not_found("Lahore"),
            policy_text: "text".to_string(),
        });
        let json = serde_json::to_string(&generated).expect("serialize");
        let back: PolicyOutcome = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.policy_text(), Some("text"));
    }
}
