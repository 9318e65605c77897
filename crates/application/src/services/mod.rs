//! Application services

mod keyword_guard;
mod policy_service;
mod weather_service;

pub use keyword_guard::{CLIMATE_KEYWORDS, KeywordTopicGuard};
pub use policy_service::{
    MAX_COMPLETION_TOKENS, POLICY_SYSTEM_PROMPT, PolicyService, REJECTION_MESSAGE,
};
pub use weather_service::WeatherService;
