//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod cache_port;
mod chat_port;
mod current_conditions_port;
mod forecast_port;
mod policy_port;
mod prompt_template_port;
mod topic_guard_port;

pub use cache_port::{CachePort, CachePortExt, CacheStats, ttl};
#[cfg(test)]
pub use chat_port::MockChatPort;
pub use chat_port::{ChatPort, ChatPrompt, ChatReply};
#[cfg(test)]
pub use current_conditions_port::MockCurrentConditionsPort;
pub use current_conditions_port::CurrentConditionsPort;
#[cfg(test)]
pub use forecast_port::MockForecastPort;
pub use forecast_port::ForecastPort;
pub use policy_port::PolicyPort;
#[cfg(test)]
pub use prompt_template_port::MockPromptTemplatePort;
pub use prompt_template_port::PromptTemplatePort;
#[cfg(test)]
pub use topic_guard_port::MockTopicGuardPort;
pub use topic_guard_port::TopicGuardPort;
