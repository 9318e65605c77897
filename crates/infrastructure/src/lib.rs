//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: provider adapters
//! for weather and chat completion, the policy response cache, the
//! configuration loader, and the template engine behind the policy
//! prompt and the dashboard page.

pub mod adapters;
pub mod cache;
pub mod config;
pub mod templates;

pub use adapters::*;
pub use cache::{MokaCache, MokaCacheConfig, generate_cache_key, policy_cache_key};
pub use config::{
    AppConfig, CacheConfig, ChatAppConfig, DashboardConfig, Environment, ServerConfig,
    WeatherAppConfig,
};
pub use templates::{DashboardData, TemplateConfig, TemplateEngine, TemplateError};
