//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod cached_policy_adapter;
mod chat_adapter;
mod weather_adapter;

pub use cached_policy_adapter::CachedPolicyAdapter;
pub use chat_adapter::ChatCompletionAdapter;
pub use weather_adapter::{OpenMeteoAdapter, WeatherApiAdapter};
