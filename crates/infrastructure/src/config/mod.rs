//! Application configuration
//!
//! Split into focused sub-modules by domain:
//! - `server`: HTTP server settings
//! - `weather`: Open-Meteo and WeatherAPI.com providers
//! - `chat`: hosted chat-completion endpoint
//! - `cache`: policy response cache
//! - `dashboard`: server-rendered dashboard page

mod cache;
mod chat;
mod dashboard;
mod server;
mod weather;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use cache::CacheConfig;
pub use chat::ChatAppConfig;
pub use dashboard::DashboardConfig;
pub use server::ServerConfig;
pub use weather::WeatherAppConfig;

use crate::templates::TemplateConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
///
/// Controls CORS strictness and how much error detail reaches clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - permissive CORS, verbose error bodies
    #[default]
    Development,
    /// Production environment - restricted CORS, sanitized error bodies
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Option<Environment>,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Weather provider configuration
    #[serde(default)]
    pub weather: WeatherAppConfig,

    /// Chat-completion configuration
    #[serde(default)]
    pub chat: ChatAppConfig,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Dashboard configuration
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Template engine configuration
    #[serde(default)]
    pub templates: TemplateConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// Precedence, lowest to highest: built-in defaults, `config.toml`,
    /// `CLIMATE__`-prefixed environment variables, and finally the flat
    /// variables the original deployment used (`AI_ML_API_KEY`,
    /// `AI_ML_BASE_URL`, `WEATHERAPI_KEY`, `BACKEND_URL`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., CLIMATE__SERVER__PORT)
            .add_source(
                config::Environment::with_prefix("CLIMATE")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_flat_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Whether the application runs in production mode
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment == Some(Environment::Production)
    }

    /// Apply the flat environment variables honored for compatibility with
    /// the original deployment; non-empty values override the sections.
    fn apply_flat_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("AI_ML_API_KEY").filter(|v| !v.is_empty()) {
            self.chat.api_key = Some(SecretString::from(key));
        }
        if let Some(url) = lookup("AI_ML_BASE_URL").filter(|v| !v.is_empty()) {
            self.chat.base_url = url;
        }
        if let Some(key) = lookup("WEATHERAPI_KEY").filter(|v| !v.is_empty()) {
            self.weather.weatherapi_key = Some(SecretString::from(key));
        }
        if let Some(url) = lookup("BACKEND_URL").filter(|v| !v.is_empty()) {
            self.dashboard.backend_url = Some(url);
        }
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    // Environment tests
    #[test]
    fn environment_default_is_development() {
        let env = Environment::default();
        assert_eq!(env, Environment::Development);
    }

    #[test]
    fn environment_display() {
        assert_eq!(format!("{}", Environment::Development), "development");
        assert_eq!(format!("{}", Environment::Production), "production");
    }

    #[test]
    fn environment_from_str() {
        assert_eq!(
            "development".parse::<Environment>().unwrap(),
            Environment::Development
        );
        assert_eq!(
            "production".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert_eq!(
            "dev".parse::<Environment>().unwrap(),
            Environment::Development
        );
        assert_eq!(
            "prod".parse::<Environment>().unwrap(),
            Environment::Production
        );
    }

    #[test]
    fn environment_from_str_case_insensitive() {
        assert_eq!(
            "DEVELOPMENT".parse::<Environment>().unwrap(),
            Environment::Development
        );
        assert_eq!(
            "PRODUCTION".parse::<Environment>().unwrap(),
            Environment::Production
        );
    }

    #[test]
    fn environment_from_str_invalid() {
        let result = "invalid".parse::<Environment>();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid environment"));
    }

    #[test]
    fn environment_serialize() {
        let env = Environment::Production;
        let json = serde_json::to_string(&env).unwrap();
        assert_eq!(json, "\"production\"");
    }

    #[test]
    fn environment_deserialize() {
        let env: Environment = serde_json::from_str("\"production\"").unwrap();
        assert_eq!(env, Environment::Production);

        let env: Environment = serde_json::from_str("\"development\"").unwrap();
        assert_eq!(env, Environment::Development);
    }

    #[test]
    fn app_config_with_environment() {
        let json = r#"{"environment":"production"}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.environment, Some(Environment::Production));
        assert!(config.is_production());
    }

    #[test]
    fn app_config_default_is_not_production() {
        let config = AppConfig::default();
        assert!(!config.is_production());
    }

    #[test]
    fn app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.server.cors_enabled);
        assert!(config.cache.enabled);
    }

    #[test]
    fn server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert!(config.cors_enabled);
        assert_eq!(config.max_body_bytes, 1024 * 1024);
    }

    #[test]
    fn app_config_serialization() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("server"));
        assert!(json.contains("weather"));
        assert!(json.contains("chat"));
        assert!(json.contains("dashboard"));
    }

    #[test]
    fn app_config_deserialization() {
        let json = r#"{"server":{"port":8080}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn config_has_debug_impl() {
        let config = AppConfig::default();
        let debug = format!("{config:?}");
        assert!(debug.contains("AppConfig"));
        assert!(debug.contains("server"));
    }

    #[test]
    fn config_clone() {
        let config = AppConfig::default();
        #[allow(clippy::redundant_clone)]
        let cloned = config.clone();
        assert_eq!(config.server.port, cloned.server.port);
    }

    // Weather section tests
    #[test]
    fn weather_config_default() {
        let config = WeatherAppConfig::default();
        assert_eq!(config.forecast_base_url, "https://api.open-meteo.com/v1");
        assert_eq!(
            config.geocoding_base_url,
            "https://geocoding-api.open-meteo.com/v1"
        );
        assert_eq!(config.weatherapi_base_url, "http://api.weatherapi.com/v1");
        assert!(config.weatherapi_key.is_none());
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn weather_config_debug_redacts_key() {
        let config = WeatherAppConfig {
            weatherapi_key: Some(SecretString::from("secret-key")),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret-key"));
    }

    #[test]
    fn weather_config_serialization_skips_key() {
        let config = WeatherAppConfig {
            weatherapi_key: Some(SecretString::from("secret-key")),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret-key"));
        assert!(!json.contains("weatherapi_key"));
    }

    #[test]
    fn weather_config_to_open_meteo_config() {
        let config = WeatherAppConfig {
            forecast_base_url: "http://localhost:9000/v1".to_string(),
            geocoding_base_url: "http://localhost:9001/v1".to_string(),
            timeout_secs: 5,
            ..Default::default()
        };
        let client_config = config.to_open_meteo_config();
        assert_eq!(client_config.base_url, "http://localhost:9000/v1");
        assert_eq!(client_config.geocoding_url, "http://localhost:9001/v1");
        assert_eq!(client_config.timeout_secs, 5);
    }

    #[test]
    fn weather_config_to_weatherapi_config() {
        let config = WeatherAppConfig {
            weatherapi_base_url: "http://localhost:9002/v1".to_string(),
            weatherapi_key: Some(SecretString::from("wapi-key")),
            ..Default::default()
        };
        let client_config = config.to_weatherapi_config();
        assert_eq!(client_config.base_url, "http://localhost:9002/v1");
        assert_eq!(client_config.api_key_str(), Some("wapi-key"));
    }

    // Chat section tests
    #[test]
    fn chat_config_default() {
        let config = ChatAppConfig::default();
        assert_eq!(config.base_url, "https://api.aimlapi.com/v1");
        assert!(config.api_key.is_none());
        assert_eq!(config.default_model, "gpt-4o-mini");
        assert!((config.default_temperature - 0.4).abs() < f32::EPSILON);
        assert_eq!(config.max_tokens, 1000);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn chat_config_debug_redacts_key() {
        let config = ChatAppConfig {
            api_key: Some(SecretString::from("chat-key")),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("chat-key"));
    }

    #[test]
    fn chat_config_to_chat_config() {
        let config = ChatAppConfig {
            base_url: "http://localhost:9003/v1".to_string(),
            api_key: Some(SecretString::from("chat-key")),
            timeout_secs: 10,
            ..Default::default()
        };
        let client_config = config.to_chat_config();
        assert_eq!(client_config.base_url, "http://localhost:9003/v1");
        assert_eq!(client_config.api_key_str(), Some("chat-key"));
        assert_eq!(client_config.timeout_secs, 10);
    }

    #[test]
    fn chat_config_deserialize_overrides() {
        let json = r#"{"default_model":"gpt-5-nano","default_temperature":0.8}"#;
        let config: ChatAppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.default_model, "gpt-5-nano");
        assert!((config.default_temperature - 0.8).abs() < f32::EPSILON);
        // Defaults still apply for unspecified fields
        assert_eq!(config.max_tokens, 1000);
    }

    // Cache section tests
    #[test]
    fn cache_config_default() {
        let config = CacheConfig::default();
        assert!(config.enabled);
        assert_eq!(config.ttl_secs, 5 * 60);
        assert_eq!(config.max_entries, 1024);
        assert_eq!(config.ttl().as_secs(), 300);
    }

    #[test]
    fn cache_config_to_moka_config() {
        let config = CacheConfig {
            enabled: true,
            ttl_secs: 60,
            max_entries: 32,
        };
        let moka = config.to_moka_config();
        assert_eq!(moka.max_entries, 32);
        assert_eq!(moka.default_ttl.as_secs(), 60);
        assert!(moka.time_to_idle.is_none());
    }

    #[test]
    fn cache_config_deserialize() {
        let json = r#"{"enabled":false,"ttl_secs":60}"#;
        let config: CacheConfig = serde_json::from_str(json).unwrap();
        assert!(!config.enabled);
        assert_eq!(config.ttl_secs, 60);
        // Defaults should still apply for unspecified fields
        assert_eq!(config.max_entries, 1024);
    }

    // Dashboard section tests
    #[test]
    fn dashboard_config_default() {
        let config = DashboardConfig::default();
        assert!(config.backend_url.is_none());
        assert_eq!(config.default_city, "Lahore");
        assert_eq!(config.models, vec!["gpt-4o-mini", "gpt-5-nano"]);
    }

    #[test]
    fn dashboard_config_to_dashboard_data() {
        let dashboard = DashboardConfig {
            backend_url: Some("http://localhost:8000".to_string()),
            default_city: "Berlin".to_string(),
            models: vec!["gpt-4o-mini".to_string()],
        };
        let chat = ChatAppConfig {
            default_model: "gpt-4o-mini".to_string(),
            default_temperature: 0.7,
            ..Default::default()
        };

        let data = dashboard.to_dashboard_data(&chat);
        assert_eq!(data.backend_url, "http://localhost:8000");
        assert_eq!(data.default_city, "Berlin");
        assert_eq!(data.default_model, "gpt-4o-mini");
        assert!((data.default_temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(data.default_prompt, domain::DEFAULT_PROMPT);
    }

    #[test]
    fn dashboard_data_backend_url_defaults_to_same_origin() {
        let data = DashboardConfig::default().to_dashboard_data(&ChatAppConfig::default());
        assert_eq!(data.backend_url, "");
    }

    // Flat override tests
    #[test]
    fn flat_overrides_set_secrets_and_urls() {
        let mut config = AppConfig::default();
        config.apply_flat_overrides(|name| match name {
            "AI_ML_API_KEY" => Some("flat-chat-key".to_string()),
            "AI_ML_BASE_URL" => Some("http://localhost:9004/v1".to_string()),
            "WEATHERAPI_KEY" => Some("flat-wapi-key".to_string()),
            "BACKEND_URL" => Some("http://localhost:8000".to_string()),
            _ => None,
        });

        assert_eq!(
            config.chat.api_key.as_ref().map(ExposeSecret::expose_secret),
            Some("flat-chat-key")
        );
        assert_eq!(config.chat.base_url, "http://localhost:9004/v1");
        assert_eq!(
            config
                .weather
                .weatherapi_key
                .as_ref()
                .map(ExposeSecret::expose_secret),
            Some("flat-wapi-key")
        );
        assert_eq!(
            config.dashboard.backend_url.as_deref(),
            Some("http://localhost:8000")
        );
    }

    #[test]
    fn flat_overrides_ignore_empty_values() {
        let mut config = AppConfig::default();
        config.chat.base_url = "http://configured:9005/v1".to_string();

        config.apply_flat_overrides(|name| match name {
            "AI_ML_BASE_URL" => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.chat.base_url, "http://configured:9005/v1");
        assert!(config.chat.api_key.is_none());
    }

    #[test]
    fn flat_overrides_take_precedence_over_sections() {
        let json = r#"{"chat":{"base_url":"http://from-file:1/v1"}}"#;
        let mut config: AppConfig = serde_json::from_str(json).unwrap();

        config.apply_flat_overrides(|name| {
            (name == "AI_ML_BASE_URL").then(|| "http://from-env:2/v1".to_string())
        });

        assert_eq!(config.chat.base_url, "http://from-env:2/v1");
    }

    // Template section tests
    #[test]
    fn templates_section_deserializes() {
        let json = r#"{"templates":{"templates_dir":"templates"}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.templates.templates_dir.as_deref(), Some("templates"));
        assert!(config.templates.use_embedded_fallback);
    }
}
