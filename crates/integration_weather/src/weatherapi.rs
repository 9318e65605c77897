//! WeatherAPI.com client
//!
//! Second, independent weather provider supplying current conditions by
//! city name. Unlike Open-Meteo it requires an API key; without one the
//! client reports itself unconfigured instead of sending doomed requests.
//! The response payload is passed through verbatim.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::client::WeatherError;

/// WeatherAPI.com configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherApiConfig {
    /// API base URL (default: <http://api.weatherapi.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Connection timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://api.weatherapi.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for WeatherApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl std::fmt::Debug for WeatherApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiConfig")
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

impl WeatherApiConfig {
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

/// WeatherAPI.com HTTP client
#[derive(Debug)]
pub struct WeatherApiClient {
    client: Client,
    config: WeatherApiConfig,
}

impl WeatherApiClient {
    /// Create a new WeatherAPI client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherApiConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Fetch current conditions for a city, by name
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::NotConfigured`] when no API key is set,
    /// and the usual transport/parse errors otherwise.
    #[instrument(skip(self))]
    pub async fn current(&self, city: &str) -> Result<Value, WeatherError> {
        let Some(key) = self.config.api_key_str().filter(|key| !key.is_empty()) else {
            return Err(WeatherError::NotConfigured(
                "WeatherAPI key missing".to_string(),
            ));
        };

        let url = format!("{}/current.json", self.config.base_url);
        debug!(url = %url, city = %city, "Fetching current conditions");

        let response = self
            .client
            .get(&url)
            .query(&[("key", key), ("q", city)])
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(WeatherError::RequestFailed(format!("HTTP {status}")));
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))
    }
}
