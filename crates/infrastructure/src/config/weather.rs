//! Weather provider configuration.

use integration_weather::{WeatherApiConfig, WeatherConfig};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Configuration for both weather providers
///
/// Open-Meteo (geocoding + daily forecast) needs no credentials;
/// WeatherAPI.com (current conditions) requires an API key and stays
/// unconfigured without one.
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherAppConfig {
    /// Open-Meteo geocoding base URL
    #[serde(default = "default_geocoding_base_url")]
    pub geocoding_base_url: String,

    /// Open-Meteo forecast base URL
    #[serde(default = "default_forecast_base_url")]
    pub forecast_base_url: String,

    /// WeatherAPI.com base URL
    #[serde(default = "default_weatherapi_base_url")]
    pub weatherapi_base_url: String,

    /// WeatherAPI.com API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub weatherapi_key: Option<SecretString>,

    /// Connection timeout in seconds for both providers (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_geocoding_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_forecast_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_weatherapi_base_url() -> String {
    "http://api.weatherapi.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for WeatherAppConfig {
    fn default() -> Self {
        Self {
            geocoding_base_url: default_geocoding_base_url(),
            forecast_base_url: default_forecast_base_url(),
            weatherapi_base_url: default_weatherapi_base_url(),
            weatherapi_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl std::fmt::Debug for WeatherAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAppConfig")
            .field("geocoding_base_url", &self.geocoding_base_url)
            .field("forecast_base_url", &self.forecast_base_url)
            .field("weatherapi_base_url", &self.weatherapi_base_url)
            .field(
                "weatherapi_key",
                &if self.weatherapi_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl WeatherAppConfig {
    /// Convert to the Open-Meteo client configuration
    #[must_use]
    pub fn to_open_meteo_config(&self) -> WeatherConfig {
        WeatherConfig {
            base_url: self.forecast_base_url.clone(),
            geocoding_url: self.geocoding_base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }

    /// Convert to the WeatherAPI.com client configuration
    #[must_use]
    pub fn to_weatherapi_config(&self) -> WeatherApiConfig {
        WeatherApiConfig {
            base_url: self.weatherapi_base_url.clone(),
            api_key: self
                .weatherapi_key
                .as_ref()
                .map(|key| SecretString::from(key.expose_secret().to_owned())),
            timeout_secs: self.timeout_secs,
        }
    }
}
