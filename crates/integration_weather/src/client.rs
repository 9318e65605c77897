//! Open-Meteo client
//!
//! HTTP client for the Open-Meteo geocoding and forecast APIs. Both are
//! keyless public services.

use domain::{ForecastPayload, GeoLocation};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::GeocodingResponse;

/// Weather provider errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Provider is missing required credentials
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Open-Meteo configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Forecast API base URL (default: <https://api.open-meteo.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Geocoding API base URL (default: <https://geocoding-api.open-meteo.com/v1>)
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    /// Connection timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            geocoding_url: default_geocoding_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Open-Meteo HTTP client
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenMeteoClient {
    /// Create a new Open-Meteo client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, WeatherError> {
        Self::new(WeatherConfig::default())
    }

    /// Build the forecast request URL for a location
    fn build_forecast_url(&self, location: &GeoLocation) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&daily={}&timezone=auto",
            self.config.base_url,
            location.latitude(),
            location.longitude(),
            "temperature_2m_max,temperature_2m_min,precipitation_sum",
        )
    }

    /// Resolve a city name to coordinates
    ///
    /// Returns `Ok(None)` when the search produced no match; the provider
    /// signals that by omitting the `results` field.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the response cannot be
    /// parsed.
    #[instrument(skip(self))]
    pub async fn geocode(&self, city: &str) -> Result<Option<GeoLocation>, WeatherError> {
        let url = format!("{}/search", self.config.geocoding_url);
        debug!(url = %url, city = %city, "Geocoding city");

        let response = self
            .client
            .get(&url)
            .query(&[("name", city)])
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

        let geocoding: GeocodingResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))?;

        let Some(place) = geocoding.best_match() else {
            debug!(city = %city, "No geocoding match");
            return Ok(None);
        };

        let location = GeoLocation::new(place.latitude, place.longitude)
            .map_err(|e| WeatherError::ParseError(e.to_string()))?;
        Ok(Some(location))
    }

    /// Fetch the daily forecast for a location
    ///
    /// Requests daily maximum/minimum temperature and precipitation sum
    /// in the location's own timezone. The payload is returned in the
    /// provider's shape, unknown fields included.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the response cannot be
    /// parsed.
    #[instrument(skip(self), fields(lat = %location.latitude(), lon = %location.longitude()))]
    pub async fn daily_forecast(
        &self,
        location: &GeoLocation,
    ) -> Result<ForecastPayload, WeatherError> {
        let url = self.build_forecast_url(location);
        debug!(url = %url, "Fetching daily forecast");

        let response = self
            .client
            .get(&url)
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
