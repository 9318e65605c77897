//! Weather adapters - implement the forecast and current-conditions
//! ports using `integration_weather`

use application::error::ApplicationError;
use application::ports::{CurrentConditionsPort, ForecastPort};
use async_trait::async_trait;
use domain::{ForecastPayload, value_objects::GeoLocation};
use integration_weather::{
    OpenMeteoClient, WeatherApiClient, WeatherApiConfig, WeatherConfig, WeatherError,
};
use serde_json::Value;
use tracing::{debug, instrument};

/// Map integration weather errors to application errors
fn map_error(err: WeatherError) -> ApplicationError {
    match err {
        WeatherError::ConnectionFailed(e)
        | WeatherError::RequestFailed(e)
        | WeatherError::ServiceUnavailable(e) => ApplicationError::ExternalService(e),
        WeatherError::ParseError(e) => ApplicationError::MalformedResponse(e),
        WeatherError::NotConfigured(e) => ApplicationError::Configuration(e),
        WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
    }
}

/// Adapter for geocoding and daily forecasts using the Open-Meteo API
#[derive(Debug)]
pub struct OpenMeteoAdapter {
    client: OpenMeteoClient,
}

impl OpenMeteoAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        let client = OpenMeteoClient::with_defaults()
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client =
            OpenMeteoClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ForecastPort for OpenMeteoAdapter {
    #[instrument(skip(self))]
    async fn geocode(&self, city: &str) -> Result<Option<GeoLocation>, ApplicationError> {
        let result = self.client.geocode(city).await.map_err(map_error);

        match &result {
            Ok(Some(location)) => {
                debug!(
                    lat = location.latitude(),
                    lon = location.longitude(),
                    "Geocoded city"
                );
            },
            Ok(None) => {
                debug!("No geocoding match");
            },
            Err(e) => {
                debug!(error = %e, "Geocoding failed");
            },
        }

        result
    }

    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn daily_forecast(
        &self,
        location: &GeoLocation,
    ) -> Result<ForecastPayload, ApplicationError> {
        let result = self.client.daily_forecast(location).await.map_err(map_error);

        match &result {
            Ok(payload) => {
                debug!(days = payload.day_count(), "Retrieved daily forecast");
            },
            Err(e) => {
                debug!(error = %e, "Forecast fetch failed");
            },
        }

        result
    }
}

/// Adapter for current conditions using the WeatherAPI.com API
#[derive(Debug)]
pub struct WeatherApiAdapter {
    client: WeatherApiClient,
}

impl WeatherApiAdapter {
    /// Create a new adapter with default configuration (no API key)
    ///
    /// Without a key every lookup reports the provider as unconfigured,
    /// which the weather service records in the bundle instead of failing.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_config(WeatherApiConfig::default())
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherApiConfig) -> Result<Self, ApplicationError> {
        let client =
            WeatherApiClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl CurrentConditionsPort for WeatherApiAdapter {
    #[instrument(skip(self))]
    async fn current_conditions(&self, city: &str) -> Result<Value, ApplicationError> {
        let result = self.client.current(city).await.map_err(map_error);

        match &result {
            Ok(_) => {
                debug!("Retrieved current conditions");
            },
            Err(e) => {
                debug!(error = %e, "Current conditions fetch failed");
            },
        }

        result
    }
}
