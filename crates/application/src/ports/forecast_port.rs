//! Forecast provider port (provider A: geocoding + daily forecast)

use async_trait::async_trait;
use domain::{ForecastPayload, value_objects::GeoLocation};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the geocoding + daily-forecast provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForecastPort: Send + Sync {
    /// Resolve a city name to coordinates
    ///
    /// Returns `Ok(None)` when the provider has no match for the name;
    /// `Err` is reserved for transport and provider failures.
    async fn geocode(&self, city: &str) -> Result<Option<GeoLocation>, ApplicationError>;

    /// Fetch the daily forecast (max/min temperature, precipitation,
    /// timezone-aware) for resolved coordinates
    async fn daily_forecast(
        &self,
        location: &GeoLocation,
    ) -> Result<ForecastPayload, ApplicationError>;
}
