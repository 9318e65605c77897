//! Weather aggregation service
//!
//! Merges the geocoding + daily-forecast provider and the
//! current-conditions provider into one bundle per request. Aggregation
//! never fails: provider errors are embedded in the bundle's `error`
//! field so the endpoint layer can always answer with a body.

use std::{fmt, sync::Arc};

use domain::{CityName, GeoLocation, WeatherBundle};
use tracing::{debug, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{CurrentConditionsPort, ForecastPort},
};

/// Service aggregating both weather providers
pub struct WeatherService {
    forecast: Arc<dyn ForecastPort>,
    current: Arc<dyn CurrentConditionsPort>,
}

impl fmt::Debug for WeatherService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherService").finish_non_exhaustive()
    }
}

impl WeatherService {
    /// Create a new aggregation service
    pub fn new(forecast: Arc<dyn ForecastPort>, current: Arc<dyn CurrentConditionsPort>) -> Self {
        Self { forecast, current }
    }

    /// Fetch and merge weather data for a city
    ///
    /// Geocoding misses produce the "City not found" bundle without
    /// touching either provider. Provider failures are recorded in the
    /// bundle while the other provider's payload is retained. The two
    /// provider calls are independent and issued concurrently.
    #[instrument(skip(self, city), fields(city = %city))]
    pub async fn fetch_bundle(&self, city: &CityName) -> WeatherBundle {
        let mut bundle = WeatherBundle::new(city.as_str());

        let location = match self.forecast.geocode(city.as_str()).await {
            Ok(Some(location)) => location,
            Ok(None) => {
                debug!("No geocoding match");
                return WeatherBundle::city_not_found(city.as_str());
            },
            Err(e) => {
                warn!(error = %e, "Geocoding failed");
                bundle.push_error(format!("geocoding failed: {e}"));
                // Provider B takes the raw city name, so it can still answer
                match self.current.current_conditions(city.as_str()).await {
                    Ok(payload) => bundle.weatherapi = Some(payload),
                    Err(e) => {
                        warn!(error = %e, "Current conditions fetch failed");
                        bundle.push_error(format!("current conditions fetch failed: {e}"));
                    },
                }
                return bundle;
            },
        };
        bundle.location = Some(location);

        let (forecast_result, current_result) = tokio::join!(
            self.forecast.daily_forecast(&location),
            self.current.current_conditions(city.as_str()),
        );

        match forecast_result {
            Ok(payload) => bundle.open_meteo = Some(payload),
            Err(e) => {
                warn!(error = %e, "Forecast fetch failed");
                bundle.push_error(format!("forecast fetch failed: {e}"));
            },
        }

        match current_result {
            Ok(payload) => bundle.weatherapi = Some(payload),
            Err(e) => {
                warn!(error = %e, "Current conditions fetch failed");
                bundle.push_error(format!("current conditions fetch failed: {e}"));
            },
        }

        debug!(
            days = bundle.forecast_days(),
            has_current = bundle.weatherapi.is_some(),
            has_error = bundle.has_error(),
            "Weather bundle assembled"
        );

        bundle
    }

    /// Resolve a city to coordinates via the forecast provider
    ///
    /// `Ok(None)` means the provider had no match; callers decide how to
    /// degrade.
    #[instrument(skip(self, city), fields(city = %city))]
    pub async fn geocode(
        &self,
        city: &CityName,
    ) -> Result<Option<GeoLocation>, ApplicationError> {
        self.forecast.geocode(city.as_str()).await
    }
}
