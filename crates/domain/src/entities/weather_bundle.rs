//! Merged weather data from both providers
//!
//! The bundle carries provider payloads verbatim. The Open-Meteo forecast is
//! a partially-typed envelope: the daily arrays and units this system reads
//! are typed, everything else the provider sends is kept in a flattened
//! passthrough map so serialization reproduces the original payload. The
//! WeatherAPI payload is fully opaque.
//!
//! Provider failures never abort aggregation; they are recorded in the
//! `error` field while whatever the other provider returned is retained.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::value_objects::GeoLocation;

/// Error message used when geocoding finds no match for a city
pub const CITY_NOT_FOUND: &str = "City not found";

/// Weather data for one city, merged from both providers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherBundle {
    /// City name as supplied by the caller
    pub city: String,

    /// Geocoded coordinates, absent when geocoding failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,

    /// Open-Meteo daily forecast payload (provider A)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_meteo: Option<ForecastPayload>,

    /// WeatherAPI current-conditions payload (provider B), opaque passthrough
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weatherapi: Option<Value>,

    /// Aggregation error(s), present when geocoding or a provider call failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WeatherBundle {
    /// Create an empty bundle for a city
    #[must_use]
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            location: None,
            open_meteo: None,
            weatherapi: None,
            error: None,
        }
    }

    /// Create the error-shaped bundle for a city with no geocoding match
    #[must_use]
    pub fn city_not_found(city: impl Into<String>) -> Self {
        let mut bundle = Self::new(city);
        bundle.error = Some(CITY_NOT_FOUND.to_string());
        bundle
    }

    /// Record a provider failure, appending to any prior error
    pub fn push_error(&mut self, message: impl AsRef<str>) {
        match &mut self.error {
            Some(existing) => {
                existing.push_str("; ");
                existing.push_str(message.as_ref());
            },
            None => self.error = Some(message.as_ref().to_string()),
        }
    }

    /// Whether any part of the aggregation failed
    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Number of forecast days in the Open-Meteo payload
    #[must_use]
    pub fn forecast_days(&self) -> usize {
        self.open_meteo
            .as_ref()
            .map_or(0, ForecastPayload::day_count)
    }
}

/// Partially-typed Open-Meteo forecast envelope
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastPayload {
    /// Daily parallel arrays, absent when the provider omitted them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily: Option<DailySeries>,

    /// Unit string per daily field (e.g. `temperature_2m_max` -> `°C`)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub daily_units: BTreeMap<String, String>,

    /// Everything else from the provider, carried verbatim for display
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl ForecastPayload {
    /// Number of forecast days (length of the `time` array)
    #[must_use]
    pub fn day_count(&self) -> usize {
        self.daily.as_ref().map_or(0, |d| d.time.len())
    }

    /// Unit string for a daily field, if the provider supplied one
    #[must_use]
    pub fn unit_for(&self, field: &str) -> Option<&str> {
        self.daily_units.get(field).map(String::as_str)
    }
}

/// Daily forecast values as parallel arrays keyed by date
///
/// Only the fields this system charts are typed; any additional daily
/// series the provider returns stays in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailySeries {
    /// ISO dates, one per forecast day
    #[serde(default)]
    pub time: Vec<String>,

    /// Daily maximum temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_2m_max: Option<Vec<f64>>,

    /// Daily minimum temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_2m_min: Option<Vec<f64>>,

    /// Daily precipitation sum
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation_sum: Option<Vec<f64>>,

    /// Untyped daily series, carried verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}
