//! Weather provider integrations
//!
//! Clients for the two weather providers the dashboard aggregates:
//! Open-Meteo (<https://open-meteo.com>) for geocoding and daily
//! forecasts, keyless; and WeatherAPI.com for current conditions,
//! keyed.

pub mod client;
mod models;
pub mod weatherapi;

pub use client::{OpenMeteoClient, WeatherConfig, WeatherError};
pub use models::{GeocodingPlace, GeocodingResponse};
pub use weatherapi::{WeatherApiClient, WeatherApiConfig};
