//! Domain entities
//!
//! All entities here are transient: they live for one request cycle (or one
//! cache entry) and are never persisted.

mod forecast_table;
mod policy;
mod weather_bundle;

pub use forecast_table::{ChartKind, ForecastRow, ForecastTable};
pub use policy::{
    DEFAULT_MODEL, DEFAULT_PROMPT, DEFAULT_TEMPERATURE, PolicyOutcome, PolicyParams, PolicyResult,
};
pub use weather_bundle::{CITY_NOT_FOUND, DailySeries, ForecastPayload, WeatherBundle};
