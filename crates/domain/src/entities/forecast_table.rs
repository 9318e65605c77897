//! Row-per-day forecast table derived from the Open-Meteo payload
//!
//! This is the view model behind the charts tab and the PDF weather
//! summary: one row per forecast day, columns annotated with the unit
//! strings the provider supplied, and a chart only for each column that is
//! actually present.

use serde::{Deserialize, Serialize};

use crate::entities::{ForecastPayload, WeatherBundle};

/// Charts that can be derived from the daily forecast columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    MaxTemperature,
    MinTemperature,
    Precipitation,
}

impl ChartKind {
    /// Display title for the chart
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::MaxTemperature => "Daily Max Temperature",
            Self::MinTemperature => "Daily Min Temperature",
            Self::Precipitation => "Daily Precipitation",
        }
    }
}

/// One forecast day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_temp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_temp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<f64>,
}

/// Derived daily-forecast table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastTable {
    /// Display labels in row order: `date`, then each present column
    /// annotated with its unit (`temperature_2m_max (°C)` style)
    pub columns: Vec<String>,
    pub rows: Vec<ForecastRow>,
    /// Charts drawable from the present columns
    pub charts: Vec<ChartKind>,
}

impl ForecastTable {
    /// Derive the table from a forecast payload
    ///
    /// Produces exactly one row per entry in the `time` array. A column
    /// (and its chart) is included only when the corresponding daily array
    /// is present; rows shorter than `time` leave the missing cells empty.
    #[must_use]
    pub fn from_forecast(payload: &ForecastPayload) -> Self {
        let Some(daily) = payload.daily.as_ref() else {
            return Self::default();
        };

        let mut columns = vec!["date".to_string()];
        let mut charts = Vec::new();

        if daily.temperature_2m_max.is_some() {
            columns.push(labeled("temperature_2m_max", payload));
            charts.push(ChartKind::MaxTemperature);
        }
        if daily.temperature_2m_min.is_some() {
            columns.push(labeled("temperature_2m_min", payload));
            charts.push(ChartKind::MinTemperature);
        }
        if daily.precipitation_sum.is_some() {
            columns.push(labeled("precipitation_sum", payload));
            charts.push(ChartKind::Precipitation);
        }

        let rows = daily
            .time
            .iter()
            .enumerate()
            .map(|(i, date)| ForecastRow {
                date: date.clone(),
                max_temp: cell(daily.temperature_2m_max.as_deref(), i),
                min_temp: cell(daily.temperature_2m_min.as_deref(), i),
                precipitation: cell(daily.precipitation_sum.as_deref(), i),
            })
            .collect();

        Self {
            columns,
            rows,
            charts,
        }
    }

    /// Derive the table from a weather bundle (empty when the bundle has no
    /// Open-Meteo payload)
    #[must_use]
    pub fn from_bundle(bundle: &WeatherBundle) -> Self {
        bundle
            .open_meteo
            .as_ref()
            .map_or_else(Self::default, Self::from_forecast)
    }

    /// Whether the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Short per-day summary lines for the PDF report, first `limit` days
    ///
    /// Format: `2025-08-25: Max 36.1, Min 27.8, Precip 0.5` with absent
    /// fields omitted.
    #[must_use]
    pub fn summary_lines(&self, limit: usize) -> Vec<String> {
        self.rows
            .iter()
            .take(limit)
            .map(|row| {
                let mut parts = Vec::new();
                if let Some(v) = row.max_temp {
                    parts.push(format!("Max {v}"));
                }
                if let Some(v) = row.min_temp {
                    parts.push(format!("Min {v}"));
                }
                if let Some(v) = row.precipitation {
                    parts.push(format!("Precip {v}"));
                }
                if parts.is_empty() {
                    format!("{}:", row.date)
                } else {
                    format!("{}: {}", row.date, parts.join(", "))
                }
            })
            .collect()
    }
}

/// Column label with the provider's unit string appended when present
fn labeled(field: &str, payload: &ForecastPayload) -> String {
    match payload.unit_for(field) {
        Some(unit) if !unit.is_empty() => format!("{field} ({unit})"),
        _ => field.to_string(),
    }
}

fn cell(series: Option<&[f64]>, index: usize) -> Option<f64> {
    series.and_then(|values| values.get(index).copied())
}
