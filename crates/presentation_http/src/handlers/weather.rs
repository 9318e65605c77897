//! Weather aggregation handler

use axum::{
    Json,
    extract::{Query, State},
};
use domain::{CityName, WeatherBundle};
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;

use crate::{error::ApiError, state::AppState};

/// Query parameters for `/weather`
#[derive(Debug, Deserialize, IntoParams)]
pub struct WeatherQuery {
    /// City to fetch weather for
    pub city: Option<String>,
}

/// Fetch the merged weather bundle for a city
///
/// Provider failures are embedded in the bundle's `error` field rather
/// than failing the request; only an invalid city is rejected.
#[utoipa::path(
    get,
    path = "/weather",
    tag = "weather",
    params(WeatherQuery),
    responses(
        (status = 200, description = "Merged weather bundle, provider errors embedded", body = crate::openapi::WeatherBundleSchema),
        (status = 422, description = "Missing or blank city", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, query), fields(city = query.city.as_deref().unwrap_or_default()))]
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherBundle>, ApiError> {
    let city = CityName::new(query.city.unwrap_or_default())?;
    let bundle = state.weather_service.fetch_bundle(&city).await;
    Ok(Json(bundle))
}
