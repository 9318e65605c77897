//! OpenAPI documentation module
//!
//! Provides OpenAPI 3.0 documentation for the climate policy API.
//! Includes Swagger UI and ReDoc for interactive API exploration.

// Allow clippy warnings from macro-generated code in utoipa derive
#![allow(clippy::needless_for_each)]

use axum::{Router, response::Html, routing::get};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable as RedocServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::{handlers, state::AppState};

/// OpenAPI documentation for the climate policy dashboard
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Climate Policy Dashboard API",
        version = "0.1.0",
        description = "Weather-grounded climate policy suggestions with a server-rendered dashboard",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Liveness endpoints"),
        (name = "weather", description = "Weather aggregation across both providers"),
        (name = "policy", description = "Climate policy generation"),
        (name = "dashboard", description = "Dashboard page and its helper endpoints")
    ),
    paths(
        // Liveness
        handlers::health::root,
        handlers::health::health_check,
        // Weather and policy API
        handlers::weather::get_weather,
        handlers::policy::get_policy,
        // Dashboard
        handlers::dashboard::dashboard_page,
        handlers::dashboard::dashboard_table,
        handlers::dashboard::dashboard_report,
        handlers::dashboard::dashboard_geocode,
    ),
    components(
        schemas(
            handlers::health::ApiInfo,
            handlers::dashboard::GeocodeResponse,
            crate::error::ErrorResponse,
            // Domain schemas (inline re-definitions for OpenAPI)
            WeatherBundleSchema,
            GeoPointSchema,
            PolicyResultSchema,
            PolicyRejectionSchema,
            ForecastTableSchema,
            ForecastRowSchema,
        )
    )
)]
#[derive(Debug)]
pub struct ApiDoc;

/// Coordinate pair for OpenAPI documentation
#[derive(Debug, utoipa::ToSchema)]
#[allow(dead_code)]
pub struct GeoPointSchema {
    pub latitude: f64,
    pub longitude: f64,
}

/// Simplified weather bundle schema for OpenAPI documentation
#[derive(Debug, utoipa::ToSchema)]
#[schema(example = json!({
    "city": "Lahore",
    "location": {"latitude": 31.5497, "longitude": 74.3436},
    "open_meteo": {"daily": {"time": ["2025-08-25"], "temperature_2m_max": [36.1]}},
    "weatherapi": {"current": {"temp_c": 34.0}}
}))]
#[allow(dead_code)]
pub struct WeatherBundleSchema {
    /// Requested city
    pub city: String,
    /// Resolved coordinates, absent when geocoding failed
    pub location: Option<GeoPointSchema>,
    /// Open-Meteo daily forecast payload
    #[schema(value_type = Object)]
    pub open_meteo: Option<serde_json::Value>,
    /// WeatherAPI.com current conditions payload
    #[schema(value_type = Object)]
    pub weatherapi: Option<serde_json::Value>,
    /// Provider errors, newline-joined; present only when something failed
    pub error: Option<String>,
}

/// Generated policy schema for OpenAPI documentation
#[derive(Debug, utoipa::ToSchema)]
#[allow(dead_code)]
pub struct PolicyResultSchema {
    /// City the policy is for
    pub city: String,
    /// Weather bundle the policy was grounded on
    pub weather: WeatherBundleSchema,
    /// Generated policy text
    pub policy: String,
}

/// Topic-guard rejection schema for OpenAPI documentation
///
/// `/policy` answers with this shape (still 200) when the prompt is not
/// climate-related.
#[derive(Debug, utoipa::ToSchema)]
#[schema(example = json!({
    "message": "This model is designed for climate-related problems. Please provide a climate-related prompt."
}))]
#[allow(dead_code)]
pub struct PolicyRejectionSchema {
    pub message: String,
}

/// One forecast day for OpenAPI documentation
#[derive(Debug, utoipa::ToSchema)]
#[allow(dead_code)]
pub struct ForecastRowSchema {
    pub date: String,
    pub max_temp: Option<f64>,
    pub min_temp: Option<f64>,
    pub precipitation: Option<f64>,
}

/// Daily forecast table schema for OpenAPI documentation
#[derive(Debug, utoipa::ToSchema)]
#[allow(dead_code)]
pub struct ForecastTableSchema {
    /// Display labels, unit-annotated, in row order
    pub columns: Vec<String>,
    pub rows: Vec<ForecastRowSchema>,
    /// Drawable charts: `max_temperature`, `min_temperature`, `precipitation`
    pub charts: Vec<String>,
}

/// Create OpenAPI documentation routes
///
/// Adds the following routes:
/// - `/api-docs/openapi.json` - OpenAPI specification (used by Swagger UI)
/// - `/swagger-ui/*` - Swagger UI interactive documentation
/// - `/redoc` - ReDoc documentation
pub fn create_openapi_routes() -> Router<AppState> {
    let redoc = Redoc::with_url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        // ReDoc documentation
        .route("/redoc", get(|| async move { Html(redoc.to_html()) }))
        // Swagger UI with assets - SwaggerUi will serve /api-docs/openapi.json internally
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
