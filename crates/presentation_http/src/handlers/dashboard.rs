//! Dashboard page and its JSON/PDF helper endpoints
//!
//! Everything here reads the single-slot session written by `/policy`.
//! The page itself is server-rendered; the table, geocode, and report
//! endpoints feed the browser-side views.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
};
use domain::{CityName, ForecastTable, GeoLocation};
use report::ReportContext;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::ApiError,
    state::{AppState, SessionEntry},
};

/// Forecast days summarized on the report's weather page
const REPORT_SUMMARY_DAYS: usize = 3;

/// Render the dashboard page
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    responses(
        (status = 200, description = "Server-rendered dashboard page", content_type = "text/html")
    )
)]
#[instrument(skip(state))]
pub async fn dashboard_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let data = state
        .config
        .dashboard
        .to_dashboard_data(&state.config.chat);
    let page = state
        .templates
        .render_dashboard(&data)
        .map_err(|e| ApiError::Internal(format!("dashboard render failed: {e}")))?;
    Ok(Html(page))
}

/// Daily forecast table for the charts tab
///
/// Derived from the last generated result. An existing result without a
/// forecast payload yields an empty table, not an error.
#[utoipa::path(
    get,
    path = "/dashboard/table",
    tag = "dashboard",
    responses(
        (status = 200, description = "Row-per-day forecast table", body = crate::openapi::ForecastTableSchema),
        (status = 404, description = "No policy has been generated yet", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn dashboard_table(
    State(state): State<AppState>,
) -> Result<Json<ForecastTable>, ApiError> {
    let entry = require_session_entry(&state)?;
    Ok(Json(ForecastTable::from_bundle(&entry.result.weather)))
}

/// PDF report for the last generated result
///
/// Sends the rendered document as an attachment, reusing the session's
/// cached rendering when the export tab's preview already produced one.
/// When the renderer is compiled out (or degrades to empty bytes) the
/// response is a 200 JSON notice instead of an error, so the export tab
/// can show a message.
#[utoipa::path(
    get,
    path = "/dashboard/report",
    tag = "dashboard",
    responses(
        (status = 200, description = "PDF attachment, or a JSON unavailability notice", content_type = "application/pdf"),
        (status = 404, description = "No policy has been generated yet", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn dashboard_report(State(state): State<AppState>) -> Result<Response, ApiError> {
    let entry = require_session_entry(&state)?;

    if !report::pdf_export_enabled() {
        return Ok(Json(export_unavailable_body()).into_response());
    }

    let bytes = match state.session.latest_pdf() {
        Some(cached) => cached.as_ref().clone(),
        None => {
            let context = report_context_for(&entry);
            let bytes = report::render_policy_pdf(&context)
                .map_err(|e| ApiError::Internal(format!("report rendering failed: {e}")))?;
            if !bytes.is_empty() {
                state.session.store_pdf(bytes.clone());
            }
            bytes
        },
    };
    if bytes.is_empty() {
        return Ok(Json(export_unavailable_body()).into_response());
    }

    let filename = report::report_filename(&entry.result.city, &entry.generated_at);
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (header::CONTENT_DISPOSITION, attachment_disposition(&filename)),
    ];
    Ok((headers, bytes).into_response())
}

/// Query parameters for `/dashboard/geocode`
#[derive(Debug, Deserialize, IntoParams)]
pub struct GeocodeQuery {
    /// City to place the map marker at
    pub city: Option<String>,
}

/// Map marker coordinates
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"latitude": 31.5497, "longitude": 74.3436}))]
pub struct GeocodeResponse {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<GeoLocation> for GeocodeResponse {
    fn from(location: GeoLocation) -> Self {
        Self {
            latitude: location.latitude(),
            longitude: location.longitude(),
        }
    }
}

/// Resolve a city for the map marker
///
/// Never fails: an invalid city, a geocoding miss, and a provider error
/// all fall back to the default marker position.
#[utoipa::path(
    get,
    path = "/dashboard/geocode",
    tag = "dashboard",
    params(GeocodeQuery),
    responses(
        (status = 200, description = "Marker coordinates, default position on any failure", body = GeocodeResponse)
    )
)]
#[instrument(skip(state, query), fields(city = query.city.as_deref().unwrap_or_default()))]
pub async fn dashboard_geocode(
    State(state): State<AppState>,
    Query(query): Query<GeocodeQuery>,
) -> Json<GeocodeResponse> {
    let location = match CityName::new(query.city.unwrap_or_default()) {
        Ok(city) => match state.weather_service.geocode(&city).await {
            Ok(Some(location)) => location,
            Ok(None) => {
                debug!("No geocoding match, using default marker");
                GeoLocation::lahore()
            },
            Err(error) => {
                debug!(%error, "Geocoding failed, using default marker");
                GeoLocation::lahore()
            },
        },
        Err(_) => GeoLocation::lahore(),
    };
    Json(location.into())
}

fn require_session_entry(state: &AppState) -> Result<Arc<SessionEntry>, ApiError> {
    state
        .session
        .latest()
        .ok_or_else(|| ApiError::NotFound("no_result".to_string()))
}

fn report_context_for(entry: &SessionEntry) -> ReportContext {
    let table = ForecastTable::from_bundle(&entry.result.weather);
    ReportContext {
        city: entry.result.city.clone(),
        generated_at: entry.generated_at,
        summary_lines: table.summary_lines(REPORT_SUMMARY_DAYS),
        policy_text: entry.result.policy_text.clone(),
    }
}

fn attachment_disposition(filename: &str) -> String {
    format!("attachment; filename=\"{filename}\"")
}

fn export_unavailable_body() -> serde_json::Value {
    serde_json::json!({
        "error": "PDF export unavailable",
        "detail": "the server was built without the pdf-export feature",
    })
}
