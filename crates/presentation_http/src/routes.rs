//! Route definitions

use axum::{Router, routing::get};

use crate::{handlers, openapi, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Liveness
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        // Weather and policy API
        .route("/weather", get(handlers::weather::get_weather))
        .route("/policy", get(handlers::policy::get_policy))
        // Dashboard page and its helper endpoints
        .route("/dashboard", get(handlers::dashboard::dashboard_page))
        .route("/dashboard/table", get(handlers::dashboard::dashboard_table))
        .route("/dashboard/report", get(handlers::dashboard::dashboard_report))
        .route(
            "/dashboard/geocode",
            get(handlers::dashboard::dashboard_geocode),
        )
        // OpenAPI spec, Swagger UI, ReDoc
        .merge(openapi::create_openapi_routes())
        // Attach state
        .with_state(state)
}
