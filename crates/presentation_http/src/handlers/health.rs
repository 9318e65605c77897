//! Liveness handlers

use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Liveness response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"message": "Climate Policy API is running", "version": "0.1.0"}))]
pub struct ApiInfo {
    pub message: String,
    pub version: String,
}

impl ApiInfo {
    fn current() -> Self {
        Self {
            message: "Climate Policy API is running".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// API root - same payload as the health check
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = ApiInfo)
    )
)]
pub async fn root() -> Json<ApiInfo> {
    Json(ApiInfo::current())
}

/// Liveness check - is the server running?
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = ApiInfo)
    )
)]
pub async fn health_check() -> Json<ApiInfo> {
    Json(ApiInfo::current())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_info_serialization() {
        let info = ApiInfo::current();
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("Climate Policy API is running"));
        assert!(json.contains("version"));
    }

    #[test]
    fn api_info_deserialization() {
        let json = r#"{"message":"Climate Policy API is running","version":"0.1.0"}"#;
        let info: ApiInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.message, "Climate Policy API is running");
        assert_eq!(info.version, "0.1.0");
    }

    #[test]
    fn api_info_has_debug() {
        let info = ApiInfo::current();
        let debug = format!("{info:?}");
        assert!(debug.contains("ApiInfo"));
    }

    #[tokio::test]
    async fn health_check_reports_running() {
        let response = health_check().await;
        assert_eq!(response.message, "Climate Policy API is running");
        assert!(!response.version.is_empty());
    }

    #[tokio::test]
    async fn root_matches_health_check() {
        let root_body = root().await;
        let health_body = health_check().await;
        assert_eq!(root_body.message, health_body.message);
        assert_eq!(root_body.version, health_body.version);
    }
}
