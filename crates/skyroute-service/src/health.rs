//! Health check handlers.
//!
//! `/health/live` and `/health/ready` serve orchestrator health checks;
//! `/api/health` serves the legacy status body with process uptime.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// "ok" or "not_ready: <reason>".
    pub status: String,

    pub service: String,

    pub version: String,

    /// Number of airports in the current graph (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airports_loaded: Option<usize>,

    /// Number of routes in the current graph (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routes: Option<usize>,
}

impl HealthStatus {
    /// Liveness body.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            airports_loaded: None,
            routes: None,
        }
    }

    /// Readiness body with the size of the current graph.
    pub fn ready(service: &str, version: &str, airports: usize, routes: usize) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            airports_loaded: Some(airports),
            routes: Some(routes),
        }
    }

    /// Readiness failure; `status` becomes `not_ready: <reason>`.
    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            airports_loaded: None,
            routes: None,
        }
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiHealth {
    /// Always "healthy" while the process answers.
    pub status: String,
    /// Seconds since startup.
    pub uptime: f64,
    /// RFC 3339 time of the response.
    pub timestamp: String,
    pub started_at: String,
    pub airports: usize,
}

/// Liveness check. 200 whenever the process is running.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"skyroute-service","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness check. 503 until a non-empty route graph has been built.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let Some(snapshot) = state.engine().snapshot() else {
        let status = HealthStatus::not_ready(service, version, "route graph not built");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    };

    let airports = snapshot.airports().len();
    if airports == 0 {
        let status = HealthStatus::not_ready(service, version, "no airports loaded");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(service, version, airports, snapshot.graph().route_count());
    (StatusCode::OK, Json(status)).into_response()
}

/// `GET /api/health`.
pub async fn api_health(State(state): State<AppState>) -> Json<ApiHealth> {
    Json(ApiHealth {
        status: "healthy".to_string(),
        uptime: state.uptime_secs(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        started_at: state
            .started_at()
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        airports: state.engine().list_airports().len(),
    })
}
