//! API handlers and router assembly.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use skyroute_lib::{Airport, RouteSummary};

use crate::health::{api_health, health_live, health_ready};
use crate::metrics::{
    metrics_handler, record_airports_listed, record_route_failed, record_route_optimized,
    record_route_stops,
};
use crate::middleware::{RequestId, TelemetryLayer};
use crate::problem::{ProblemDetails, ProblemKind};
use crate::request::{OptimizeRouteRequest, Validate};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Body of `GET /api/airports`.
#[derive(Debug, Serialize)]
pub struct AirportsResponse {
    pub airports: Vec<Airport>,
}

/// Body of a successful `POST /api/optimize-route`.
#[derive(Debug, Serialize)]
pub struct OptimizeRouteResponse {
    pub route: RouteSummary,
    /// RFC 3339 time the route was computed.
    pub timestamp: String,
}

/// Body of `GET /api/test`.
#[derive(Debug, Serialize)]
pub struct ConnectivityResponse {
    pub message: &'static str,
    pub status: &'static str,
    pub timestamp: String,
}

/// Build the service router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/airports", get(list_airports_handler))
        .route("/api/optimize-route", post(optimize_route_handler))
        .route("/api/health", get(api_health))
        .route("/api/test", get(connectivity_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(TelemetryLayer)
        .with_state(state)
}

/// `GET /api/airports`: the current airport set in input order.
async fn list_airports_handler(
    State(state): State<AppState>,
    request_id: RequestId,
) -> ApiResponse<AirportsResponse> {
    let airports = state.engine().list_airports();
    info!(request_id = %request_id, count = airports.len(), "listing airports");
    record_airports_listed();
    ApiResponse::ok(AirportsResponse { airports })
}

/// `POST /api/optimize-route`.
async fn optimize_route_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<OptimizeRouteRequest>, JsonRejection>,
) -> ApiResponse<OptimizeRouteResponse> {
    match optimize(&state, &request_id, payload) {
        Ok(response) => ApiResponse::ok(response),
        Err(problem) => {
            warn!(
                request_id = %request_id,
                status = problem.status,
                detail = %problem.detail,
                "route request rejected"
            );
            record_route_failed(problem.kind.reason());
            problem.into()
        }
    }
}

fn optimize(
    state: &AppState,
    request_id: &RequestId,
    payload: Result<Json<OptimizeRouteRequest>, JsonRejection>,
) -> Result<OptimizeRouteResponse, ProblemDetails> {
    let Json(request) = payload.map_err(|rejection| {
        ProblemDetails::invalid_request(rejection.body_text(), request_id.as_str())
    })?;
    request.validate(request_id.as_str()).map_err(|problem| *problem)?;

    info!(
        request_id = %request_id,
        origin = %request.origin,
        destination = %request.destination,
        metric = ?request.metric,
        "optimizing route"
    );

    let snapshot = state.engine().snapshot().ok_or_else(|| {
        ProblemDetails::new(
            ProblemKind::GraphNotBuilt,
            "No airport network has been loaded yet",
            request_id.as_str(),
        )
    })?;

    let to_problem =
        |err: skyroute_lib::Error| ProblemDetails::from_error(&err, request_id.as_str());
    let result = snapshot
        .plan_route(&request.to_route_request())
        .map_err(to_problem)?;
    let route = RouteSummary::from_result(snapshot.airports(), &result).map_err(to_problem)?;

    let metric = result.metric.as_str();
    record_route_optimized(metric);
    record_route_stops(result.stops, metric);
    info!(
        request_id = %request_id,
        stops = route.stops,
        total_distance = route.total_distance,
        total_cost = route.total_cost,
        "route optimized"
    );

    Ok(OptimizeRouteResponse {
        route,
        timestamp: now_rfc3339(),
    })
}

/// `GET /api/test`: connectivity check used by the web front end.
async fn connectivity_handler() -> Json<ConnectivityResponse> {
    Json(ConnectivityResponse {
        message: "Backend is working!",
        status: "success",
        timestamp: now_rfc3339(),
    })
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
