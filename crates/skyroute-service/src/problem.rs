//! RFC 9457 problem responses for the route optimizer API.
//!
//! Every failure the API can report is a [`ProblemKind`]; the kind fixes the
//! `type` URI, title and HTTP status, while [`ProblemDetails`] carries the
//! per-request detail. See <https://www.rfc-editor.org/rfc/rfc9457.html>.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use skyroute_lib::Error as LibError;

/// Media type of every problem body.
pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// The failures the route optimizer API distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    /// Malformed body, empty code, identical codes or unknown metric.
    InvalidRequest,
    /// An airport code is not in the current network.
    UnknownAirport,
    /// The destination cannot be reached from the origin.
    RouteNotFound,
    /// No airport set has been built into a route graph yet.
    GraphNotBuilt,
    /// Anything the client cannot fix.
    Internal,
}

impl ProblemKind {
    /// Relative `type` URI identifying the problem.
    pub fn type_uri(self) -> &'static str {
        match self {
            ProblemKind::InvalidRequest => "/problems/invalid-request",
            ProblemKind::UnknownAirport => "/problems/unknown-airport",
            ProblemKind::RouteNotFound => "/problems/route-not-found",
            ProblemKind::GraphNotBuilt => "/problems/graph-not-built",
            ProblemKind::Internal => "/problems/internal-error",
        }
    }

    /// Short human-readable summary, constant per kind.
    pub fn title(self) -> &'static str {
        match self {
            ProblemKind::InvalidRequest => "Invalid Request",
            ProblemKind::UnknownAirport => "Unknown Airport",
            ProblemKind::RouteNotFound => "Route Not Found",
            ProblemKind::GraphNotBuilt => "Route Graph Not Built",
            ProblemKind::Internal => "Internal Error",
        }
    }

    /// HTTP status the kind is served with.
    pub fn status(self) -> StatusCode {
        match self {
            ProblemKind::InvalidRequest => StatusCode::BAD_REQUEST,
            ProblemKind::UnknownAirport | ProblemKind::RouteNotFound => StatusCode::NOT_FOUND,
            ProblemKind::GraphNotBuilt => StatusCode::SERVICE_UNAVAILABLE,
            ProblemKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Label for the `reason` dimension of `skyroute_routes_failed_total`.
    pub fn reason(self) -> &'static str {
        match self {
            ProblemKind::InvalidRequest => "validation_error",
            ProblemKind::UnknownAirport => "unknown_airport",
            ProblemKind::RouteNotFound => "no_path",
            ProblemKind::GraphNotBuilt => "graph_not_built",
            ProblemKind::Internal => "internal_error",
        }
    }

    /// Classify a library error.
    pub fn of(error: &LibError) -> Self {
        match error {
            LibError::UnknownAirport { .. } => ProblemKind::UnknownAirport,
            LibError::RouteNotFound { .. } => ProblemKind::RouteNotFound,
            LibError::SameOriginDestination { .. } | LibError::UnknownMetric { .. } => {
                ProblemKind::InvalidRequest
            }
            LibError::GraphNotBuilt => ProblemKind::GraphNotBuilt,
            _ => ProblemKind::Internal,
        }
    }
}

/// Problem body returned for every non-2xx API answer.
///
/// `suggestions` is an extension member filled for unknown airport codes so
/// clients can offer corrections without parsing `detail`.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemDetails {
    #[serde(skip)]
    pub kind: ProblemKind,
    #[serde(rename = "type")]
    pub type_uri: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    /// Request ID of the failed call.
    pub instance: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ProblemDetails {
    /// Problem of `kind` for the request identified by `request_id`.
    pub fn new(kind: ProblemKind, detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            kind,
            type_uri: kind.type_uri().to_string(),
            title: kind.title().to_string(),
            status: kind.status().as_u16(),
            detail: detail.into(),
            instance: request_id.into(),
            suggestions: Vec::new(),
        }
    }

    /// 400 for input rejected before the engine is consulted.
    pub fn invalid_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(ProblemKind::InvalidRequest, detail, request_id)
    }

    /// Map a library error, carrying fuzzy suggestions for unknown codes.
    pub fn from_error(error: &LibError, request_id: impl Into<String>) -> Self {
        let mut problem = Self::new(ProblemKind::of(error), error.to_string(), request_id);
        if let LibError::UnknownAirport { suggestions, .. } = error {
            problem.suggestions = suggestions.clone();
        }
        problem
    }

    /// Status as an [`axum::http::StatusCode`].
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.title, self.status, self.detail)
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
        );
        response
    }
}
