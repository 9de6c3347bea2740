//! HTTP service for the SkyRoute route optimizer.
//!
//! # Endpoints
//!
//! - `GET /api/airports` - Airports in the current network
//! - `POST /api/optimize-route` - Optimal route between two airports
//! - `GET /api/health` - Status with uptime
//! - `GET /api/test` - Connectivity check
//! - `GET /metrics` - Prometheus metrics
//! - `GET /health/live` / `GET /health/ready` - Liveness and readiness
//!
//! # Configuration
//!
//! - `SKYROUTE_AIRPORTS` - Airport dataset (JSON or CSV); the sample network when unset
//! - `SERVICE_PORT` - HTTP port (default: 5000)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - `json` (default) or `text`
//! - `SERVICE_NAME` - Service name in the startup log (default: skyroute)
//! - `METRICS_ENABLED` - `false` disables the Prometheus recorder

#![deny(warnings)]

pub mod config;
pub mod handlers;
pub mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod problem;
pub mod request;
pub mod response;
pub mod state;

pub use config::ServiceConfig;
pub use handlers::router;
pub use health::{api_health, health_live, health_ready, ApiHealth, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{init_metrics, metrics_handler, MetricsConfig, MetricsError};
pub use middleware::{status_class, RequestId, TelemetryLayer, REQUEST_ID_HEADER};
pub use problem::{ProblemDetails, ProblemKind, PROBLEM_CONTENT_TYPE};
pub use request::{OptimizeRouteRequest, Validate};
pub use response::{ApiResponse, ServiceResponse};
pub use state::{AppState, AppStateError};
