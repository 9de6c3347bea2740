//! SkyRoute library entry points.
//!
//! This crate models a fixed airport network as a complete directed graph of
//! flights and answers shortest-path queries over it under a selectable cost
//! metric. Higher-level consumers (CLI, HTTP service) should only depend on the
//! functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod airport;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod geo;
pub mod graph;
pub mod output;
pub mod path;
pub mod routing;

pub use airport::{Airport, AirportSet};
pub use dataset::{
    airports_from_csv_reader, airports_from_json_reader, load_airports, load_airports_or_sample,
    resolve_airports_path, sample_airports, AIRPORTS_ENV_VAR,
};
pub use engine::{GraphSnapshot, RouteGraphEngine};
pub use error::{Error, Result};
pub use geo::{derive_edge_metrics, great_circle_distance, CostModel, EdgeMetrics};
pub use graph::{build_graph, Route, RouteGraph};
pub use output::{format_with_separators, RouteEndpoint, RouteSegment, RouteSummary};
pub use path::find_route_dijkstra;
pub use routing::{plan_route, OptimizationResult, RouteMetric, RouteRequest};
