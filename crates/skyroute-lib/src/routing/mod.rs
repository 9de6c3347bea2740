//! Route optimization over a built [`RouteGraph`].
//!
//! This module provides:
//! - [`RouteMetric`] - the edge weight being minimized
//! - [`RouteRequest`] - origin, destination and metric for one query
//! - [`OptimizationResult`] - the chosen path with display aggregates
//! - [`plan_route`] - validates a request and runs the search

mod metric;

pub use metric::RouteMetric;

use serde::Serialize;
use tracing::debug;

use crate::airport::AirportSet;
use crate::error::{Error, Result};
use crate::graph::{round_tenths, Route, RouteGraph};
use crate::path::find_route_dijkstra;

/// Maximum number of fuzzy suggestions attached to an unknown-code error.
const MAX_SUGGESTIONS: usize = 3;

/// High-level route optimization request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub origin: String,
    pub destination: String,
    pub metric: RouteMetric,
}

impl RouteRequest {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        metric: RouteMetric,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            metric,
        }
    }

    /// Request optimized for total cost.
    pub fn cheapest(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self::new(origin, destination, RouteMetric::Cost)
    }
}

/// Optimal path plus aggregates computed from the rounded segment values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationResult {
    pub metric: RouteMetric,
    pub origin: String,
    pub destination: String,
    /// Routes in travel order, origin first.
    pub path: Vec<Route>,
    /// Sum of whole-mile segment distances.
    pub total_distance: u64,
    /// Sum of whole-unit segment costs.
    pub total_cost: u64,
    /// Sum of one-decimal segment hours, itself rounded to one decimal.
    pub total_time: f64,
    pub stops: usize,
}

impl OptimizationResult {
    /// Aggregate a non-empty path of routes.
    pub fn from_path(metric: RouteMetric, path: Vec<Route>) -> Result<Self> {
        let (Some(first), Some(last)) = (path.first(), path.last()) else {
            return Err(Error::EmptyRoutePlan);
        };
        let origin = first.origin.clone();
        let destination = last.destination.clone();

        let total_distance: u64 = path.iter().map(Route::distance_miles).sum();
        let total_cost: u64 = path.iter().map(Route::total_cost_rounded).sum();
        let total_time = round_tenths(path.iter().map(Route::flight_hours).sum());
        let stops = path.len() - 1;

        Ok(Self {
            metric,
            origin,
            destination,
            path,
            total_distance,
            total_cost,
            total_time,
            stops,
        })
    }

    /// Full-precision weight of the path under its metric.
    pub fn weight(&self) -> f64 {
        self.path.iter().map(|route| self.metric.weight(route)).sum()
    }

    /// Airport codes visited, origin to destination.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes = Vec::with_capacity(self.path.len() + 1);
        codes.push(self.origin.as_str());
        codes.extend(self.path.iter().map(|route| route.destination.as_str()));
        codes
    }
}

/// Compute the optimal route for `request` over `graph`.
///
/// Unknown codes report up to three fuzzy suggestions drawn from `airports`.
/// Identical origin and destination is rejected rather than answered with an
/// empty itinerary.
pub fn plan_route(
    airports: &AirportSet,
    graph: &RouteGraph,
    request: &RouteRequest,
) -> Result<OptimizationResult> {
    ensure_known(airports, &request.origin)?;
    ensure_known(airports, &request.destination)?;

    if request.origin == request.destination {
        return Err(Error::SameOriginDestination {
            code: request.origin.clone(),
        });
    }

    let metric = request.metric;
    let path = find_route_dijkstra(graph, &request.origin, &request.destination, |route| {
        metric.weight(route)
    })
    .ok_or_else(|| Error::RouteNotFound {
        origin: request.origin.clone(),
        destination: request.destination.clone(),
    })?;

    let result = OptimizationResult::from_path(metric, path)?;
    debug!(
        origin = %result.origin,
        destination = %result.destination,
        %metric,
        stops = result.stops,
        "route optimized"
    );
    Ok(result)
}

fn ensure_known(airports: &AirportSet, code: &str) -> Result<()> {
    if airports.contains(code) {
        return Ok(());
    }
    Err(Error::UnknownAirport {
        code: code.to_string(),
        suggestions: airports.fuzzy_matches(code, MAX_SUGGESTIONS),
    })
}
