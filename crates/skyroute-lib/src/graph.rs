use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::airport::{Airport, AirportSet};
use crate::geo::{CostModel, EdgeMetrics};

/// Directed flight between two distinct airports.
///
/// Metric fields keep full precision; the `*_rounded` accessors give the
/// values shown to users and summed into route totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub origin: String,
    pub destination: String,
    pub distance: f64,
    pub fuel_cost: f64,
    pub total_cost: f64,
    pub flight_time: f64,
}

impl Route {
    /// Derive the route from `origin` to `destination` under `model`.
    pub fn between(origin: &Airport, destination: &Airport, model: &CostModel) -> Self {
        let metrics = model.derive_edge_metrics(origin, destination);
        Self::with_metrics(origin.code.clone(), destination.code.clone(), metrics)
    }

    /// Build a route from precomputed metrics.
    pub fn with_metrics(
        origin: impl Into<String>,
        destination: impl Into<String>,
        metrics: EdgeMetrics,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            distance: metrics.distance,
            fuel_cost: metrics.fuel_cost,
            total_cost: metrics.total_cost,
            flight_time: metrics.flight_time,
        }
    }

    /// `ORIGIN-DESTINATION` identifier.
    pub fn id(&self) -> String {
        format!("{}-{}", self.origin, self.destination)
    }

    /// Full-precision metrics of this route.
    pub fn metrics(&self) -> EdgeMetrics {
        EdgeMetrics {
            distance: self.distance,
            fuel_cost: self.fuel_cost,
            total_cost: self.total_cost,
            flight_time: self.flight_time,
        }
    }

    /// Distance rounded to whole miles.
    pub fn distance_miles(&self) -> u64 {
        round_whole(self.distance)
    }

    /// Total cost rounded to whole currency units.
    pub fn total_cost_rounded(&self) -> u64 {
        round_whole(self.total_cost)
    }

    /// Fuel cost rounded to whole currency units.
    pub fn fuel_cost_rounded(&self) -> u64 {
        round_whole(self.fuel_cost)
    }

    /// Flight time in hours, rounded to one decimal place.
    pub fn flight_hours(&self) -> f64 {
        round_tenths(self.flight_time)
    }
}

/// Round a non-negative quantity half away from zero to an integer.
pub(crate) fn round_whole(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

/// Round to one decimal place.
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Adjacency of directed routes keyed by origin code.
///
/// Cloning is cheap; the adjacency is shared.
#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    adjacency: Arc<HashMap<String, Vec<Route>>>,
    route_count: usize,
}

impl RouteGraph {
    /// Build a graph from an explicit list of routes.
    ///
    /// Self-loops are dropped. Used for custom networks whose weights do not
    /// come from airport geometry.
    pub fn from_routes(routes: impl IntoIterator<Item = Route>) -> Self {
        let mut adjacency: HashMap<String, Vec<Route>> = HashMap::new();
        let mut route_count = 0;
        for route in routes {
            if route.origin == route.destination {
                continue;
            }
            adjacency.entry(route.destination.clone()).or_default();
            adjacency.entry(route.origin.clone()).or_default().push(route);
            route_count += 1;
        }
        Self {
            adjacency: Arc::new(adjacency),
            route_count,
        }
    }

    /// Outgoing routes from `code`; empty for unknown codes.
    pub fn neighbours(&self, code: &str) -> &[Route] {
        self.adjacency
            .get(code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The direct route from `origin` to `destination`, if one exists.
    pub fn route(&self, origin: &str, destination: &str) -> Option<&Route> {
        self.neighbours(origin)
            .iter()
            .find(|route| route.destination == destination)
    }

    /// Whether `code` is a node, including nodes with no outgoing routes.
    pub fn contains(&self, code: &str) -> bool {
        self.adjacency.contains_key(code)
    }

    /// Number of distinct airport codes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of directed routes; `n * (n - 1)` for a built airport set.
    pub fn route_count(&self) -> usize {
        self.route_count
    }

    /// All routes, in no particular order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.adjacency.values().flatten()
    }
}

/// Build the complete directed graph over `airports`.
///
/// Every ordered pair of distinct airports gets exactly one route, so `n`
/// airports produce `n * (n - 1)` routes.
pub fn build_graph(airports: &AirportSet, model: &CostModel) -> RouteGraph {
    let mut adjacency: HashMap<String, Vec<Route>> = HashMap::with_capacity(airports.len());
    let mut route_count = 0;

    for origin in airports {
        let routes: Vec<Route> = airports
            .iter()
            .filter(|destination| destination.code != origin.code)
            .map(|destination| Route::between(origin, destination, model))
            .collect();
        route_count += routes.len();
        adjacency.insert(origin.code.clone(), routes);
    }

    debug!(
        airports = airports.len(),
        routes = route_count,
        "built route graph"
    );

    RouteGraph {
        adjacency: Arc::new(adjacency),
        route_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_helpers() {
        assert_eq!(round_whole(2.5), 3);
        assert_eq!(round_whole(2.49), 2);
        assert_eq!(round_whole(-1.0), 0);
        assert_eq!(round_tenths(1.25), 1.3);
        assert_eq!(round_tenths(4.04), 4.0);
    }

    #[test]
    fn from_routes_drops_self_loops() {
        let metrics = EdgeMetrics {
            distance: 1.0,
            fuel_cost: 0.8,
            total_cost: 1.0,
            flight_time: 0.1,
        };
        let graph = RouteGraph::from_routes(vec![
            Route::with_metrics("A", "A", metrics),
            Route::with_metrics("A", "B", metrics),
        ]);
        assert_eq!(graph.route_count(), 1);
        assert_eq!(graph.node_count(), 2);
        assert!(graph.route("A", "B").is_some());
        assert!(graph.route("B", "A").is_none());
        assert!(graph.neighbours("B").is_empty());
    }
}
