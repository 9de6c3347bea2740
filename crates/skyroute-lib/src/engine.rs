//! Owned route-graph engine.
//!
//! [`RouteGraphEngine`] holds the current [`GraphSnapshot`] behind a
//! swap-on-build reference. A build constructs the whole snapshot before
//! taking the write lock, so readers either see the previous graph or the new
//! one and never a partially built state. Queries clone the snapshot `Arc`
//! and run without holding any lock.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info, warn};

use crate::airport::{Airport, AirportSet};
use crate::error::{Error, Result};
use crate::geo::CostModel;
use crate::graph::{build_graph, RouteGraph};
use crate::routing::{self, OptimizationResult, RouteMetric, RouteRequest};

/// Immutable airport set and graph produced by one build.
#[derive(Debug, Clone)]
pub struct GraphSnapshot {
    airports: AirportSet,
    graph: RouteGraph,
    cost_model: CostModel,
}

impl GraphSnapshot {
    /// Validate `airports` and derive the complete route graph.
    pub fn build(airports: impl IntoIterator<Item = Airport>, cost_model: CostModel) -> Result<Self> {
        let airports = AirportSet::new(airports)?;
        let graph = build_graph(&airports, &cost_model);
        Ok(Self {
            airports,
            graph,
            cost_model,
        })
    }

    /// Validated airports in input order.
    pub fn airports(&self) -> &AirportSet {
        &self.airports
    }

    /// The complete route graph.
    pub fn graph(&self) -> &RouteGraph {
        &self.graph
    }

    /// Model the route weights were derived with.
    pub fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    /// Checked query against this snapshot.
    pub fn plan_route(&self, request: &RouteRequest) -> Result<OptimizationResult> {
        routing::plan_route(&self.airports, &self.graph, request)
    }

    /// Like [`GraphSnapshot::plan_route`], discarding the error.
    pub fn optimize_route(
        &self,
        origin: &str,
        destination: &str,
        metric: RouteMetric,
    ) -> Option<OptimizationResult> {
        self.plan_route(&RouteRequest::new(origin, destination, metric))
            .ok()
    }
}

/// Route-optimization engine over a replaceable airport network.
///
/// The engine is `Send + Sync`; share it behind an `Arc`.
pub struct RouteGraphEngine {
    cost_model: CostModel,
    current: RwLock<Option<Arc<GraphSnapshot>>>,
}

impl RouteGraphEngine {
    /// Create an engine with the default cost model and no graph.
    pub fn new() -> Self {
        Self::with_cost_model(CostModel::default())
    }

    /// Create an unbuilt engine that prices routes with `cost_model`.
    pub fn with_cost_model(cost_model: CostModel) -> Self {
        Self {
            cost_model,
            current: RwLock::new(None),
        }
    }

    /// Create an engine and build it from `airports` in one step.
    pub fn from_airports(airports: impl IntoIterator<Item = Airport>) -> Result<Self> {
        let engine = Self::new();
        engine.build_graph(airports)?;
        Ok(engine)
    }

    /// Model applied to every subsequent build.
    pub fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    /// Replace the current network with one built from `airports`.
    ///
    /// On error (duplicate code, invalid airport) the previously built graph
    /// stays in place.
    pub fn build_graph(&self, airports: impl IntoIterator<Item = Airport>) -> Result<()> {
        let snapshot = match GraphSnapshot::build(airports, self.cost_model) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "rejected airport set; keeping previous graph");
                return Err(err);
            }
        };
        let airports = snapshot.airports.len();
        let routes = snapshot.graph.route_count();

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Some(Arc::new(snapshot));
        drop(current);

        info!(airports, routes, "route graph swapped in");
        Ok(())
    }

    /// The current snapshot, if a graph has been built.
    pub fn snapshot(&self) -> Option<Arc<GraphSnapshot>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether at least one build has succeeded.
    pub fn is_built(&self) -> bool {
        self.snapshot().is_some()
    }

    /// Current airports in input order; empty before the first build.
    pub fn list_airports(&self) -> Vec<Airport> {
        self.snapshot()
            .map(|snapshot| snapshot.airports.as_slice().to_vec())
            .unwrap_or_default()
    }

    /// Directed routes in the current graph; 0 before the first build.
    pub fn route_count(&self) -> usize {
        self.snapshot()
            .map(|snapshot| snapshot.graph.route_count())
            .unwrap_or(0)
    }

    /// Checked query: explains why no route was produced.
    pub fn plan_route(&self, request: &RouteRequest) -> Result<OptimizationResult> {
        let snapshot = self.snapshot().ok_or(Error::GraphNotBuilt)?;
        debug!(
            origin = %request.origin,
            destination = %request.destination,
            metric = %request.metric,
            "planning route"
        );
        snapshot.plan_route(request)
    }

    /// Optimal route between two codes, or `None` when the query is invalid,
    /// the graph is unbuilt or the destination is unreachable.
    pub fn optimize_route(
        &self,
        origin: &str,
        destination: &str,
        metric: RouteMetric,
    ) -> Option<OptimizationResult> {
        self.plan_route(&RouteRequest::new(origin, destination, metric))
            .ok()
    }
}

impl Default for RouteGraphEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RouteGraphEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("RouteGraphEngine")
            .field("cost_model", &self.cost_model)
            .field("built", &snapshot.is_some())
            .field(
                "airports",
                &snapshot.as_ref().map(|s| s.airports.len()).unwrap_or(0),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::sample_airports;

    #[test]
    fn unbuilt_engine_reports_graph_not_built() {
        let engine = RouteGraphEngine::new();
        assert!(!engine.is_built());
        assert!(engine.list_airports().is_empty());
        assert!(matches!(
            engine.plan_route(&RouteRequest::cheapest("JFK", "LAX")),
            Err(Error::GraphNotBuilt)
        ));
        assert!(engine
            .optimize_route("JFK", "LAX", RouteMetric::Cost)
            .is_none());
    }

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RouteGraphEngine>();
    }

    #[test]
    fn debug_output_summarises_state() {
        let engine = RouteGraphEngine::from_airports(sample_airports()).expect("build");
        let rendered = format!("{engine:?}");
        assert!(rendered.contains("built: true"), "{rendered}");
        assert!(rendered.contains("airports: 8"), "{rendered}");
    }
}
