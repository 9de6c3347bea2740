#![allow(dead_code)]

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skyroute_lib::{Airport, EdgeMetrics, Route, RouteGraph};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn airport(code: &str, latitude: f64, longitude: f64, fee: f64) -> Airport {
    Airport::new(code, format!("{code} Airport"), format!("{code} City"), latitude, longitude, fee)
}

/// JFK, LAX and ORD with their real coordinates and fees.
pub fn three_airports() -> Vec<Airport> {
    skyroute_lib::sample_airports()
        .into_iter()
        .filter(|a| matches!(a.code.as_str(), "JFK" | "LAX" | "ORD"))
        .collect()
}

/// Route whose metrics all equal `weight`.
pub fn uniform_route(origin: &str, destination: &str, weight: f64) -> Route {
    Route::with_metrics(
        origin,
        destination,
        EdgeMetrics {
            distance: weight,
            fuel_cost: weight,
            total_cost: weight,
            flight_time: weight,
        },
    )
}

/// Route with independent distance, cost and time.
pub fn route(origin: &str, destination: &str, distance: f64, cost: f64, time: f64) -> Route {
    Route::with_metrics(
        origin,
        destination,
        EdgeMetrics {
            distance,
            fuel_cost: distance * 0.8,
            total_cost: cost,
            flight_time: time,
        },
    )
}

/// Complete directed graph over `codes` with independent pseudo-random metrics.
pub fn random_complete_graph(codes: &[&str], seed: u64) -> RouteGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut routes = Vec::new();
    for origin in codes {
        for destination in codes {
            if origin != destination {
                routes.push(route(
                    origin,
                    destination,
                    rng.gen_range(1.0..100.0),
                    rng.gen_range(1.0..100.0),
                    rng.gen_range(1.0..100.0),
                ));
            }
        }
    }
    RouteGraph::from_routes(routes)
}

/// Minimum weight over every simple path from `origin` to `destination`.
pub fn brute_force_minimum(
    graph: &RouteGraph,
    origin: &str,
    destination: &str,
    weight: &dyn Fn(&Route) -> f64,
) -> Option<f64> {
    fn visit(
        graph: &RouteGraph,
        current: &str,
        destination: &str,
        weight: &dyn Fn(&Route) -> f64,
        visited: &mut Vec<String>,
        so_far: f64,
        best: &mut Option<f64>,
    ) {
        if current == destination {
            if best.map_or(true, |b| so_far < b) {
                *best = Some(so_far);
            }
            return;
        }
        for route in graph.neighbours(current) {
            if visited.iter().any(|v| *v == route.destination) {
                continue;
            }
            visited.push(route.destination.clone());
            visit(
                graph,
                &route.destination,
                destination,
                weight,
                visited,
                so_far + weight(route),
                best,
            );
            visited.pop();
        }
    }

    let mut best = None;
    let mut visited = vec![origin.to_string()];
    visit(graph, origin, destination, weight, &mut visited, 0.0, &mut best);
    best
}
