use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::graph::{Route, RouteGraph};

/// Run Dijkstra's algorithm from `start` to `goal`, weighting each route with
/// `weight`.
///
/// Returns the routes of the lowest-weight path in travel order, or `None`
/// when `goal` is unreachable. `start == goal` yields an empty path.
///
/// Ties are deterministic: among queued airports with equal tentative weight
/// the lexicographically lowest code is settled first, and a predecessor is
/// only replaced by a strictly lighter one. The search stops as soon as
/// `goal` is settled. Routes with a negative or non-finite weight are ignored.
pub fn find_route_dijkstra<'g, F>(
    graph: &'g RouteGraph,
    start: &str,
    goal: &str,
    weight: F,
) -> Option<Vec<Route>>
where
    F: Fn(&Route) -> f64,
{
    if start == goal {
        return Some(Vec::new());
    }

    let mut distances: HashMap<&str, f64> = HashMap::new();
    let mut parents: HashMap<&'g str, &'g Route> = HashMap::new();
    let mut settled: HashSet<&str> = HashSet::new();
    let mut queue = BinaryHeap::new();

    distances.insert(start, 0.0);
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        if !settled.insert(entry.node) {
            continue;
        }
        if entry.node == goal {
            return reconstruct_path(&parents, start, goal);
        }

        let current_distance = entry.cost.0;
        for route in graph.neighbours(entry.node) {
            let next = route.destination.as_str();
            if settled.contains(next) {
                continue;
            }

            let edge_weight = weight(route);
            if !edge_weight.is_finite() || edge_weight < 0.0 {
                continue;
            }

            let next_cost = current_distance + edge_weight;
            if next_cost < *distances.get(next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, next_cost);
                parents.insert(next, route);
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    None
}

fn reconstruct_path(
    parents: &HashMap<&str, &Route>,
    start: &str,
    goal: &str,
) -> Option<Vec<Route>> {
    let mut path = Vec::new();
    let mut current = goal;
    while current != start {
        // A chain longer than the parent map means a cycle.
        if path.len() > parents.len() {
            return None;
        }
        let route = parents.get(current)?;
        path.push((*route).clone());
        current = route.origin.as_str();
    }
    path.reverse();
    Some(path)
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry<'a> {
    node: &'a str,
    cost: FloatOrd,
}

impl<'a> QueueEntry<'a> {
    fn new(node: &'a str, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys: BinaryHeap pops the cheapest, then lowest code.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
