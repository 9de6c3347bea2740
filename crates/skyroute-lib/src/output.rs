use std::fmt::Write;

use serde::Serialize;

use crate::airport::AirportSet;
use crate::error::{Error, Result};
use crate::routing::{OptimizationResult, RouteMetric};

/// Airport visited by a planned route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteEndpoint {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl RouteEndpoint {
    fn resolve(airports: &AirportSet, code: &str) -> Self {
        let airport = airports.get(code);
        Self {
            code: code.to_string(),
            name: airport.map(|a| a.name.clone()),
            city: airport.map(|a| a.city.clone()),
        }
    }

    fn label(&self) -> String {
        match &self.city {
            Some(city) => format!("{} ({})", self.code, city),
            None => self.code.clone(),
        }
    }
}

/// One flight of a planned route, with display-rounded values.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSegment {
    pub index: usize,
    pub origin: String,
    pub destination: String,
    pub distance: u64,
    pub fuel_cost: u64,
    pub total_cost: u64,
    pub flight_time: f64,
}

/// Structured representation of an optimized route that higher-level
/// consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub metric: RouteMetric,
    pub origin: RouteEndpoint,
    pub destination: RouteEndpoint,
    /// Every airport visited, origin first.
    pub path: Vec<RouteEndpoint>,
    pub segments: Vec<RouteSegment>,
    pub total_distance: u64,
    pub total_cost: u64,
    pub total_time: f64,
    pub stops: usize,
}

impl RouteSummary {
    /// Convert an [`OptimizationResult`] into a summary with resolved airport names.
    pub fn from_result(airports: &AirportSet, result: &OptimizationResult) -> Result<Self> {
        if result.path.is_empty() {
            return Err(Error::EmptyRoutePlan);
        }

        let path = result
            .codes()
            .into_iter()
            .map(|code| RouteEndpoint::resolve(airports, code))
            .collect::<Vec<_>>();

        let segments = result
            .path
            .iter()
            .enumerate()
            .map(|(index, route)| RouteSegment {
                index: index + 1,
                origin: route.origin.clone(),
                destination: route.destination.clone(),
                distance: route.distance_miles(),
                fuel_cost: route.fuel_cost_rounded(),
                total_cost: route.total_cost_rounded(),
                flight_time: route.flight_hours(),
            })
            .collect();

        Ok(Self {
            metric: result.metric,
            origin: RouteEndpoint::resolve(airports, &result.origin),
            destination: RouteEndpoint::resolve(airports, &result.destination),
            path,
            segments,
            total_distance: result.total_distance,
            total_cost: result.total_cost,
            total_time: result.total_time,
            stops: result.stops,
        })
    }

    /// Plain-text rendering used by the CLI.
    pub fn render_text(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} (optimized for {}, {})",
            self.origin.label(),
            self.destination.label(),
            self.metric,
            stops_label(self.stops)
        );
        let joined = self
            .path
            .iter()
            .map(|endpoint| endpoint.code.as_str())
            .collect::<Vec<_>>()
            .join(" -> ");
        let _ = writeln!(buffer, "Path: {joined}");
        let _ = writeln!(buffer);

        for segment in &self.segments {
            let _ = writeln!(
                buffer,
                "{:>3}. {} -> {}  {} mi  ${}  {:.1} h",
                segment.index,
                segment.origin,
                segment.destination,
                format_with_separators(segment.distance),
                format_with_separators(segment.total_cost),
                segment.flight_time
            );
        }

        let _ = writeln!(buffer);
        let _ = writeln!(
            buffer,
            "Total: {} mi, ${}, {:.1} h",
            format_with_separators(self.total_distance),
            format_with_separators(self.total_cost),
            self.total_time
        );
        buffer
    }
}

fn stops_label(stops: usize) -> String {
    match stops {
        0 => "direct".to_string(),
        1 => "1 stop".to_string(),
        n => format!("{n} stops"),
    }
}

/// Format an integer with thousands separators, e.g. `2475` as `2,475`.
pub fn format_with_separators(n: u64) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators() {
        assert_eq!(format_with_separators(0), "0");
        assert_eq!(format_with_separators(999), "999");
        assert_eq!(format_with_separators(1000), "1,000");
        assert_eq!(format_with_separators(2475), "2,475");
        assert_eq!(format_with_separators(1234567), "1,234,567");
    }

    #[test]
    fn stop_labels() {
        assert_eq!(stops_label(0), "direct");
        assert_eq!(stops_label(1), "1 stop");
        assert_eq!(stops_label(3), "3 stops");
    }
}
