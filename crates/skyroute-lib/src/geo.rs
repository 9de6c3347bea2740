//! Great-circle distance and per-flight cost derivation.
//!
//! Everything here is a pure function of airport coordinates and fees. The
//! graph builder calls [`CostModel::derive_edge_metrics`] once per ordered
//! airport pair.

use serde::{Deserialize, Serialize};

use crate::airport::Airport;
use crate::error::{Error, Result};

/// Mean Earth radius used by the haversine formula, in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Fuel cost charged per flown mile, in currency units.
pub const DEFAULT_FUEL_COST_PER_MILE: f64 = 0.8;

/// Average cruise speed used to estimate flight time, in miles per hour.
pub const DEFAULT_CRUISE_SPEED_MPH: f64 = 500.0;

/// Orthodromic distance in miles between two points given in decimal degrees.
///
/// Symmetric in its endpoints; identical coordinates yield `0.0`. Callers are
/// responsible for passing sensible latitude/longitude ranges.
pub fn great_circle_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push `a` marginally outside [0, 1] for near-antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Full-precision attributes of a directed flight between two airports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeMetrics {
    /// Great-circle distance in miles.
    pub distance: f64,
    /// Fuel cost for the distance flown.
    pub fuel_cost: f64,
    /// Fuel cost plus the fees of both endpoints.
    pub total_cost: f64,
    /// Estimated flight time in hours.
    pub flight_time: f64,
}

/// Constants used to turn a distance into a cost and a duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostModel {
    pub fuel_cost_per_mile: f64,
    pub cruise_speed_mph: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            fuel_cost_per_mile: DEFAULT_FUEL_COST_PER_MILE,
            cruise_speed_mph: DEFAULT_CRUISE_SPEED_MPH,
        }
    }
}

impl CostModel {
    /// Create a validated cost model.
    ///
    /// The fuel rate must be finite and non-negative and the cruise speed
    /// finite and strictly positive, so every derived edge weight stays
    /// non-negative.
    pub fn new(fuel_cost_per_mile: f64, cruise_speed_mph: f64) -> Result<Self> {
        if !fuel_cost_per_mile.is_finite() || fuel_cost_per_mile < 0.0 {
            return Err(Error::InvalidCostModel {
                message: format!(
                    "fuel cost per mile must be a non-negative number, got {fuel_cost_per_mile}"
                ),
            });
        }
        if !cruise_speed_mph.is_finite() || cruise_speed_mph <= 0.0 {
            return Err(Error::InvalidCostModel {
                message: format!("cruise speed must be a positive number, got {cruise_speed_mph}"),
            });
        }
        Ok(Self {
            fuel_cost_per_mile,
            cruise_speed_mph,
        })
    }

    /// Derive distance, cost and time for a flight from `origin` to `destination`.
    pub fn derive_edge_metrics(&self, origin: &Airport, destination: &Airport) -> EdgeMetrics {
        let distance = great_circle_distance(
            origin.latitude,
            origin.longitude,
            destination.latitude,
            destination.longitude,
        );
        let fuel_cost = distance * self.fuel_cost_per_mile;

        EdgeMetrics {
            distance,
            fuel_cost,
            total_cost: fuel_cost + origin.fee + destination.fee,
            flight_time: distance / self.cruise_speed_mph,
        }
    }
}

/// Derive edge metrics using the default cost model.
pub fn derive_edge_metrics(origin: &Airport, destination: &Airport) -> EdgeMetrics {
    CostModel::default().derive_edge_metrics(origin, destination)
}
