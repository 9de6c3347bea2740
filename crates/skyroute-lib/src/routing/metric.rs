use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::graph::Route;

/// Edge-weight interpretation used when optimizing a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteMetric {
    /// Fuel cost plus airport fees (default).
    #[default]
    Cost,
    /// Great-circle miles.
    Distance,
    /// Estimated flight hours.
    Time,
}

impl RouteMetric {
    pub const ALL: [RouteMetric; 3] = [RouteMetric::Cost, RouteMetric::Distance, RouteMetric::Time];

    /// Full-precision weight of `route` under this metric.
    pub fn weight(self, route: &Route) -> f64 {
        match self {
            RouteMetric::Cost => route.total_cost,
            RouteMetric::Distance => route.distance,
            RouteMetric::Time => route.flight_time,
        }
    }

    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            RouteMetric::Cost => "cost",
            RouteMetric::Distance => "distance",
            RouteMetric::Time => "time",
        }
    }
}

impl fmt::Display for RouteMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteMetric {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        RouteMetric::ALL
            .into_iter()
            .find(|metric| metric.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| Error::UnknownMetric {
                value: value.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("COST".parse::<RouteMetric>().unwrap(), RouteMetric::Cost);
        assert_eq!(" distance ".parse::<RouteMetric>().unwrap(), RouteMetric::Distance);
        assert_eq!("Time".parse::<RouteMetric>().unwrap(), RouteMetric::Time);
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "speed".parse::<RouteMetric>().unwrap_err();
        assert!(matches!(err, Error::UnknownMetric { ref value } if value == "speed"));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for metric in RouteMetric::ALL {
            assert_eq!(metric.to_string().parse::<RouteMetric>().unwrap(), metric);
        }
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RouteMetric::Time).unwrap(), "\"time\"");
        let parsed: RouteMetric = serde_json::from_str("\"distance\"").unwrap();
        assert_eq!(parsed, RouteMetric::Distance);
    }
}
