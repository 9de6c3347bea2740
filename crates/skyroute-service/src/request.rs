//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use skyroute_lib::{RouteMetric, RouteRequest};

use crate::ProblemDetails;

/// Validation trait for request types.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` populates the `instance` field of any returned
    /// `ProblemDetails`. The error is boxed to keep `Result` small.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Body of `POST /api/optimize-route`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeRouteRequest {
    /// Origin airport code.
    pub origin: String,

    /// Destination airport code.
    pub destination: String,

    /// `cost` (default), `distance` or `time`, case-insensitive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
}

impl OptimizeRouteRequest {
    /// Parsed metric, defaulting to cost.
    pub fn metric(&self) -> Result<RouteMetric, skyroute_lib::Error> {
        match self.metric.as_deref() {
            None => Ok(RouteMetric::default()),
            Some(value) => value.parse(),
        }
    }

    /// Library request with trimmed codes.
    ///
    /// Call [`Validate::validate`] first; an unparseable metric falls back to cost here.
    pub fn to_route_request(&self) -> RouteRequest {
        RouteRequest::new(
            self.origin.trim(),
            self.destination.trim(),
            self.metric().unwrap_or_default(),
        )
    }
}

impl Validate for OptimizeRouteRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        let origin = self.origin.trim();
        let destination = self.destination.trim();

        if origin.is_empty() {
            return Err(Box::new(ProblemDetails::invalid_request(
                "The 'origin' field is required and cannot be empty",
                request_id,
            )));
        }

        if destination.is_empty() {
            return Err(Box::new(ProblemDetails::invalid_request(
                "The 'destination' field is required and cannot be empty",
                request_id,
            )));
        }

        if origin == destination {
            return Err(Box::new(ProblemDetails::invalid_request(
                format!("Origin and destination are both '{}'", origin),
                request_id,
            )));
        }

        if let Err(err) = self.metric() {
            return Err(Box::new(ProblemDetails::invalid_request(
                err.to_string(),
                request_id,
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(origin: &str, destination: &str, metric: Option<&str>) -> OptimizeRouteRequest {
        OptimizeRouteRequest {
            origin: origin.to_string(),
            destination: destination.to_string(),
            metric: metric.map(str::to_string),
        }
    }

    #[test]
    fn valid_request() {
        assert!(request("JFK", "LAX", None).validate("req").is_ok());
        assert!(request("JFK", "LAX", Some("TIME")).validate("req").is_ok());
    }

    #[test]
    fn empty_origin_rejected() {
        let problem = request("  ", "LAX", None).validate("req-1").unwrap_err();
        assert_eq!(problem.status, 400);
        assert!(problem.detail.contains("'origin'"));
        assert_eq!(problem.instance, "req-1");
    }

    #[test]
    fn empty_destination_rejected() {
        let problem = request("JFK", "", None).validate("req").unwrap_err();
        assert!(problem.detail.contains("'destination'"));
    }

    #[test]
    fn identical_codes_rejected() {
        let problem = request("JFK", " JFK ", None).validate("req").unwrap_err();
        assert_eq!(problem.status, 400);
        assert!(problem.detail.contains("JFK"));
    }

    #[test]
    fn unknown_metric_rejected() {
        let problem = request("JFK", "LAX", Some("speed")).validate("req").unwrap_err();
        assert!(problem.detail.contains("speed"));
    }

    #[test]
    fn metric_defaults_to_cost() {
        let body: OptimizeRouteRequest =
            serde_json::from_str(r#"{"origin":"JFK","destination":"LAX"}"#).unwrap();
        assert_eq!(body.metric().unwrap(), RouteMetric::Cost);
        let lib = request(" JFK", "LAX ", Some("distance")).to_route_request();
        assert_eq!(lib.origin, "JFK");
        assert_eq!(lib.destination, "LAX");
        assert_eq!(lib.metric, RouteMetric::Distance);
    }
}
