use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the SkyRoute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Two airports in one input set share a code. The whole build is rejected.
    #[error("duplicate airport code encountered: {code}")]
    DuplicateAirportCode { code: String },

    /// An airport record failed validation (empty code, bad coordinates, negative fee).
    #[error("invalid airport '{code}': {message}")]
    InvalidAirport { code: String, message: String },

    /// Raised when an airport code could not be found in the built network.
    #[error("unknown airport code: {code}{}", format_suggestions(.suggestions))]
    UnknownAirport {
        code: String,
        suggestions: Vec<String>,
    },

    /// Raised when a query names the same airport as origin and destination.
    #[error("origin and destination are both {code}")]
    SameOriginDestination { code: String },

    /// Raised when querying an engine before any airport set was built.
    #[error("route graph has not been built")]
    GraphNotBuilt,

    /// Raised when no route could be found between two airports.
    #[error("no route found between {origin} and {destination}")]
    RouteNotFound { origin: String, destination: String },

    /// Raised when a computed route plan lacks any segments.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Raised when a metric name does not match any supported metric.
    #[error("unknown route metric '{value}'; expected one of: cost, distance, time")]
    UnknownMetric { value: String },

    /// Raised when cost model constants are unusable.
    #[error("invalid cost model: {message}")]
    InvalidCostModel { message: String },

    /// Raised when an airport dataset file is malformed.
    #[error("invalid airport data: {message}")]
    AirportData { message: String },

    /// Airport dataset could not be located at the resolved path.
    #[error("airport dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_airport_without_suggestions() {
        let err = Error::UnknownAirport {
            code: "ZZZ".to_string(),
            suggestions: vec![],
        };
        assert_eq!(err.to_string(), "unknown airport code: ZZZ");
    }

    #[test]
    fn unknown_airport_lists_suggestions() {
        let err = Error::UnknownAirport {
            code: "JFX".to_string(),
            suggestions: vec!["JFK".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown airport code: JFX. Did you mean 'JFK'?"
        );

        let err = Error::UnknownAirport {
            code: "LA".to_string(),
            suggestions: vec!["LAX".to_string(), "ATL".to_string()],
        };
        assert!(err.to_string().ends_with("Did you mean one of: 'LAX', 'ATL'?"));
    }
}
