use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Minimum similarity score for a fuzzy suggestion to be offered.
const SUGGESTION_THRESHOLD: f64 = 0.5;

/// An airport node: identity, location and a fixed per-airport fee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    /// Short unique code used as the graph node key (e.g. `JFK`).
    #[serde(alias = "id")]
    pub code: String,
    pub name: String,
    pub city: String,
    /// Latitude in decimal degrees.
    #[serde(alias = "lat")]
    pub latitude: f64,
    /// Longitude in decimal degrees.
    #[serde(alias = "lng", alias = "lon")]
    pub longitude: f64,
    /// Fee charged on every departure from and arrival at this airport.
    #[serde(alias = "fees", default)]
    pub fee: f64,
}

impl Airport {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        city: impl Into<String>,
        latitude: f64,
        longitude: f64,
        fee: f64,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            city: city.into(),
            latitude,
            longitude,
            fee,
        }
    }

    /// `CODE (City)` label used in route renderings.
    pub fn label(&self) -> String {
        format!("{} ({})", self.code, self.city)
    }

    fn validate(&self) -> Result<()> {
        let invalid = |message: String| Error::InvalidAirport {
            code: self.code.clone(),
            message,
        };

        if self.code.is_empty() {
            return Err(invalid("airport code must not be empty".to_string()));
        }
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(invalid(format!(
                "coordinates must be finite, got ({}, {})",
                self.latitude, self.longitude
            )));
        }
        if !self.fee.is_finite() || self.fee < 0.0 {
            return Err(invalid(format!(
                "fee must be a non-negative number, got {}",
                self.fee
            )));
        }
        Ok(())
    }
}

/// Validated airport collection with unique codes, kept in input order.
#[derive(Debug, Clone, Default)]
pub struct AirportSet {
    airports: Vec<Airport>,
    index: HashMap<String, usize>,
}

impl AirportSet {
    /// Validate and index an airport collection.
    ///
    /// Codes are trimmed of surrounding whitespace and then compared exactly.
    /// A repeated code rejects the whole set with
    /// [`Error::DuplicateAirportCode`] naming the first repeat in input order;
    /// no airport is ever silently replaced.
    pub fn new(airports: impl IntoIterator<Item = Airport>) -> Result<Self> {
        let mut set = Self::default();
        for mut airport in airports {
            let trimmed = airport.code.trim();
            if trimmed.len() != airport.code.len() {
                airport.code = trimmed.to_string();
            }
            airport.validate()?;

            if set.index.contains_key(&airport.code) {
                return Err(Error::DuplicateAirportCode { code: airport.code });
            }
            set.index.insert(airport.code.clone(), set.airports.len());
            set.airports.push(airport);
        }
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Lookup an airport by its exact code.
    pub fn get(&self, code: &str) -> Option<&Airport> {
        self.index.get(code).map(|&i| &self.airports[i])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Airports in input order.
    pub fn iter(&self) -> impl Iterator<Item = &Airport> {
        self.airports.iter()
    }

    /// Airports in input order, as a slice.
    pub fn as_slice(&self) -> &[Airport] {
        &self.airports
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.airports.iter().map(|a| a.code.as_str())
    }

    /// Suggest up to `limit` airport codes resembling `query`.
    ///
    /// The query is compared case-insensitively against both codes and city
    /// names, so `jfx` and `chicago` both produce useful hints.
    pub fn fuzzy_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(f64, &str)> = self
            .airports
            .iter()
            .map(|airport| {
                let by_code =
                    strsim::normalized_levenshtein(&needle, &airport.code.to_lowercase());
                let by_city =
                    strsim::normalized_levenshtein(&needle, &airport.city.to_lowercase());
                (by_code.max(by_city), airport.code.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, code)| code.to_string())
            .collect()
    }
}

impl<'a> IntoIterator for &'a AirportSet {
    type Item = &'a Airport;
    type IntoIter = std::slice::Iter<'a, Airport>;

    fn into_iter(self) -> Self::IntoIter {
        self.airports.iter()
    }
}
