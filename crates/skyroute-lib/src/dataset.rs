use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::{debug, info};

use crate::airport::Airport;
use crate::error::{Error, Result};

/// Environment variable consulted when no explicit dataset path is supplied.
pub const AIRPORTS_ENV_VAR: &str = "SKYROUTE_AIRPORTS";

/// The eight-airport demonstration network.
pub fn sample_airports() -> Vec<Airport> {
    vec![
        Airport::new(
            "JFK",
            "John F. Kennedy International",
            "New York",
            40.6413,
            -73.7781,
            250.0,
        ),
        Airport::new(
            "LAX",
            "Los Angeles International",
            "Los Angeles",
            33.9425,
            -118.4081,
            280.0,
        ),
        Airport::new(
            "ORD",
            "Chicago O'Hare International",
            "Chicago",
            41.9742,
            -87.9073,
            220.0,
        ),
        Airport::new(
            "MIA",
            "Miami International",
            "Miami",
            25.7959,
            -80.287,
            200.0,
        ),
        Airport::new(
            "DFW",
            "Dallas/Fort Worth International",
            "Dallas",
            32.8975,
            -97.038,
            190.0,
        ),
        Airport::new(
            "SEA",
            "Seattle-Tacoma International",
            "Seattle",
            47.4502,
            -122.3088,
            260.0,
        ),
        Airport::new(
            "ATL",
            "Hartsfield-Jackson Atlanta International",
            "Atlanta",
            33.6407,
            -84.4277,
            180.0,
        ),
        Airport::new(
            "DEN",
            "Denver International",
            "Denver",
            39.8561,
            -104.6737,
            210.0,
        ),
    ]
}

/// Resolve which dataset file to load.
///
/// Resolution order: the explicit path, then [`AIRPORTS_ENV_VAR`]. `None`
/// means the caller should fall back to [`sample_airports`].
pub fn resolve_airports_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    env::var_os(AIRPORTS_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Load airports from a JSON or CSV file, chosen by extension.
///
/// Files without a recognised extension are parsed as JSON.
pub fn load_airports(path: &Path) -> Result<Vec<Airport>> {
    if !path.exists() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = fs::File::open(path)?;
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    let airports = if is_csv {
        airports_from_csv_reader(file)?
    } else {
        airports_from_json_reader(file)?
    };

    debug!(path = %path.display(), count = airports.len(), "loaded airport dataset");
    Ok(airports)
}

/// Load the resolved dataset, or the sample network when nothing is configured.
pub fn load_airports_or_sample(explicit: Option<&Path>) -> Result<Vec<Airport>> {
    match resolve_airports_path(explicit) {
        Some(path) => {
            info!(path = %path.display(), "loading airport dataset");
            load_airports(&path)
        }
        None => {
            info!("no airport dataset configured; using built-in sample network");
            Ok(sample_airports())
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonDataset {
    List(Vec<Airport>),
    Wrapped { airports: Vec<Airport> },
}

/// Parse airports from JSON: either a bare array or `{ "airports": [...] }`.
pub fn airports_from_json_reader<R: Read>(reader: R) -> Result<Vec<Airport>> {
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    let dataset = JsonDataset::deserialize(value).map_err(|err| Error::AirportData {
        message: format!(
            "expected an array of airports or an object with an 'airports' array: {err}"
        ),
    })?;

    Ok(match dataset {
        JsonDataset::List(airports) => airports,
        JsonDataset::Wrapped { airports } => airports,
    })
}

/// Parse airports from CSV with a header row.
///
/// Header names are matched loosely (case and punctuation are ignored) and a
/// few common synonyms are accepted, e.g. `lat` for `latitude`.
pub fn airports_from_csv_reader<R: Read>(reader: R) -> Result<Vec<Airport>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::Fields).from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|err| Error::AirportData {
            message: format!("failed to read airport CSV headers: {err}"),
        })?
        .clone();

    let normalize = |s: &str| {
        s.to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
    };
    let normalized_headers: Vec<String> = headers.iter().map(&normalize).collect();

    let synonyms: &[(&str, &[&str])] = &[
        ("code", &["code", "id", "iata", "airport_code"]),
        ("name", &["name", "airport_name"]),
        ("city", &["city"]),
        ("latitude", &["latitude", "lat"]),
        ("longitude", &["longitude", "lng", "lon", "long"]),
        ("fee", &["fee", "fees", "airport_fee"]),
    ];

    let mut index_map: BTreeMap<&str, usize> = BTreeMap::new();
    for (canon, alts) in synonyms {
        let found = alts.iter().find_map(|alt| {
            let alt = normalize(*alt);
            normalized_headers.iter().position(|h| *h == alt)
        });
        if let Some(i) = found {
            index_map.insert(*canon, i);
        }
    }

    let missing: Vec<&str> = ["code", "latitude", "longitude"]
        .into_iter()
        .filter(|c| !index_map.contains_key(c))
        .collect();
    if !missing.is_empty() {
        return Err(Error::AirportData {
            message: format!(
                "airport CSV missing required columns: {}. Available: {}",
                missing.join(", "),
                headers.iter().collect::<Vec<_>>().join(", ")
            ),
        });
    }

    let mut airports = Vec::new();
    for (offset, result) in csv_reader.records().enumerate() {
        // Header occupies line 1.
        let row = offset + 2;
        let record = result?;

        let get = |field: &str| -> Option<String> {
            index_map
                .get(field)
                .and_then(|&i| record.get(i))
                .map(|s| s.trim().to_string())
        };
        let code = get("code").unwrap_or_default();
        let number = |field: &str, required: bool| -> Result<f64> {
            match get(field).filter(|s| !s.is_empty()) {
                Some(raw) => raw.parse::<f64>().map_err(|err| Error::AirportData {
                    message: format!("invalid {field} for airport '{code}' at row {row}: {err}"),
                }),
                None if required => Err(Error::AirportData {
                    message: format!("missing {field} for airport '{code}' at row {row}"),
                }),
                None => Ok(0.0),
            }
        };

        let latitude = number("latitude", true)?;
        let longitude = number("longitude", true)?;
        let fee = number("fee", false)?;

        airports.push(Airport {
            name: get("name").unwrap_or_default(),
            city: get("city").unwrap_or_default(),
            code,
            latitude,
            longitude,
            fee,
        });
    }

    Ok(airports)
}
