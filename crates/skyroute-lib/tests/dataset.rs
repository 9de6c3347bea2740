mod common;

use std::io::Write;

use skyroute_lib::{
    load_airports, load_airports_or_sample, resolve_airports_path, AirportSet, Error,
    RouteGraphEngine,
};
use tempfile::NamedTempFile;

use common::fixtures_dir;

#[test]
fn loads_json_fixture_with_short_field_names() {
    let airports = load_airports(&fixtures_dir().join("airports.json")).expect("load json");
    assert_eq!(airports.len(), 8);
    let jfk = &airports[0];
    assert_eq!(jfk.code, "JFK");
    assert_eq!(jfk.latitude, 40.6413);
    assert_eq!(jfk.longitude, -73.7781);
    assert_eq!(jfk.fee, 250.0);
}

#[test]
fn loads_csv_fixture() {
    let airports = load_airports(&fixtures_dir().join("airports.csv")).expect("load csv");
    let codes: Vec<&str> = airports.iter().map(|a| a.code.as_str()).collect();
    assert_eq!(codes, vec!["JFK", "LAX", "ORD"]);
    assert_eq!(airports[2].name, "Chicago O'Hare International");
}

#[test]
fn fixture_with_duplicate_codes_is_rejected_by_engine() {
    let airports =
        load_airports(&fixtures_dir().join("duplicate_airports.json")).expect("parses");
    assert_eq!(airports.len(), 3);
    assert!(matches!(
        AirportSet::new(airports.clone()),
        Err(Error::DuplicateAirportCode { .. })
    ));

    let engine = RouteGraphEngine::new();
    assert!(engine.build_graph(airports).is_err());
    assert!(!engine.is_built());
}

#[test]
fn missing_file_reports_dataset_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nope.json");
    let err = load_airports(&path).unwrap_err();
    assert!(matches!(err, Error::DatasetNotFound { path: ref p } if *p == path));
}

#[test]
fn malformed_json_is_reported() {
    let mut file = NamedTempFile::with_suffix(".json").expect("tempfile");
    write!(file, "{{ not json").expect("write");
    let err = load_airports(file.path()).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn csv_extension_is_case_insensitive() {
    let mut file = NamedTempFile::with_suffix(".CSV").expect("tempfile");
    writeln!(file, "iata,lat,lon,fees").expect("write");
    writeln!(file, "AAA,1.0,2.0,3").expect("write");
    let airports = load_airports(file.path()).expect("load csv");
    assert_eq!(airports.len(), 1);
    assert_eq!(airports[0].fee, 3.0);
    assert!(airports[0].name.is_empty());
}

#[test]
fn explicit_path_is_loaded() {
    let path = fixtures_dir().join("airports.csv");
    assert_eq!(resolve_airports_path(Some(&path)), Some(path.clone()));
    let airports = load_airports_or_sample(Some(&path)).expect("load");
    assert_eq!(airports.len(), 3);
}
