//! Integration tests for the `skyroute` binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("skyroute");
    cmd.env_remove("SKYROUTE_AIRPORTS")
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "error");
    cmd
}

#[test]
fn airports_lists_sample_network_by_default() {
    cli()
        .arg("airports")
        .assert()
        .success()
        .stdout(predicate::str::contains("Airports (8):"))
        .stdout(predicate::str::contains("JFK"))
        .stdout(predicate::str::contains("Denver International"));
}

#[test]
fn airports_json_output() {
    let output = cli()
        .args(["airports", "--format", "json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let airports = value["airports"].as_array().expect("airports array");
    assert_eq!(airports.len(), 8);
    assert_eq!(airports[0]["code"], "JFK");
    assert_eq!(airports[0]["fee"], 250.0);
}

#[test]
fn airports_from_csv_fixture() {
    cli()
        .arg("--airports")
        .arg(fixtures_dir().join("airports.csv"))
        .arg("airports")
        .assert()
        .success()
        .stdout(predicate::str::contains("Airports (3):"))
        .stdout(predicate::str::contains("MIA").not());
}

#[test]
fn airports_env_var_is_honored() {
    cli()
        .env("SKYROUTE_AIRPORTS", fixtures_dir().join("airports.csv"))
        .arg("airports")
        .assert()
        .success()
        .stdout(predicate::str::contains("Airports (3):"));
}

#[test]
fn route_jfk_lax_text() {
    cli()
        .args(["route", "--from", "JFK", "--to", "LAX"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Path: JFK -> LAX"))
        .stdout(predicate::str::contains("optimized for cost"))
        .stdout(predicate::str::contains("Total: 2,470 mi, $2,506, 4.9 h"))
        .stdout(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn route_json_reports_totals() {
    let output = cli()
        .args([
            "route", "--from", "JFK", "--to", "LAX", "--metric", "distance", "--format", "json",
        ])
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["metric"], "distance");
    assert_eq!(value["total_distance"], 2470);
    assert_eq!(value["stops"], 0);
    assert_eq!(value["segments"].as_array().map(Vec::len), Some(1));
}

#[test]
fn metric_flag_is_case_insensitive() {
    cli()
        .args(["route", "--from", "SEA", "--to", "MIA", "--metric", "TIME"])
        .assert()
        .success()
        .stdout(predicate::str::contains("optimized for time"));
}

#[test]
fn unknown_metric_is_rejected() {
    cli()
        .args(["route", "--from", "JFK", "--to", "LAX", "--metric", "speed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown route metric 'speed'"));
}

#[test]
fn unknown_airport_suggests_alternatives() {
    cli()
        .args(["route", "--from", "JFX", "--to", "LAX"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown airport code: JFX"))
        .stderr(predicate::str::contains("Did you mean 'JFK'?"));
}

#[test]
fn same_origin_and_destination_fails() {
    cli()
        .args(["route", "--from", "ORD", "--to", "ORD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("origin and destination are both ORD"));
}

#[test]
fn duplicate_dataset_fails_with_code() {
    cli()
        .arg("--airports")
        .arg(fixtures_dir().join("duplicate_airports.json"))
        .arg("airports")
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate airport code encountered: JFK"));
}

#[test]
fn missing_dataset_fails() {
    let dir = tempdir().expect("tempdir");
    cli()
        .arg("--airports")
        .arg(dir.path().join("missing.json"))
        .arg("airports")
        .assert()
        .failure()
        .stderr(predicate::str::contains("airport dataset not found"));
}

#[test]
fn custom_json_dataset_routes() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("pair.json");
    fs::write(
        &path,
        r#"{"airports":[
            {"code":"AAA","name":"Alpha","city":"Aville","lat":0.0,"lng":0.0,"fee":10},
            {"code":"BBB","name":"Beta","city":"Bville","lat":0.0,"lng":1.0,"fee":20}
        ]}"#,
    )
    .expect("write dataset");

    cli()
        .arg("--airports")
        .arg(&path)
        .args(["route", "--from", "AAA", "--to", "BBB"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AAA (Aville) -> BBB (Bville)"));
}
