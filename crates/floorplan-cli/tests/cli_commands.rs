//! Integration tests for the floor-plan CLI.
//!
//! These tests use `assert_cmd` to verify command output and exit codes
//! against the fixture floor plans under `docs/fixtures/`.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures")
        .join(name)
}

fn cli() -> Command {
    Command::cargo_bin("floorplan-cli").expect("binary exists")
}

#[test]
fn route_text_output() {
    cli()
        .args(["route", "--plan"])
        .arg(fixture_path("floor_plan.json"))
        .args(["--from", "entrance", "--to", "room-103"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Route from entrance to room-103 (4 segments; cost 50.00; heuristic: euclidean)",
        ))
        .stdout(predicate::str::contains("1. line-1  entrance -> i1"))
        .stdout(predicate::str::contains("4. line-6  i3 -> room-103"));
}

#[test]
fn route_json_output() {
    let output = cli()
        .args(["route", "--plan"])
        .arg(fixture_path("floor_plan.json"))
        .args(["--from", "room-101", "--to", "room-102", "--format", "json"])
        .args(["--heuristic", "zero"])
        .output()
        .expect("run cli");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(
        value["line_ids"],
        serde_json::json!(["line-2", "line-3", "line-4"])
    );
    assert_eq!(value["heuristic"], "zero");
}

#[test]
fn route_to_unknown_node_fails() {
    cli()
        .args(["route", "--plan"])
        .arg(fixture_path("floor_plan.json"))
        .args(["--from", "entrance", "--to", "room-999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown node: room-999"));
}

#[test]
fn route_to_isolated_node_fails() {
    cli()
        .args(["route", "--plan"])
        .arg(fixture_path("floor_plan.json"))
        .args(["--from", "entrance", "--to", "storage"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no route found between entrance and storage"));
}

#[test]
fn route_rejects_unknown_heuristic() {
    cli()
        .args(["route", "--plan"])
        .arg(fixture_path("floor_plan.json"))
        .args(["--from", "entrance", "--to", "stairs", "--heuristic", "chebyshev"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn weights_lists_accepted_edges() {
    cli()
        .args(["weights", "--plan"])
        .arg(fixture_path("floor_plan.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("line-1\tentrance\ti1\t5"))
        .stdout(predicate::str::contains("line-9\tentrance\tcafeteria\t25"))
        .stdout(predicate::str::contains("line-10").not());
}

#[test]
fn validate_reports_skipped_edge() {
    cli()
        .args(["validate", "--plan"])
        .arg(fixture_path("floor_plan.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Floor plan OK: 10 nodes, 9 connections"))
        .stdout(predicate::str::contains(
            "graph.edges[9] line-10: stairs -> roof (unknown endpoint)",
        ));
}

#[test]
fn validate_json_report() {
    let output = cli()
        .args(["validate", "--format", "json", "--plan"])
        .arg(fixture_path("floor_plan.json"))
        .output()
        .expect("run cli");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(value["nodes"], 10);
    assert_eq!(value["skipped_edges"][0]["line_id"], "line-10");
}

#[test]
fn validate_rejects_missing_weight() {
    cli()
        .args(["validate", "--plan"])
        .arg(fixture_path("invalid_floor_plan.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("graph.edges[0].weight"));
}

#[test]
fn missing_file_fails_with_context() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let missing = temp_dir.path().join("absent.json");

    cli()
        .args(["validate", "--plan"])
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load floor plan"));
}

#[test]
fn malformed_json_fails() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, "{\"objects\": {").expect("write file");

    cli()
        .args(["weights", "--plan"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid floor plan field document"));
}
