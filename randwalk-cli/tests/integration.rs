//! Integration tests for randwalk CLI commands.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::path::PathBuf;
use std::process::{Command, Output};

/// Path to the randwalk binary built for this test run.
fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_randwalk"))
}

/// Path to a recipe shipped with the CLI crate.
fn recipe_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("recipes");
    path.push(name);
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn help_command_shows_usage() {
    let output = run(&["help"]);
    let combined = format!("{}{}", stdout(&output), stderr(&output));

    assert!(output.status.success());
    assert!(combined.contains("walk"), "Should mention walk command");
    assert!(combined.contains("stats"), "Should mention stats command");
    assert!(combined.contains("benchmark"), "Should mention benchmark command");
}

#[test]
fn unknown_command_fails() {
    let output = run(&["teleport"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown command"));
}

#[test]
fn walk_fixed_steps_in_bounds() {
    let output = run(&["walk", "--origin", "10", "--min", "5", "--max", "15", "--fraction", "10", "-n", "500"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let values: Vec<f32> = stdout(&output).lines().map(|l| l.parse().unwrap()).collect();
    assert_eq!(values.len(), 500);
    for value in values {
        assert!((5.0..=15.0).contains(&value), "{} escaped", value);
    }
}

#[test]
fn walk_zero_fraction_repeats_origin() {
    let output = run(&["walk", "--origin", "10", "--min", "5", "--max", "15", "--fraction", "0", "-n", "20"]);
    let out = stdout(&output);
    assert_eq!(out.lines().count(), 20);
    assert!(out.lines().all(|l| l == "10"));
}

#[test]
fn walk_with_seed_replays() {
    let args = ["walk", "--seed", "1234", "-n", "50"];
    let first = stdout(&run(&args));
    let second = stdout(&run(&args));
    assert_eq!(first, second);

    let other = stdout(&run(&["walk", "--seed", "4321", "-n", "50"]));
    assert_ne!(first, other);
}

#[test]
fn walk_without_seed_differs_between_runs() {
    let args = ["walk", "--fraction", "0.1", "-n", "50"];
    assert_ne!(stdout(&run(&args)), stdout(&run(&args)));
}

#[test]
fn walk_produces_json() {
    let output = run(&["walk", "--seed", "7", "-n", "10", "--json", "--include-origin"]);
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");

    let points = parsed["points"].as_array().unwrap();
    assert_eq!(points.len(), 11);
    assert_eq!(points[0]["step"], 0);
    assert_eq!(points[0]["value"], 100.0);
    assert_eq!(parsed["seed"], 7);
}

#[test]
fn walk_produces_csv_with_timestamps() {
    let output = run(&[
        "walk", "--seed", "3", "-n", "3", "-f", "csv", "--start", "2024-01-01T00:00:00Z", "--interval", "60",
    ]);
    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[0], "step,timestamp,value");
    assert!(lines[1].starts_with("1,2024-01-01T00:00:00Z,"));
    assert!(lines[3].starts_with("3,2024-01-01T00:02:00Z,"));
}

#[test]
fn walk_timestamps_past_calendar_range_fail_cleanly() {
    let output = run(&[
        "walk", "--start", "2024-01-01T00:00:00Z", "--interval", "4000000000", "-n", "3000",
    ]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Error: timestamp of step"));
    assert!(!stderr(&output).contains("panicked"));
}

#[test]
fn walk_from_recipe() {
    let recipe = recipe_path("synthetic-price.yaml");
    let output = run(&["walk", "-r", recipe.to_str().unwrap(), "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed["name"], "synthetic-price");
    assert_eq!(parsed["seed"], 42);
    let points = parsed["points"].as_array().unwrap();
    assert_eq!(points.len(), 390);
    assert_eq!(points[0]["timestamp"], "2024-01-02T14:30:00Z");
}

#[test]
fn flags_override_recipe() {
    let recipe = recipe_path("synthetic-price.yaml");
    let output = run(&["walk", "-r", recipe.to_str().unwrap(), "-n", "5"]);
    assert_eq!(stdout(&output).lines().count(), 5);
}

#[test]
fn missing_recipe_fails() {
    let output = run(&["walk", "-r", "/nonexistent/recipe.yaml"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to read recipe"));
}

#[test]
fn strict_rejects_inverted_bounds() {
    let output = run(&["walk", "--min", "15", "--max", "5", "--strict"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("must not exceed"));
}

#[test]
fn lenient_inverted_bounds_pin_to_max() {
    let output = run(&["walk", "--origin", "10", "--min", "15", "--max", "5", "--fraction", "0.5", "-n", "10"]);
    assert!(output.status.success());
    assert!(stdout(&output).lines().all(|l| l == "5"));
}

#[test]
fn invalid_number_is_reported() {
    let output = run(&["walk", "--fraction", "lots"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid value 'lots' for --fraction"));
}

#[test]
fn stats_command_reports_json() {
    let output = run(&["stats", "--seed", "9", "-n", "2000", "--min", "90", "--max", "110", "--fraction", "0.05", "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed["stats"]["count"], 2000);
    assert!(parsed["stats"]["lowest"].as_f64().unwrap() >= 90.0);
    assert!(parsed["stats"]["highest"].as_f64().unwrap() <= 110.0);
}

#[test]
fn benchmark_command_runs() {
    let output = run(&["benchmark", "-t", "4", "-n", "2000", "--fraction", "0.5"]);
    let combined = format!("{}{}", stdout(&output), stderr(&output));

    assert!(output.status.success(), "{}", combined);
    assert!(combined.contains("BENCHMARK"), "Should show benchmark header");
    assert!(combined.contains("Total steps: 8000"));
    assert!(combined.contains("Bound violations: 0"));
}
