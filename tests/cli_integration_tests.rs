//! Integration tests for the subcombi command line
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};

const FIXTURE: &str = "tests/fixtures/substitutions.txt";

/// Copy the fixture into a fresh directory so outputs land next to it
fn staged_input(dir: &Path) -> PathBuf {
    let input = dir.join("substitutions.txt");
    std::fs::copy(FIXTURE, &input).unwrap();
    input
}

#[test]
fn test_writes_all_outputs_next_to_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = staged_input(dir.path());

    let mut cmd = Command::cargo_bin("subcombi").unwrap();
    cmd.arg(&input);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Input file:"))
        .stdout(predicate::str::contains("Total: 10"))
        .stdout(predicate::str::contains("Picture:"));

    assert!(input.with_extension("json").is_file());
    assert!(input.with_extension("svg").is_file());
    assert!(input.with_extension("log").is_file());
}

#[test]
fn test_json_output_shape() {
    let dir = tempfile::tempdir().unwrap();
    let input = staged_input(dir.path());

    Command::cargo_bin("subcombi")
        .unwrap()
        .arg(&input)
        .assert()
        .success();

    let json = std::fs::read_to_string(input.with_extension("json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    let subs = parsed["subs"].as_array().unwrap();
    assert_eq!(subs[0]["sub"], "A23T");
    assert_eq!(subs[0]["freq"], 0.8);
    // K103N ties with A23T and is seen second
    assert_eq!(subs[1]["sub"], "K103N");
    assert!(subs.iter().any(|s| s["sub"] == "L90M:1"));

    let combi = parsed["combi"].as_array().unwrap();
    assert_eq!(combi[0]["subs"], serde_json::json!(["A23T", "K103N"]));
    assert_eq!(combi[0]["freq"], 0.4);
}

#[test]
fn test_log_file_mirrors_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = staged_input(dir.path());

    Command::cargo_bin("subcombi")
        .unwrap()
        .arg(&input)
        .assert()
        .success();

    let log = std::fs::read_to_string(input.with_extension("log")).unwrap();
    assert!(log.contains("Combinations: unique"));
    assert!(log.contains("Filtered unique combinations:"));
}

#[test]
fn test_output_base_option() {
    let dir = tempfile::tempdir().unwrap();
    let input = staged_input(dir.path());
    let base = dir.path().join("report.out");

    Command::cargo_bin("subcombi")
        .unwrap()
        .arg(&input)
        .arg("-o")
        .arg(&base)
        .assert()
        .success();

    assert!(dir.path().join("report.json").is_file());
    assert!(dir.path().join("report.svg").is_file());
    assert!(!input.with_extension("json").exists());
}

#[test]
fn test_max_combi_num_limits_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = staged_input(dir.path());

    Command::cargo_bin("subcombi")
        .unwrap()
        .arg(&input)
        .args(["--max-combi-num", "2", "--min-combi-freq", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stop filtering by max number: 2"));

    let json = std::fs::read_to_string(input.with_extension("json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["combi"].as_array().unwrap().len(), 2);
}

#[test]
fn test_config_file_applies() {
    let dir = tempfile::tempdir().unwrap();
    let input = staged_input(dir.path());
    let config = dir.path().join("subcombi.toml");
    std::fs::write(
        &config,
        "[thresholds]\ntoken_min_freq = 0.5\n\n[plot]\nsize = \"6x4\"\n",
    )
    .unwrap();

    Command::cargo_bin("subcombi")
        .unwrap()
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("cutoff 0.50 (5)"));

    let svg = std::fs::read_to_string(input.with_extension("svg")).unwrap();
    assert!(svg.contains(r#"width="900""#));
}

#[test]
fn test_missing_input_file() {
    Command::cargo_bin("subcombi")
        .unwrap()
        .arg("/nonexistent/substitutions.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_input_without_records_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.txt");
    std::fs::write(&input, "no records\n\n").unwrap();

    Command::cargo_bin("subcombi")
        .unwrap()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No records found"));
}

#[test]
fn test_refuses_to_overwrite_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("records.json");
    std::fs::write(&input, "(A1B)\n").unwrap();

    Command::cargo_bin("subcombi")
        .unwrap()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("would overwrite the input"));
}

#[test]
fn test_refuses_to_overwrite_input_via_other_spelling() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    let input = dir.path().join("records.json");
    std::fs::copy(FIXTURE, &input).unwrap();
    let base = dir.path().join("sub").join("..").join("records");

    Command::cargo_bin("subcombi")
        .unwrap()
        .arg(&input)
        .arg("-o")
        .arg(&base)
        .assert()
        .failure()
        .stderr(predicate::str::contains("would overwrite the input"));
}

#[test]
fn test_invalid_size_rejected() {
    Command::cargo_bin("subcombi")
        .unwrap()
        .arg(FIXTURE)
        .args(["--size", "large"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid figure size"));
}
