use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::PathBuf;

/// Helper to get path to fixture file
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_cli_help_flag() {
    cargo_bin_cmd!()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("autocomplete"))
        .stdout(predicate::str::contains("--field"))
        .stdout(predicate::str::contains("--url"));
}

#[test]
fn test_cli_version_flag() {
    cargo_bin_cmd!()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("typeahead"));
}

#[test]
fn test_cli_with_nonexistent_file() {
    cargo_bin_cmd!()
        .arg("nonexistent.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_cli_with_invalid_json_file() {
    cargo_bin_cmd!()
        .arg(fixture_path("invalid.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON dataset"));
}

#[test]
fn test_cli_with_empty_dataset() {
    cargo_bin_cmd!()
        .arg(fixture_path("empty.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no usable records"));
}

#[test]
fn test_cli_with_empty_stdin() {
    cargo_bin_cmd!()
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON dataset"));
}

#[test]
fn test_fixture_files_exist() {
    assert!(fixture_path("invalid.json").exists());
    assert!(fixture_path("empty.json").exists());
}
