//! Integration tests for the rubrica CLI: help, version, exit codes and
//! store bootstrap.

mod common;

use common::{init_store, rubrica};
use predicates::prelude::*;
use tempfile::tempdir;

// ============================================================================
// Help and Version tests
// ============================================================================

#[test]
fn test_help_flag() {
    rubrica()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: rubrica"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("activate"));
}

#[test]
fn test_version_flag() {
    rubrica()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rubrica"));
}

#[test]
fn test_subcommand_help() {
    rubrica()
        .args(["import", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Import a rubric from a file"));
}

// ============================================================================
// Exit code tests
// ============================================================================

#[test]
fn test_unknown_argument_exit_code_2() {
    rubrica().args(["list", "--bogus-flag"]).assert().code(2);
}

#[test]
fn test_unknown_argument_json_usage_error() {
    rubrica()
        .args(["--format", "json", "list", "--bogus-flag"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"type\":\"usage_error\""));
}

#[test]
fn test_no_command_is_usage_error() {
    rubrica().assert().code(2);
}

#[test]
fn test_missing_store_exit_code_3() {
    let dir = tempdir().unwrap();
    rubrica()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("store not found"));
}

#[test]
fn test_missing_store_json_envelope() {
    let dir = tempdir().unwrap();
    rubrica()
        .current_dir(dir.path())
        .args(["--format", "json", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"type\":\"store_not_found\""));
}

#[test]
fn test_unknown_rubric_exit_code_3() {
    let dir = tempdir().unwrap();
    let store = init_store(dir.path());
    rubrica()
        .arg("--store")
        .arg(&store)
        .args(["show", "rb-desconocida"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("rubric not found"));
}

// ============================================================================
// Store bootstrap
// ============================================================================

#[test]
fn test_init_creates_store() {
    let dir = tempdir().unwrap();
    rubrica()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized rubrica store"));

    assert!(dir.path().join(".rubrica/config.toml").is_file());
}

#[test]
fn test_init_visible_store() {
    let dir = tempdir().unwrap();
    rubrica()
        .current_dir(dir.path())
        .args(["init", "--visible"])
        .assert()
        .success();

    assert!(dir.path().join("rubrica/config.toml").is_file());
}

#[test]
fn test_init_twice_fails() {
    let dir = tempdir().unwrap();
    let store = init_store(dir.path());
    rubrica()
        .arg("--store")
        .arg(&store)
        .arg("init")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_list_empty_store() {
    let dir = tempdir().unwrap();
    let store = init_store(dir.path());
    rubrica()
        .arg("--store")
        .arg(&store)
        .args(["--format", "json", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn test_store_discovery_from_subdirectory() {
    let dir = tempdir().unwrap();
    init_store(dir.path());
    let nested = dir.path().join("proyecto/src");
    std::fs::create_dir_all(&nested).unwrap();

    rubrica()
        .current_dir(&nested)
        .args(["--format", "json", "list"])
        .assert()
        .success();
}
