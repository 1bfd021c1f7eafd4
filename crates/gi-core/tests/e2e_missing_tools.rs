//! CLI E2E tests for hosts without GPU tooling.
//!
//! Validates:
//! - Missing probe tools yield empty results and exit 0 for every query
//! - Both vendors degrade the same way when their tools are absent
//! - JSON outputs keep their schema (schema_version, provenance)
//! - Invalid config files produce clear errors and exit 10
//! - Unknown vendor env values produce exit 10, CLI override wins
//! - Format compatibility for error outputs

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::time::Duration;
use tempfile::{tempdir, TempDir};

/// Command for the gi-core binary with an empty search path, so no
/// probe tool resolves, and an isolated (empty) config dir.
fn gi_core(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gi-core").unwrap();
    cmd.timeout(Duration::from_secs(60));
    cmd.env("PATH", "");
    cmd.env_remove("GI_VENDOR");
    cmd.arg("--config").arg(config_dir.path());
    cmd
}

// ============================================================================
// Tool-absent: every query is empty and clean
// ============================================================================

#[test]
fn test_ids_empty_exit_zero() {
    let dir = tempdir().unwrap();
    gi_core(&dir)
        .arg("ids")
        .assert()
        .success()
        .code(0)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_ids_json_empty_array() {
    let dir = tempdir().unwrap();
    gi_core(&dir)
        .args(["--format", "json", "ids"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn test_memory_total_and_free_empty() {
    let dir = tempdir().unwrap();
    gi_core(&dir)
        .args(["--format", "json", "memory", "total"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));

    gi_core(&dir)
        .args(["--format", "json", "memory", "free", "--unit", "GiB"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn test_amd_vendor_degrades_the_same_way() {
    let dir = tempdir().unwrap();
    gi_core(&dir)
        .args(["--vendor", "amd", "ids"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    gi_core(&dir)
        .args(["--vendor", "amd", "--format", "json", "memory", "total"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn test_snapshot_text_reports_no_gpus() {
    let dir = tempdir().unwrap();
    gi_core(&dir)
        .arg("snapshot")
        .assert()
        .success()
        .stdout(predicate::str::contains("No GPUs detected"));
}

#[test]
fn test_snapshot_json_schema() {
    let dir = tempdir().unwrap();
    let output = gi_core(&dir)
        .args(["--format", "json", "snapshot"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: Value = serde_json::from_slice(&output).expect("parse JSON");
    assert_eq!(json["schema_version"], "1.0.0");
    assert_eq!(json["has_gpu"], false);
    assert_eq!(json["vendor"], "nvidia");
    assert_eq!(json["provenance"]["source"], "none");
    assert!(json.get("generated_at").is_some(), "should stamp probe time");
    // Empty device lists are omitted entirely
    assert!(json.get("devices").is_none());
}

#[test]
fn test_schema_command_emits_snapshot_schema() {
    let dir = tempdir().unwrap();
    let output = gi_core(&dir)
        .arg("schema")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: Value = serde_json::from_slice(&output).expect("parse JSON schema");
    assert_eq!(json["title"], "ProbeSnapshot");
    assert!(json["properties"].get("schema_version").is_some());
    assert!(json["properties"].get("has_gpu").is_some());
}

// ============================================================================
// Config error paths
// ============================================================================

#[test]
fn test_invalid_config_json_exits_10() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.json"), "{not json").unwrap();
    gi_core(&dir)
        .arg("ids")
        .assert()
        .failure()
        .code(10)
        .stderr(predicate::str::contains("invalid config file"));
}

#[test]
fn test_invalid_config_json_error_format() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.json"), "{not json").unwrap();
    let output = gi_core(&dir)
        .args(["--format", "json", "ids"])
        .assert()
        .failure()
        .code(10)
        .get_output()
        .stdout
        .clone();

    let json: Value = serde_json::from_slice(&output).expect("parse JSON error payload");
    assert_eq!(json["code"], 10);
    assert!(json["error"].as_str().unwrap().contains("config"));
}

#[test]
fn test_unknown_vendor_in_config_exits_10() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.json"), r#"{"vendor":"voodoo3"}"#).unwrap();
    gi_core(&dir)
        .arg("ids")
        .assert()
        .failure()
        .code(10)
        .stderr(predicate::str::contains("unknown GPU vendor"));
}

#[test]
fn test_unknown_vendor_env_exits_10() {
    let dir = tempdir().unwrap();
    gi_core(&dir)
        .env("GI_VENDOR", "intel")
        .arg("ids")
        .assert()
        .failure()
        .code(10);
}

#[test]
fn test_cli_vendor_overrides_bad_env() {
    let dir = tempdir().unwrap();
    gi_core(&dir)
        .env("GI_VENDOR", "intel")
        .args(["--vendor", "amd", "ids"])
        .assert()
        .success()
        .code(0);
}

#[test]
fn test_vendor_env_is_honored() {
    let dir = tempdir().unwrap();
    let output = gi_core(&dir)
        .env("GI_VENDOR", "amd")
        .args(["--format", "json", "snapshot"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: Value = serde_json::from_slice(&output).expect("parse JSON");
    assert_eq!(json["vendor"], "amd");
}
