//! End-to-end tests for the `booking` binary.
// crates/booking-cli/tests/cli.rs
// =============================================================================
// Module: CLI Binary Tests
// Description: Run the booking binary against temp configs and inputs.
// Purpose: Ensure exit codes, JSON reports, and audit output behave as documented.
// =============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only panic-based assertions are permitted."
)]

use std::fs;
use std::path::Path;
use std::process::Command;
use std::process::Output;

use serde_json::Value;
use tempfile::TempDir;

const CONFIG: &str = r#"
[audit]
sink = "file"
path = "audit.jsonl"

[directory]
root_domain = "cal.example"
web_app_url = "https://app.cal.example"

[[apps]]
slug = "zapier"
required_keys = [{ name = "invite_link" }]

[[apps]]
slug = "jitsi"
"#;

/// Writes the test config into `dir` with an absolute audit path.
fn write_config(dir: &Path) -> std::path::PathBuf {
    let audit = dir.join("audit.jsonl");
    let contents = CONFIG.replace(
        "path = \"audit.jsonl\"",
        &format!("path = {}", toml_string(&audit.display().to_string())),
    );
    let path = dir.join("booking.toml");
    fs::write(&path, contents).unwrap();
    path
}

/// Quotes a string as a TOML basic string.
fn toml_string(value: &str) -> String {
    serde_json::to_string(value).unwrap()
}

/// Runs the binary in `dir` with a clean config environment.
fn booking(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_booking"))
        .args(args)
        .current_dir(dir)
        .env_remove("BOOKING_CONFIG")
        .output()
        .unwrap()
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn version_flag_prints_binary_name() {
    let dir = TempDir::new().unwrap();
    let output = booking(dir.path(), &["--version"]);
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.starts_with("booking "));
}

#[test]
fn apps_check_satisfied_exits_zero_and_audits() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    fs::write(dir.path().join("keys.json"), r#"{"invite_link":"https://zap.example/i"}"#).unwrap();
    let output = booking(
        dir.path(),
        &["apps", "check", "--app", "zapier", "--keys", "keys.json", "--config", config.to_str().unwrap()],
    );
    assert_eq!(output.status.code(), Some(0));
    let report = stdout_json(&output);
    assert_eq!(report["app"], "zapier");
    assert_eq!(report["configured"], true);
    assert_eq!(report["requirement"], "satisfied");

    let audit = fs::read_to_string(dir.path().join("audit.jsonl")).unwrap();
    assert!(audit.contains("\"app_keys_check\""));
    assert!(audit.contains("\"app_keys_registry\""));
    assert!(!audit.contains("zap.example"));
}

#[test]
fn apps_check_unsatisfied_exits_one() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    fs::write(dir.path().join("keys.json"), r#"{"invite_link":""}"#).unwrap();
    let output = booking(
        dir.path(),
        &["apps", "check", "--app", "zapier", "--keys", "keys.json", "--config", config.to_str().unwrap()],
    );
    assert_eq!(output.status.code(), Some(1));
    let report = stdout_json(&output);
    assert_eq!(report["configured"], false);
    assert_eq!(report["requirement"], "unsatisfied");
    assert!(!report["errors"].as_array().unwrap().is_empty());
}

#[test]
fn apps_check_without_keys_treats_value_as_absent() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let cfg = config.to_str().unwrap();
    let required = booking(dir.path(), &["apps", "check", "--app", "zapier", "--config", cfg]);
    assert_eq!(required.status.code(), Some(1));
    let unconstrained = booking(dir.path(), &["apps", "check", "--app", "jitsi", "--config", cfg]);
    assert_eq!(unconstrained.status.code(), Some(0));
    assert_eq!(stdout_json(&unconstrained)["requirement"], "no_requirement");
}

#[test]
fn apps_list_reports_declared_schemas() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let output = booking(dir.path(), &["apps", "list", "--config", config.to_str().unwrap()]);
    assert!(output.status.success());
    let entries = stdout_json(&output);
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["app"], "zapier");
    assert_eq!(entries[0]["declares_keys"], true);
    assert_eq!(entries[1]["app"], "jitsi");
    assert_eq!(entries[1]["declares_keys"], false);
}

#[test]
fn config_example_round_trips_through_validate() {
    let dir = TempDir::new().unwrap();
    let example = booking(dir.path(), &["config", "example"]);
    assert!(example.status.success());
    fs::write(dir.path().join("booking.toml"), &example.stdout).unwrap();
    let validate = booking(dir.path(), &["config", "validate"]);
    assert!(validate.status.success(), "{}", String::from_utf8_lossy(&validate.stderr));
    let text = String::from_utf8(validate.stdout).unwrap();
    assert!(text.starts_with("config ok"));
}

#[test]
fn config_validate_fails_for_missing_file() {
    let dir = TempDir::new().unwrap();
    let output = booking(dir.path(), &["config", "validate"]);
    assert_eq!(output.status.code(), Some(1));
    let text = String::from_utf8(output.stderr).unwrap();
    assert!(text.contains("config load failed"));
}

#[test]
fn directory_show_uses_configured_domain() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let org = r#"{
        "name": "Acme",
        "slug": "acme",
        "is_organization": true,
        "members": [
            {"id": 1, "name": "Ada", "username": "ada", "accepted": true},
            {"id": 2, "name": "Pat", "username": "pat", "accepted": false}
        ]
    }"#;
    fs::write(dir.path().join("org.json"), org).unwrap();
    let output = booking(
        dir.path(),
        &[
            "directory",
            "show",
            "--org",
            "org.json",
            "--host",
            "acme.cal.example:443",
            "--config",
            config.to_str().unwrap(),
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let report = stdout_json(&output);
    assert_eq!(report["is_valid_org_domain"], true);
    assert_eq!(report["current_org_domain"], "acme");
    assert_eq!(report["members"].as_array().unwrap().len(), 1);
    assert_eq!(report["members"][0]["profile_url"], "https://acme.cal.example/ada");
}

#[test]
fn directory_show_rejects_non_organizations() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("team.json"), r#"{"name":"Team","is_organization":false}"#).unwrap();
    let output = booking(dir.path(), &["directory", "show", "--org", "team.json"]);
    assert_eq!(output.status.code(), Some(1));
    let text = String::from_utf8(output.stderr).unwrap();
    assert!(text.contains("not_organization"));
}
