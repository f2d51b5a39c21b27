//! CLI integration tests

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

/// Build command for the harnessviz-cli binary (finds it in target/debug when run via cargo test).
fn harnessviz_cli() -> Command {
    cargo_bin_cmd!("harnessviz-cli")
}

/// Path to harnessviz library test fixtures (relative to workspace).
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("harnessviz")
        .join("tests")
        .join("fixtures")
}

#[test]
fn test_cli_help() {
    let mut cmd = harnessviz_cli();

    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("harness"));
}

#[test]
fn test_cli_version() {
    let mut cmd = harnessviz_cli();

    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_dot_output() {
    let mut cmd = harnessviz_cli();
    let path = fixtures_dir().join("straight.json");

    cmd.arg("dot").arg(path);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("graph {"))
        .stdout(predicate::str::contains("shape=\"record\""))
        .stdout(predicate::str::contains("<w1>BN"));
}

#[test]
fn test_cli_dot_color_mode() {
    let mut cmd = harnessviz_cli();
    let path = fixtures_dir().join("straight.json");

    cmd.arg("dot").arg(path).arg("--color-mode").arg("FULL");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("<w1>BROWN"));
}

#[test]
fn test_cli_unknown_color_mode() {
    let mut cmd = harnessviz_cli();
    let path = fixtures_dir().join("straight.json");

    cmd.arg("dot").arg(path).arg("--color-mode").arg("rainbow");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown color mode"));
}

#[test]
fn test_cli_invalid_description() {
    let mut cmd = harnessviz_cli();
    let path = fixtures_dir().join("mismatched_pins.json");

    cmd.arg("dot").arg(path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_cli_nonexistent_file() {
    let mut cmd = harnessviz_cli();

    cmd.arg("dot").arg("does_not_exist.json");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_cli_render_missing_engine() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = harnessviz_cli();

    cmd.arg("render")
        .arg(fixtures_dir().join("straight.json"))
        .arg("--output")
        .arg(dir.path().join("straight"))
        .arg("--format")
        .arg("svg")
        .arg("--no-view")
        .arg("--dot-program")
        .arg(dir.path().join("no-such-dot"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Graphviz failed"));
    assert!(dir.path().join("straight").exists());
}

#[test]
fn test_cli_colors_command() {
    let mut cmd = harnessviz_cli();

    cmd.arg("colors");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("DIN"))
        .stdout(predicate::str::contains("violet"));
}

#[test]
fn test_cli_colors_all() {
    let mut cmd = harnessviz_cli();

    cmd.arg("colors").arg("--all");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("#ff80c0"))
        .stdout(predicate::str::contains("16 AWG"));
}

#[test]
fn test_cli_colors_json() {
    let mut cmd = harnessviz_cli();

    cmd.arg("colors").arg("--json");

    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["color_codes"].as_array().map(|a| a.len()), Some(3));
}
