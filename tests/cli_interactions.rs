//! CLI interaction tests
//!
//! Exercises argument parsing, the help system, and error reporting through
//! the compiled binary. Nothing in this file needs a reachable service; the
//! one test that dials out points at a port nothing listens on.

use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

/// Environment variables the binary reads. Cleared on every command so
/// ambient configuration cannot leak into assertions.
const FLT_ENV_VARS: &[&str] = &[
    "FLT_APP",
    "FLT_FUNCTION",
    "FLT_HOST",
    "FLT_COUNT",
    "FLT_WORKERS",
    "FLT_ENABLE_COLOR",
];

fn create_test_cmd() -> Command {
    let mut cmd = Command::cargo_bin("flt").expect("Failed to find flt binary");
    for var in FLT_ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.timeout(Duration::from_secs(30));
    cmd
}

#[test]
fn test_help_shows_usage_and_options() {
    let mut cmd = create_test_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--count"))
        .stdout(predicate::str::contains("--workers"))
        .stdout(predicate::str::contains("--app"))
        .stdout(predicate::str::contains("--function"))
        .stdout(predicate::str::contains("--help-topic"));
}

#[test]
fn test_version_prints_package_version() {
    let mut cmd = create_test_cmd();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_conflicting_color_flags_rejected() {
    let mut cmd = create_test_cmd();
    cmd.args(["--color", "--no-color"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains(
            "Cannot specify both --color and --no-color",
        ));
}

#[test]
fn test_unknown_option_rejected() {
    let mut cmd = create_test_cmd();
    cmd.arg("--definitely-not-a-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}

#[test]
fn test_invalid_count_value_rejected() {
    let mut cmd = create_test_cmd();
    cmd.args(["--count", "not-a-number"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_missing_count_value_rejected() {
    let mut cmd = create_test_cmd();
    cmd.arg("--count")
        .assert()
        .failure()
        .stderr(predicate::str::contains("a value is required"));
}

#[test]
fn test_topic_help_configuration() {
    let mut cmd = create_test_cmd();
    cmd.args(["--help-topic", "config", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CONFIGURATION REFERENCE"));
}

#[test]
fn test_topic_help_statistics() {
    let mut cmd = create_test_cmd();
    cmd.args(["--help-topic", "statistics", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("STATISTICS"));
}

#[test]
fn test_unknown_topic_falls_back_to_main_help() {
    let mut cmd = create_test_cmd();
    cmd.args(["--help-topic", "nosuchtopic", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown help topic: 'nosuchtopic'"))
        .stdout(predicate::str::contains("Available topics:"));
}

#[test]
fn test_topic_help_wins_over_flag_validation() {
    // Topic help exits before CLI validation, so the conflicting color flags
    // never get a chance to fail the run.
    let mut cmd = create_test_cmd();
    cmd.args(["--help-topic", "config", "--color", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CONFIGURATION REFERENCE"));
}

#[test]
fn test_unreachable_host_exits_with_network_code() {
    // Port 9 (discard) accepts nothing; resolution fails before any load is
    // generated and the run exits with the network code.
    let mut cmd = create_test_cmd();
    cmd.args([
        "--app",
        "myapp",
        "--function",
        "myfn",
        "--host",
        "http://127.0.0.1:9",
        "--count",
        "1",
        "--workers",
        "1",
        "--no-color",
    ])
    .assert()
    .failure()
    .code(6)
    .stderr(predicate::str::contains("[NETWORK]"));
}

#[test]
fn test_short_flags_reach_resolution() {
    // If any short flag failed to parse, clap would exit 2 before the run
    // starts; reaching the network error proves the mapping.
    let mut cmd = create_test_cmd();
    cmd.args([
        "-n",
        "2",
        "-p",
        "1",
        "-a",
        "myapp",
        "-f",
        "myfn",
        "-H",
        "http://127.0.0.1:9",
        "--no-color",
    ])
    .assert()
    .failure()
    .code(6);
}
