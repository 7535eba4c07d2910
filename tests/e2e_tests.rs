//! End-to-end tests against a mock service
//!
//! Each test boots a wiremock server standing in for the control plane and
//! invoke endpoint, then drives the compiled binary against it and asserts
//! on the rendered report and exit status.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::time::Duration;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

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

/// Start a runtime hosting the mock service for the duration of a test.
///
/// The binary under test is a blocking subprocess, so the server lives on its
/// own runtime that keeps serving while the subprocess talks to it. The
/// server must be dropped before the runtime, which the declaration order at
/// each call site takes care of.
fn start_mock_service() -> (Runtime, MockServer) {
    let rt = Runtime::new().expect("Failed to create tokio runtime");
    let server = rt.block_on(MockServer::start());
    (rt, server)
}

/// Mount the two control plane lookups every run performs before load starts
async fn mount_control_plane(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v2/apps"))
        .and(query_param("name", "myapp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "app-01", "name": "myapp"}]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/fns"))
        .and(query_param("app_id", "app-01"))
        .and(query_param("name", "myfn"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "fn-01", "name": "myfn"}]
        })))
        .mount(server)
        .await;
}

#[test]
fn test_run_reports_all_recorded_samples() {
    let (rt, server) = start_mock_service();
    rt.block_on(async {
        mount_control_plane(&server).await;
        Mock::given(method("POST"))
            .and(path("/invoke/fn-01"))
            .respond_with(ResponseTemplate::new(200).set_body_string("\"Hello World\""))
            .expect(8)
            .mount(&server)
            .await;
    });

    let host = server.uri();
    let mut cmd = create_test_cmd();
    cmd.args([
        "--app",
        "myapp",
        "--function",
        "myfn",
        "--host",
        host.as_str(),
        "--count",
        "8",
        "--workers",
        "2",
        "--no-color",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Function Latency Results"))
    .stdout(predicate::str::contains("Target: myapp/myfn (id fn-01)"))
    .stdout(predicate::str::contains(
        "Invocations:  8 attempted, 8 recorded, 0 failed, 0 not issued",
    ))
    .stdout(predicate::str::contains("Workers:      2 x 4 invocations each"))
    .stdout(predicate::str::contains("Wall Time:"))
    .stdout(predicate::str::contains("mean:"))
    .stdout(predicate::str::contains("median:"))
    .stdout(predicate::str::contains(
        "Trimmed the 2 slowest samples as cold-start outliers; 6 samples used.",
    ));

    rt.block_on(server.verify());
}

#[test]
fn test_failed_invocations_still_produce_a_report() {
    let (rt, server) = start_mock_service();
    rt.block_on(async {
        mount_control_plane(&server).await;
        Mock::given(method("POST"))
            .and(path("/invoke/fn-01"))
            .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
            .mount(&server)
            .await;
    });

    // Non-success responses are logged per invocation but never abort the
    // run; their latencies still count.
    let host = server.uri();
    let mut cmd = create_test_cmd();
    cmd.args([
        "--app",
        "myapp",
        "--function",
        "myfn",
        "--host",
        host.as_str(),
        "--count",
        "4",
        "--workers",
        "2",
        "--no-color",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains(
        "Invocations:  4 attempted, 4 recorded, 4 failed, 0 not issued",
    ))
    .stdout(predicate::str::contains("Latency Statistics:"))
    .stderr(predicate::str::contains("bad status code: 500"));
}

#[test]
fn test_verbose_lists_individual_samples() {
    let (rt, server) = start_mock_service();
    rt.block_on(async {
        mount_control_plane(&server).await;
        Mock::given(method("POST"))
            .and(path("/invoke/fn-01"))
            .respond_with(ResponseTemplate::new(200).set_body_string("\"ok\""))
            .mount(&server)
            .await;
    });

    let host = server.uri();
    let mut cmd = create_test_cmd();
    cmd.args([
        "--app",
        "myapp",
        "--function",
        "myfn",
        "--host",
        host.as_str(),
        "--count",
        "3",
        "--workers",
        "1",
        "--verbose",
        "--no-color",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains(
        "Individual Samples (sorted by duration):",
    ))
    .stdout(predicate::str::contains("duration"))
    .stdout(predicate::str::contains("level:"));
}

#[test]
fn test_uneven_split_drops_remainder() {
    let (rt, server) = start_mock_service();
    rt.block_on(async {
        mount_control_plane(&server).await;
        // 10 requested over 3 workers means 3 each; the tenth is dropped
        Mock::given(method("POST"))
            .and(path("/invoke/fn-01"))
            .respond_with(ResponseTemplate::new(200).set_body_string("\"ok\""))
            .expect(9)
            .mount(&server)
            .await;
    });

    let host = server.uri();
    let mut cmd = create_test_cmd();
    cmd.args([
        "--app",
        "myapp",
        "--function",
        "myfn",
        "--host",
        host.as_str(),
        "--count",
        "10",
        "--workers",
        "3",
        "--no-color",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Workers:      3 x 3 invocations each"))
    .stdout(predicate::str::contains(
        "Dropped:      1 requested invocations (uneven split)",
    ))
    .stdout(predicate::str::contains(
        "Invocations:  9 attempted, 9 recorded, 0 failed, 0 not issued",
    ));

    rt.block_on(server.verify());
}

#[test]
fn test_zero_share_run_exits_without_samples() {
    // 3 invocations over 5 workers rounds down to zero each; nothing is
    // issued, so the report prints empty counters and the run fails with the
    // insufficient-samples code. No invoke mock is mounted on purpose.
    let (rt, server) = start_mock_service();
    rt.block_on(async {
        mount_control_plane(&server).await;
    });

    let host = server.uri();
    let mut cmd = create_test_cmd();
    cmd.args([
        "--app",
        "myapp",
        "--function",
        "myfn",
        "--host",
        host.as_str(),
        "--count",
        "3",
        "--workers",
        "5",
        "--no-color",
    ])
    .assert()
    .failure()
    .code(5)
    .stdout(predicate::str::contains(
        "Invocations:  0 attempted, 0 recorded, 0 failed, 0 not issued",
    ))
    .stdout(predicate::str::contains(
        "Dropped:      3 requested invocations (uneven split)",
    ))
    .stdout(predicate::str::contains(
        "WARNING: no samples were recorded; statistics cannot be computed",
    ))
    .stderr(predicate::str::contains("Insufficient samples"));
}

#[test]
fn test_duplicate_function_names_resolve_to_last_match() {
    let (rt, server) = start_mock_service();
    rt.block_on(async {
        Mock::given(method("GET"))
            .and(path("/v2/apps"))
            .and(query_param("name", "myapp"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{"id": "app-01", "name": "myapp"}]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v2/fns"))
            .and(query_param("app_id", "app-01"))
            .and(query_param("name", "myfn"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {"id": "fn-a", "name": "myfn"},
                    {"id": "fn-b", "name": "myfn"}
                ]
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/invoke/fn-b"))
            .respond_with(ResponseTemplate::new(200).set_body_string("\"ok\""))
            .expect(2)
            .mount(&server)
            .await;
    });

    let host = server.uri();
    let mut cmd = create_test_cmd();
    cmd.args([
        "--app",
        "myapp",
        "--function",
        "myfn",
        "--host",
        host.as_str(),
        "--count",
        "2",
        "--workers",
        "1",
        "--no-color",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Target: myapp/myfn (id fn-b)"))
    .stdout(predicate::str::contains(
        "Invocations:  2 attempted, 2 recorded, 0 failed, 0 not issued",
    ));

    rt.block_on(server.verify());
}

#[test]
fn test_unknown_function_is_a_resolution_error() {
    let (rt, server) = start_mock_service();
    rt.block_on(async {
        Mock::given(method("GET"))
            .and(path("/v2/apps"))
            .and(query_param("name", "myapp"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{"id": "app-01", "name": "myapp"}]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v2/fns"))
            .and(query_param("app_id", "app-01"))
            .and(query_param("name", "ghost"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .mount(&server)
            .await;
    });

    let host = server.uri();
    let mut cmd = create_test_cmd();
    cmd.args([
        "--app",
        "myapp",
        "--function",
        "ghost",
        "--host",
        host.as_str(),
        "--no-color",
    ])
    .assert()
    .failure()
    .code(3)
    .stderr(predicate::str::contains("fn not found"));
}

#[test]
fn test_unknown_app_is_a_resolution_error() {
    let (rt, server) = start_mock_service();
    rt.block_on(async {
        Mock::given(method("GET"))
            .and(path("/v2/apps"))
            .and(query_param("name", "nosuchapp"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .mount(&server)
            .await;
    });

    let host = server.uri();
    let mut cmd = create_test_cmd();
    cmd.args([
        "--app",
        "nosuchapp",
        "--function",
        "myfn",
        "--host",
        host.as_str(),
        "--no-color",
    ])
    .assert()
    .failure()
    .code(3)
    .stderr(predicate::str::contains("app not found"));
}

#[test]
fn test_control_plane_error_status_is_a_resolution_error() {
    let (rt, server) = start_mock_service();
    rt.block_on(async {
        Mock::given(method("GET"))
            .and(path("/v2/apps"))
            .and(query_param("name", "myapp"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
    });

    let host = server.uri();
    let mut cmd = create_test_cmd();
    cmd.args([
        "--app",
        "myapp",
        "--function",
        "myfn",
        "--host",
        host.as_str(),
        "--no-color",
    ])
    .assert()
    .failure()
    .code(3)
    .stderr(predicate::str::contains(
        "control plane returned status 503",
    ));
}
