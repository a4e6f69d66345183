//! Integration tests for the tfsync binary.
//!
//! These tests run the compiled binary with a scrubbed environment. Commands
//! that reach the remote talk to a local httptest server.

use std::path::Path;

use assert_cmd::Command;
use httptest::{Expectation, Server, all_of, matchers::*, responders::*};
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;
use tfsync_test_utils::template::fixture;

/// Get a Command for the tfsync binary with no inherited environment
fn tfsync(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tfsync"));
    cmd.env_clear()
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("CLICOLOR", "0")
        .env("NO_COLOR", "1");
    cmd
}

/// Command pointed at `server` with valid credentials
fn tfsync_against(home: &Path, server: &Server) -> Command {
    let mut cmd = tfsync(home);
    cmd.env("ATLAS_ADDRESS", server.url_str(""))
        .env("ATLAS_TOKEN", "t0k3n")
        .env("ATLAS_ORGANIZATION", "acme");
    cmd
}

fn expect_workspace(server: &Server) {
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/api/v2/organizations/acme/workspaces/network"),
            request::headers(contains(("authorization", "Bearer t0k3n"))),
        ])
        .respond_with(json_encoded(json!({
            "data": {"id": "ws-1", "attributes": {"name": "network"}}
        }))),
    );
}

fn var(id: &str, key: &str, value: &str) -> Value {
    json!({
        "id": id,
        "attributes": {"key": key, "value": value, "sensitive": false, "category": "terraform", "hcl": false}
    })
}

fn vars_document(vars: Vec<Value>) -> Value {
    json!({
        "data": vars,
        "meta": {"pagination": {"current-page": 1, "next-page": null}}
    })
}

fn expect_create(server: &Server, key: &str, value: &str, hcl: bool, sensitive: bool) {
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/api/v2/workspaces/ws-1/vars"),
            request::body(json_decoded(eq(json!({
                "data": {
                    "type": "vars",
                    "attributes": {
                        "key": key,
                        "value": value,
                        "category": "terraform",
                        "hcl": hcl,
                        "sensitive": sensitive
                    }
                }
            })))),
        ])
        .respond_with(status_code(201).body("{}")),
    );
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    tfsync(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("addNew"))
        .stdout(predicate::str::contains("removeMissing"))
        .stdout(predicate::str::contains("listWorkspaces"));
}

#[test]
fn test_version_output() {
    let home = TempDir::new().unwrap();
    tfsync(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tfsync"));
}

#[test]
fn test_no_command_shows_help_hint() {
    let home = TempDir::new().unwrap();
    tfsync(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("tfsync --help"));
}

#[test]
fn test_unknown_command_fails() {
    let home = TempDir::new().unwrap();
    tfsync(home.path())
        .arg("sync-everything")
        .assert()
        .failure();
}

// ============================================================================
// Startup Failures
// ============================================================================

#[test]
fn test_missing_token_fails_before_any_command() {
    let home = TempDir::new().unwrap();
    tfsync(home.path())
        .args(["compare", "--tf_template", "does-not-exist.tf"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing access token"))
        .stderr(predicate::str::contains("ATLAS_TOKEN"));
}

#[test]
fn test_missing_organization() {
    let home = TempDir::new().unwrap();
    tfsync(home.path())
        .args(["listWorkspaces", "--tf_key", "t0k3n"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing organization"));
}

#[test]
fn test_explicit_config_must_exist() {
    let home = TempDir::new().unwrap();
    tfsync(home.path())
        .env("TFSYNC_CONFIG", home.path().join("absent.toml"))
        .arg("listWorkspaces")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read config"));
}

#[test]
fn test_missing_workspace_identity() {
    let home = TempDir::new().unwrap();
    let server = Server::run();
    let template = fixture("unlinked");

    tfsync_against(home.path(), &server)
        .args(["compare", "--tf_template"])
        .arg(&template)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No workspace given"));
}

#[test]
fn test_missing_template_file() {
    let home = TempDir::new().unwrap();
    let server = Server::run();

    tfsync_against(home.path(), &server)
        .current_dir(home.path())
        .arg("compare")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("main.tf"));
}

// ============================================================================
// Variable Commands
// ============================================================================

#[test]
fn test_compare_json_output() {
    let home = TempDir::new().unwrap();
    let server = Server::run();
    expect_workspace(&server);
    server.expect(
        Expectation::matching(request::method_path("GET", "/api/v2/workspaces/ws-1/vars"))
            .respond_with(json_encoded(vars_document(vec![
                var("var-1", "region", "us-east-1"),
                var("var-2", "instance_count", "2"),
                var("var-3", "stale", "x"),
            ]))),
    );

    let output = tfsync_against(home.path(), &server)
        .args(["compare", "--json", "--tf_template"])
        .arg(fixture("basic"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["workspace"], "network");
    assert_eq!(report["in_sync"], false);
    assert_eq!(
        report["added"],
        json!(["aws_access_key", "aws_secret_key", "tags"])
    );
    assert_eq!(report["removed"], json!(["stale"]));
    assert_eq!(
        report["modified"]["region"],
        json!({"declared": "eu-west-1", "remote": "us-east-1"})
    );
    assert_eq!(report["unchanged"], json!(["instance_count"]));
}

#[test]
fn test_add_new_end_to_end() {
    let home = TempDir::new().unwrap();
    let server = Server::run();
    expect_workspace(&server);
    server.expect(
        Expectation::matching(request::method_path("GET", "/api/v2/workspaces/ws-1/vars"))
            .respond_with(json_encoded(vars_document(vec![var(
                "var-1",
                "region",
                "eu-west-1",
            )]))),
    );
    expect_create(&server, "aws_access_key", "AKIA-test", false, true);
    expect_create(&server, "aws_secret_key", "REPLACE_IN_ATLAS", false, false);
    expect_create(&server, "instance_count", "2", false, false);
    expect_create(&server, "tags", r#"{"team":"network"}"#, true, false);

    tfsync_against(home.path(), &server)
        .env("AWS_ACCESS_KEY_ID", "AKIA-test")
        .args(["addNew", "--tf_template"])
        .arg(fixture("basic"))
        .assert()
        .success()
        .stdout(predicate::str::contains("+ aws_access_key"))
        .stdout(predicate::str::contains("4 created"));
}

#[test]
fn test_remove_missing_dry_run_makes_no_calls() {
    let home = TempDir::new().unwrap();
    let server = Server::run();
    expect_workspace(&server);
    server.expect(
        Expectation::matching(request::method_path("GET", "/api/v2/workspaces/ws-1/vars"))
            .respond_with(json_encoded(vars_document(vec![
                var("var-1", "region", "eu-west-1"),
                var("var-9", "stale", "x"),
            ]))),
    );

    tfsync_against(home.path(), &server)
        .args(["removeMissing", "--dry-run", "--tf_template"])
        .arg(fixture("basic"))
        .assert()
        .success()
        .stdout(predicate::str::contains("- stale (would delete)"))
        .stdout(predicate::str::contains("1 planned"));
}

#[test]
fn test_remove_missing_lists_variables_once() {
    let home = TempDir::new().unwrap();
    let server = Server::run();
    expect_workspace(&server);
    server.expect(
        Expectation::matching(request::method_path("GET", "/api/v2/workspaces/ws-1/vars"))
            .times(1)
            .respond_with(json_encoded(vars_document(vec![
                var("var-1", "region", "eu-west-1"),
                var("var-7", "stale_a", "x"),
                var("var-8", "stale_b", "y"),
                var("var-9", "stale_c", "z"),
            ]))),
    );
    for id in ["var-7", "var-8", "var-9"] {
        server.expect(
            Expectation::matching(request::method_path(
                "DELETE",
                format!("/api/v2/workspaces/ws-1/vars/{id}"),
            ))
            .times(1)
            .respond_with(status_code(204)),
        );
    }

    tfsync_against(home.path(), &server)
        .args(["removeMissing", "--tf_template"])
        .arg(fixture("basic"))
        .assert()
        .success()
        .stdout(predicate::str::contains("- stale_b"))
        .stdout(predicate::str::contains("3 deleted"));
}

#[test]
fn test_remove_missing_nothing_to_do() {
    let home = TempDir::new().unwrap();
    let server = Server::run();
    expect_workspace(&server);
    server.expect(
        Expectation::matching(request::method_path("GET", "/api/v2/workspaces/ws-1/vars"))
            .respond_with(json_encoded(vars_document(vec![var(
                "var-1",
                "region",
                "eu-west-1",
            )]))),
    );

    tfsync_against(home.path(), &server)
        .args(["remove-missing", "--tf_template"])
        .arg(fixture("basic"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to do"));
}

#[test]
fn test_update_values_reports_every_failure() {
    let home = TempDir::new().unwrap();
    let server = Server::run();
    expect_workspace(&server);
    // the classifying listing also supplies the ids
    server.expect(
        Expectation::matching(request::method_path("GET", "/api/v2/workspaces/ws-1/vars"))
            .times(1)
            .respond_with(json_encoded(vars_document(vec![
                var("var-1", "region", "us-east-1"),
                var("var-2", "instance_count", "3"),
            ]))),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("PATCH", "/api/v2/workspaces/ws-1/vars/var-1"),
            request::body(json_decoded(eq(json!({
                "data": {"id": "var-1", "type": "vars", "attributes": {"value": "eu-west-1"}}
            })))),
        ])
        .respond_with(json_encoded(json!({"data": {}}))),
    );
    server.expect(
        Expectation::matching(request::method_path(
            "PATCH",
            "/api/v2/workspaces/ws-1/vars/var-2",
        ))
        .respond_with(
            status_code(422).body(json!({"errors": [{"detail": "Value is invalid"}]}).to_string()),
        ),
    );

    tfsync_against(home.path(), &server)
        .args(["updateValues", "--tf_template"])
        .arg(fixture("basic"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("~ region"))
        .stdout(predicate::str::contains("! instance_count: Value is invalid"))
        .stderr(predicate::str::contains("1 of 2 variable(s) failed to update"));
}

// ============================================================================
// Workspace Commands
// ============================================================================

fn expect_workspace_list(server: &Server, workspaces: Value) {
    server.expect(
        Expectation::matching(request::method_path("GET", "/api/v2/organizations/acme/workspaces"))
            .respond_with(json_encoded(json!({
                "data": workspaces,
                "meta": {"pagination": {"current-page": 1, "next-page": null}}
            }))),
    );
}

#[test]
fn test_check_workspace_exists() {
    let home = TempDir::new().unwrap();
    let server = Server::run();
    expect_workspace_list(
        &server,
        json!([{"id": "ws-1", "attributes": {"name": "network"}}]),
    );

    tfsync_against(home.path(), &server)
        .args(["checkWorkspace", "--workspace", "network"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exists"));
}

#[test]
fn test_check_workspace_missing_exits_nonzero() {
    let home = TempDir::new().unwrap();
    let server = Server::run();
    expect_workspace_list(&server, json!([]));

    tfsync_against(home.path(), &server)
        .args(["checkWorkspace", "--tf_template"])
        .arg(fixture("basic"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Workspace network does not exist"));
}

#[test]
fn test_add_workspace_with_git_repo() {
    let home = TempDir::new().unwrap();
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/api/v2/organizations/acme/workspaces"),
            request::body(json_decoded(eq(json!({
                "data": {
                    "type": "workspaces",
                    "attributes": {
                        "name": "network",
                        "vcs-repo": {"identifier": "acme/network-infra", "oauth-token-id": "ot-1"}
                    }
                }
            })))),
        ])
        .respond_with(status_code(201).body(
            json!({
                "data": {"id": "ws-7", "attributes": {"name": "network", "vcs-repo": {"identifier": "acme/network-infra"}}}
            })
            .to_string(),
        )),
    );

    tfsync_against(home.path(), &server)
        .env("ATLAS_OAUTH_TOKEN_ID", "ot-1")
        .args(["addWorkspace", "--workspace", "network", "--git_repo", "acme/network-infra"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created workspace network"))
        .stdout(predicate::str::contains("linked to acme/network-infra"));
}

#[test]
fn test_list_workspaces_json() {
    let home = TempDir::new().unwrap();
    let server = Server::run();
    expect_workspace_list(
        &server,
        json!([
            {"id": "ws-1", "attributes": {"name": "network"}},
            {"id": "ws-2", "attributes": {"name": "staging"}}
        ]),
    );

    let output = tfsync_against(home.path(), &server)
        .args(["listWorkspaces", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["organization"], "acme");
    let names: Vec<&str> = report["workspaces"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["network", "staging"]);
}
