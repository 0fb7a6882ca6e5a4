use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("mudview")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("replay"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("--url"));
}

#[test]
fn test_replay_help_lists_formats() {
    cargo_bin_cmd!("mudview")
        .args(["replay", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("text"))
        .stdout(predicate::str::contains("ansi"))
        .stdout(predicate::str::contains("html"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("mudview")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}

#[test]
fn test_rejects_non_websocket_url() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("mudview")
        .env("MUDVIEW_HOME", dir.path())
        .args(["--url", "http://example.com/ws"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported URL scheme 'http'"));
}

#[test]
fn test_interactive_requires_terminal() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("mudview")
        .env("MUDVIEW_HOME", dir.path())
        .args(["--url", "ws://127.0.0.1:9/ws"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}
