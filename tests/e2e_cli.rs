//! CLI end-to-end tests
//!
//! Tests for the hlshost command-line interface.

mod common;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the hlshost binary
#[allow(deprecated)]
fn hlshost_cmd() -> Command {
    Command::cargo_bin("hlshost").unwrap()
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = hlshost_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = hlshost_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("hlshost"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = hlshost_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "hlshost {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_cli_validate_defaults() {
    let mut cmd = hlshost_cmd();
    cmd.arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("using defaults"))
        .stdout(predicate::str::contains("Modes: vod, live, chase"));
}

#[test]
fn test_cli_validate_config_file() {
    let dir = tempdir().unwrap();
    let master = common::write_fixture_tree(dir.path());
    let config_path = dir.path().join("hlshost.json");
    let config = serde_json::json!({
        "server": { "host": "127.0.0.1", "port": 9000 },
        "source": { "master_playlist": master },
        "modes": ["live"],
        "live": { "window_segments": 5 },
        "reload": { "interval_secs": 30 }
    });
    fs::write(&config_path, config.to_string()).unwrap();

    let mut cmd = hlshost_cmd();
    cmd.arg("validate")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Server: 127.0.0.1:9000"))
        .stdout(predicate::str::contains("Modes: live"))
        .stdout(predicate::str::contains("Live window: 5 segments"))
        .stdout(predicate::str::contains("Reload: every 30s"))
        .stdout(predicate::str::contains("warning").not());
}

#[test]
fn test_cli_validate_rejects_malformed_json() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("hlshost.json");
    fs::write(&config_path, "{ not json").unwrap();

    let mut cmd = hlshost_cmd();
    cmd.arg("-c")
        .arg(&config_path)
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config parse error"));
}

#[test]
fn test_cli_inspect_summary() {
    let dir = tempdir().unwrap();
    let master = common::write_fixture_tree(dir.path());

    let mut cmd = hlshost_cmd();
    cmd.arg("inspect")
        .arg(&master)
        .assert()
        .success()
        .stdout(predicate::str::contains("Media Playlists: 2"))
        .stdout(predicate::str::contains("4 segments, 24.000s, 1 discontinuities"))
        .stdout(predicate::str::contains("container: ts"));
}

#[test]
fn test_cli_inspect_json() {
    let dir = tempdir().unwrap();
    let master = common::write_fixture_tree(dir.path());

    let output = hlshost_cmd()
        .arg("inspect")
        .arg(&master)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let media = &json["media_playlists"][0];
    assert_eq!(media["segments"].as_array().unwrap().len(), 4);
    assert_eq!(media["segments"][3]["discontinuity_sequence"], 1);
    assert_eq!(media["tags"][3], "#EXT-X-MEDIA-SEQUENCE:0");
}

#[test]
fn test_cli_inspect_missing_file() {
    let dir = tempdir().unwrap();

    let mut cmd = hlshost_cmd();
    cmd.arg("inspect")
        .arg(dir.path().join("nope.m3u8"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_cli_inspect_unsupported_container() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("playlist.m3u8"),
        "#EXTM3U\n#EXT-X-STREAM-INF:BANDWIDTH=1\nindex.m3u8\n",
    )
    .unwrap();
    fs::write(dir.path().join("index.m3u8"), "#EXTM3U\n#EXTINF:6,\nclip.mov\n").unwrap();

    let mut cmd = hlshost_cmd();
    cmd.arg("inspect")
        .arg(dir.path().join("playlist.m3u8"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported container"));
}
