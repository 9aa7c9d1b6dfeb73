// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for config file handling and process exit status.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;
use yare::parameterized;

fn lincache(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("lincache");
    cmd.env_remove("LINCACHE_STORE")
        .env_remove("LINCACHE_CONFIG")
        .env_remove("RUST_LOG")
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env("XDG_DATA_HOME", home);
    cmd
}

fn write_config(temp: &TempDir, content: &str) -> PathBuf {
    let path = temp.path().join("lincache.toml");
    fs::write(&path, content).unwrap();
    path
}

fn write_team(db: &Path) {
    fs::create_dir_all(db).unwrap();
    fs::write(db.join("teams.jsonl"), json!({"id": "t1", "key": "ENG", "name": "Eng"}).to_string())
        .unwrap();
}

fn team_count(cmd: &mut Command) -> usize {
    let output = cmd.arg("export").output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let doc: Value = serde_json::from_slice(&output.stdout).unwrap();
    doc["teams"].as_array().unwrap().len()
}

#[test]
fn store_path_from_config_file() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("cache");
    write_team(&root.join("linear_1"));
    let config = write_config(&temp, &format!("[store]\npath = {:?}\n", root.display().to_string()));

    assert_eq!(team_count(lincache(temp.path()).arg("--config").arg(&config)), 1);
}

#[test]
fn config_from_environment() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("cache");
    write_team(&root.join("tracker_a"));
    let config = write_config(&temp, "[store]\ndatabase_marker = \"tracker_\"\n");

    let count = team_count(
        lincache(temp.path()).env("LINCACHE_CONFIG", &config).arg("--store").arg(&root),
    );
    assert_eq!(count, 1);
}

#[test]
fn excluded_database_is_ignored() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("cache");
    write_team(&root.join("linear_a"));
    let config = write_config(&temp, "[store]\nexcluded_databases = [\"linear_a\"]\n");

    let count = team_count(lincache(temp.path()).arg("--config").arg(&config).arg("--store").arg(&root));
    assert_eq!(count, 0);
}

#[parameterized(
    not_toml = { "[store\npath = 1" },
    unknown_field = { "[store]\ncolour = \"blue\"\n" },
    blank_marker = { "[store]\ndatabase_marker = \"  \"\n" },
)]
fn bad_config_exits_nonzero(content: &str) {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, content);

    lincache(temp.path())
        .arg("--config")
        .arg(&config)
        .arg("export")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("error:"));
}

#[test]
fn missing_named_config_exits_nonzero() {
    let temp = TempDir::new().unwrap();
    lincache(temp.path())
        .arg("--config")
        .arg(temp.path().join("absent.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn verbose_logs_go_to_stderr() {
    let temp = TempDir::new().unwrap();
    let output = lincache(temp.path())
        .args(["-v", "--store"])
        .arg(temp.path().join("absent"))
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("exporting empty snapshot"));
    let _: Value = serde_json::from_slice(&output.stdout).unwrap();
}
