// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `lincache export`, the default command.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;
use yare::parameterized;

const ENTITY_ARRAYS: [&str; 7] = ["teams", "projects", "users", "states", "cycles", "labels", "issues"];

const FOUND_FLAGS: [&str; 6] = [
    "teams_found",
    "projects_found",
    "users_found",
    "states_found",
    "cycles_found",
    "labels_found",
];

/// A temp dir holding an isolated store root and home directory.
struct Fixture {
    temp: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("store")).unwrap();
        Fixture { temp }
    }

    fn root(&self) -> PathBuf {
        self.temp.path().join("store")
    }

    fn collection(&self, db: &str, name: &str, records: &[Value]) -> &Self {
        let dir = self.root().join(db);
        fs::create_dir_all(&dir).unwrap();
        let lines: Vec<String> = records.iter().map(Value::to_string).collect();
        fs::write(dir.join(format!("{name}.jsonl")), lines.join("\n")).unwrap();
        self
    }

    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("lincache");
        cmd.env_remove("LINCACHE_STORE")
            .env_remove("LINCACHE_CONFIG")
            .env_remove("RUST_LOG")
            .env("HOME", self.temp.path())
            .env("XDG_CONFIG_HOME", self.temp.path())
            .env("XDG_DATA_HOME", self.temp.path())
            .current_dir(self.temp.path());
        cmd
    }

    fn export(&self) -> Value {
        export_from(self.cmd().arg("--store").arg(self.root()))
    }
}

fn export_from(cmd: &mut Command) -> Value {
    let output = cmd.arg("export").output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

fn assert_empty_export(doc: &Value) {
    assert_eq!(doc["version"], 3);
    for key in ENTITY_ARRAYS {
        assert_eq!(doc[key], json!([]), "{key} should be empty");
    }
    for flag in FOUND_FLAGS {
        assert_eq!(doc["_meta"][flag], false, "{flag} should be false");
    }
}

fn ids(doc: &Value, key: &str) -> Vec<String> {
    doc[key]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Absent and degraded sources
// =============================================================================

#[test]
fn missing_store_exports_empty_snapshot() {
    let fx = Fixture::new();
    let doc = export_from(fx.cmd().arg("--store").arg(fx.temp.path().join("nowhere")));
    assert_empty_export(&doc);
    assert_eq!(doc["updatedAt"], doc["_meta"]["exportedAt"]);
}

#[test]
fn store_from_environment_is_used() {
    let fx = Fixture::new();
    fx.collection("linear_1", "teams", &[json!({"id": "t1", "key": "ENG", "name": "Eng"})]);
    let doc = export_from(fx.cmd().env("LINCACHE_STORE", fx.root()));
    assert_eq!(ids(&doc, "teams"), vec!["t1"]);
}

#[test]
fn flag_overrides_environment() {
    let fx = Fixture::new();
    fx.collection("linear_1", "teams", &[json!({"id": "t1", "key": "ENG", "name": "Eng"})]);
    let doc = export_from(
        fx.cmd()
            .env("LINCACHE_STORE", fx.temp.path().join("nowhere"))
            .arg("--store")
            .arg(fx.root()),
    );
    assert_eq!(ids(&doc, "teams"), vec!["t1"]);
}

#[test]
fn store_root_that_is_a_file_exports_empty_snapshot() {
    let fx = Fixture::new();
    let file = fx.temp.path().join("not-a-dir");
    fs::write(&file, "x").unwrap();

    let output = fx.cmd().arg("--store").arg(&file).arg("export").output().unwrap();
    assert!(output.status.success());
    assert_empty_export(&serde_json::from_slice(&output.stdout).unwrap());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to open store"));
}

#[test]
fn store_without_matching_database_exports_empty_snapshot() {
    let fx = Fixture::new();
    fx.collection("linear_databases", "teams", &[json!({"id": "t1", "key": "ENG", "name": "Eng"})]);
    fx.collection("other", "teams", &[json!({"id": "t2", "key": "OPS", "name": "Ops"})]);
    assert_empty_export(&fx.export());
}

#[test]
fn corrupt_collection_is_skipped() {
    let fx = Fixture::new();
    fx.collection("linear_1", "teams", &[json!({"id": "t1", "key": "ENG", "name": "Eng"})]);
    fs::write(
        fx.root().join("linear_1").join("users.jsonl"),
        "{\"id\":\"u1\",\"name\":\"Ada\",\"email\":\"a@x.io\"}\nnot json\n",
    )
    .unwrap();

    let doc = fx.export();
    assert_eq!(ids(&doc, "teams"), vec!["t1"]);
    assert_eq!(doc["users"], json!([]));
    assert_eq!(doc["_meta"]["users_found"], false);
}

// =============================================================================
// Export contents
// =============================================================================

#[test]
fn projects_collect_recent_active_issue_titles() {
    let fx = Fixture::new();
    let mut projects = vec![json!({"name": "Acme", "teamIds": ["T1"], "statusId": "s1", "organizationId": "o1"})];
    for n in 1..=9 {
        projects.push(json!({
            "id": format!("p{n}"), "name": format!("Project {n}"), "teamIds": ["T1"],
            "statusId": "s1", "organizationId": "o1"
        }));
    }
    fx.collection("linear_1", "projects", &projects);
    fx.collection(
        "linear_1",
        "states",
        &[
            json!({"id": "open", "name": "Todo", "type": "unstarted", "color": "#aaa", "teamId": "T1"}),
            json!({"id": "done", "name": "Done", "type": "completed", "color": "#0f0", "teamId": "T1"}),
        ],
    );
    fx.collection(
        "linear_1",
        "issues",
        &[
            json!({"id": "i1", "number": 1, "teamId": "T1", "title": "First", "projectId": "p1",
                   "stateId": "open", "updatedAt": "2026-01-01T00:00:00Z"}),
            json!({"id": "i2", "number": 2, "teamId": "T1", "title": "Second", "projectId": "p1",
                   "updatedAt": "2026-02-01T00:00:00Z"}),
            json!({"id": "i3", "number": 3, "teamId": "T1", "title": "Seventh", "projectId": "p7",
                   "stateId": "gone", "updatedAt": "2026-01-05T00:00:00Z"}),
            json!({"id": "i4", "number": 4, "teamId": "T1", "title": "Shipped", "projectId": "p3",
                   "stateId": "done", "updatedAt": "2026-03-01T00:00:00Z"}),
        ],
    );

    let doc = fx.export();
    let projects = doc["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 9);
    for project in projects {
        let titles = &project["recentIssueTitles"];
        match project["id"].as_str().unwrap() {
            "p1" => assert_eq!(titles, &json!(["Second", "First"])),
            "p7" => assert_eq!(titles, &json!(["Seventh"])),
            _ => assert_eq!(titles, &json!([])),
        }
    }
    assert_eq!(doc["_meta"]["projects_has_state_field"], false);
}

#[test]
fn team_and_label_records_land_in_separate_tables() {
    let fx = Fixture::new();
    fx.collection("linear_1", "a", &[json!({"id": "t1", "key": "ENG", "name": "Engineering"})]);
    fx.collection("linear_1", "b", &[json!({"id": "l1", "name": "bug", "color": "#ff0000", "isGroup": false})]);

    let doc = fx.export();
    assert_eq!(ids(&doc, "teams"), vec!["t1"]);
    assert_eq!(ids(&doc, "labels"), vec!["l1"]);
    assert_eq!(doc["teams"][0]["issueEstimationType"], "fibonacci");
    assert_eq!(doc["labels"][0]["isGroup"], false);
}

#[parameterized(
    far_future = { "2999-01-01T00:00:00.000Z", true },
    long_past = { "2000-01-01T00:00:00.000Z", false },
    empty = { "", false },
)]
fn cycles_are_limited_to_upcoming(ends_at: &str, kept: bool) {
    let fx = Fixture::new();
    fx.collection(
        "linear_1",
        "cycles",
        &[json!({"id": "c1", "number": 4, "startsAt": "1999-12-01T00:00:00.000Z",
                 "endsAt": ends_at, "teamId": "T1"})],
    );

    let doc = fx.export();
    assert_eq!(doc["_meta"]["cycles_found"], true);
    assert_eq!(doc["cycles"].as_array().unwrap().len(), usize::from(kept));
}

#[test]
fn users_omit_empty_optional_fields() {
    let fx = Fixture::new();
    fx.collection(
        "linear_1",
        "users",
        &[
            json!({"id": "u1", "name": "Ada", "email": "ada@x.io", "displayName": "ada", "avatarUrl": ""}),
            json!({"id": "u2", "name": "Bob", "email": "bob@x.io"}),
        ],
    );

    let doc = fx.export();
    assert_eq!(doc["users"][0]["displayName"], "ada");
    assert!(doc["users"][0].get("avatarUrl").is_none());
    assert!(doc["users"][1].get("displayName").is_none());
}

#[test]
fn repeated_exports_differ_only_in_timestamps() {
    let fx = Fixture::new();
    fx.collection("linear_1", "teams", &[
        json!({"id": "t2", "key": "OPS", "name": "Ops"}),
        json!({"id": "t1", "key": "ENG", "name": "Eng"}),
    ]);

    let strip = |mut doc: Value| {
        doc["updatedAt"] = Value::Null;
        doc["_meta"]["exportedAt"] = Value::Null;
        doc
    };
    assert_eq!(strip(fx.export()), strip(fx.export()));
}

#[test]
fn compact_output_is_one_line() {
    let fx = Fixture::new();
    let output = fx
        .cmd()
        .args(["--output", "compact", "export", "--store"])
        .arg(fx.root())
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.contains("\"version\":3"));
}

#[test]
fn bare_invocation_exports() {
    let fx = Fixture::new();
    fx.cmd()
        .arg("--store")
        .arg(fx.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"version\": 3"));
}

