// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The versioned export document.
//!
//! Every entity is projected through a fixed whitelist of fields with
//! defaults for anything missing, so consumers see a stable shape no matter
//! what the source records carried. `_meta` records which optional fields
//! were actually observed, letting consumers notice schema drift.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clock::format_timestamp;
use crate::record::{bool_field, int_field, non_empty_str, str_field, str_list, Record};
use crate::resolve::{
    primary_team, recent_issue_titles, upcoming_cycles, DEFAULT_RECENT_ISSUE_LIMIT,
};
use crate::tables::{EntityTable, EntityTables};

/// Version of the document shape produced by [`build_snapshot`].
pub const SNAPSHOT_VERSION: u32 = 3;

/// Estimation scale assumed for teams that do not record one.
pub const DEFAULT_ESTIMATION_TYPE: &str = "fibonacci";

/// Tunables for snapshot construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Maximum recent issue titles per project.
    pub recent_issue_limit: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions { recent_issue_limit: DEFAULT_RECENT_ISSUE_LIMIT }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamEntry {
    pub id: String,
    pub name: String,
    pub key: String,
    pub issue_estimation_type: String,
    pub issue_estimation_allow_zero: bool,
    pub issue_estimation_extended: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub id: String,
    pub name: String,
    pub team_ids: Vec<String>,
    pub status_id: String,
    pub description: String,
    pub recent_issue_titles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEntry {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateEntry {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub state_type: String,
    pub color: String,
    pub team_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleEntry {
    pub id: String,
    pub number: i64,
    pub starts_at: String,
    pub ends_at: String,
    pub team_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelEntry {
    pub id: String,
    pub name: String,
    pub color: String,
    pub is_group: bool,
}

/// Coverage summary of what the scan found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(rename = "exportedAt")]
    pub exported_at: String,
    pub teams_found: bool,
    pub projects_found: bool,
    pub users_found: bool,
    pub states_found: bool,
    pub cycles_found: bool,
    pub labels_found: bool,
    pub teams_has_estimation_fields: bool,
    pub projects_has_state_field: bool,
    pub labels_has_team_id: bool,
    pub labels_has_parent_id: bool,
    pub cycles_has_name: bool,
}

/// The complete export document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: u32,
    pub updated_at: String,
    pub teams: Vec<TeamEntry>,
    pub projects: Vec<ProjectEntry>,
    pub users: Vec<UserEntry>,
    pub states: Vec<StateEntry>,
    /// Only cycles that end after `updated_at`.
    pub cycles: Vec<CycleEntry>,
    pub labels: Vec<LabelEntry>,
    /// Reserved; always empty.
    pub issues: Vec<Value>,
    #[serde(rename = "_meta")]
    pub meta: Meta,
}

/// Builds the export document from scanned tables.
pub fn build_snapshot(tables: &EntityTables, now: DateTime<Utc>, options: &ExportOptions) -> Snapshot {
    let now = format_timestamp(now);

    Snapshot {
        version: SNAPSHOT_VERSION,
        updated_at: now.clone(),
        teams: tables.teams.values().map(team_entry).collect(),
        projects: tables
            .projects
            .iter()
            .map(|(id, project)| project_entry(id, project, tables, options))
            .collect(),
        users: tables.users.values().map(user_entry).collect(),
        states: tables.states.values().map(state_entry).collect(),
        cycles: upcoming_cycles(&tables.cycles, &now).map(cycle_entry).collect(),
        labels: tables.labels.values().map(label_entry).collect(),
        issues: Vec::new(),
        meta: meta(tables, now.clone()),
    }
}

/// Builds the document for a run that found no source data.
pub fn empty_snapshot(now: DateTime<Utc>) -> Snapshot {
    build_snapshot(&EntityTables::default(), now, &ExportOptions::default())
}

fn team_entry(team: &Record) -> TeamEntry {
    TeamEntry {
        id: str_field(team, "id").to_string(),
        name: str_field(team, "name").to_string(),
        key: str_field(team, "key").to_string(),
        issue_estimation_type: team
            .get("issueEstimationType")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_ESTIMATION_TYPE)
            .to_string(),
        issue_estimation_allow_zero: bool_field(team, "issueEstimationAllowZero"),
        issue_estimation_extended: bool_field(team, "issueEstimationExtended"),
    }
}

fn project_entry(
    id: &str,
    project: &Record,
    tables: &EntityTables,
    options: &ExportOptions,
) -> ProjectEntry {
    let team = primary_team(project, &tables.teams);
    tracing::debug!("project {} belongs to team {}", id, team.name);

    ProjectEntry {
        id: id.to_string(),
        name: str_field(project, "name").to_string(),
        team_ids: str_list(project, "teamIds"),
        status_id: str_field(project, "statusId").to_string(),
        description: str_field(project, "description").to_string(),
        recent_issue_titles: recent_issue_titles(id, tables, options.recent_issue_limit),
    }
}

fn user_entry(user: &Record) -> UserEntry {
    UserEntry {
        id: str_field(user, "id").to_string(),
        name: str_field(user, "name").to_string(),
        email: str_field(user, "email").to_string(),
        avatar_url: non_empty_str(user, "avatarUrl").map(str::to_string),
        display_name: non_empty_str(user, "displayName").map(str::to_string),
    }
}

fn state_entry(state: &Record) -> StateEntry {
    StateEntry {
        id: str_field(state, "id").to_string(),
        name: str_field(state, "name").to_string(),
        state_type: str_field(state, "type").to_string(),
        color: str_field(state, "color").to_string(),
        team_id: str_field(state, "teamId").to_string(),
    }
}

fn cycle_entry(cycle: &Record) -> CycleEntry {
    CycleEntry {
        id: str_field(cycle, "id").to_string(),
        number: int_field(cycle, "number"),
        starts_at: str_field(cycle, "startsAt").to_string(),
        ends_at: str_field(cycle, "endsAt").to_string(),
        team_id: str_field(cycle, "teamId").to_string(),
    }
}

fn label_entry(label: &Record) -> LabelEntry {
    LabelEntry {
        id: str_field(label, "id").to_string(),
        name: str_field(label, "name").to_string(),
        color: str_field(label, "color").to_string(),
        is_group: bool_field(label, "isGroup"),
    }
}

// Variant-field flags look at the first record only; the tables are assumed
// homogeneous, the same assumption classification makes.
fn first_has(table: &EntityTable, key: &str) -> bool {
    table.values().next().is_some_and(|record| record.contains_key(key))
}

fn meta(tables: &EntityTables, exported_at: String) -> Meta {
    Meta {
        exported_at,
        teams_found: !tables.teams.is_empty(),
        projects_found: !tables.projects.is_empty(),
        users_found: !tables.users.is_empty(),
        states_found: !tables.states.is_empty(),
        cycles_found: !tables.cycles.is_empty(),
        labels_found: !tables.labels.is_empty(),
        teams_has_estimation_fields: tables
            .teams
            .values()
            .any(|team| team.contains_key("issueEstimationType")),
        projects_has_state_field: first_has(&tables.projects, "state"),
        labels_has_team_id: first_has(&tables.labels, "teamId"),
        labels_has_parent_id: first_has(&tables.labels, "parentId"),
        cycles_has_name: first_has(&tables.cycles, "name"),
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
