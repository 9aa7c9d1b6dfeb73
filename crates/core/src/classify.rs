// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Structural classification of untyped records.
//!
//! Records carry no type tag, so the entity kind is inferred from which keys
//! are present and what shape their values have. The predicates overlap (an
//! issue carries a `number` just like a cycle), so they are evaluated in a
//! fixed precedence and the first match wins.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::record::{has_keys, Record};

/// The kinds of entity a record can be classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Project,
    Team,
    Issue,
    WorkflowState,
    User,
    Cycle,
    Label,
}

impl EntityKind {
    /// All kinds, in classification precedence.
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Project,
        EntityKind::Team,
        EntityKind::Issue,
        EntityKind::WorkflowState,
        EntityKind::User,
        EntityKind::Cycle,
        EntityKind::Label,
    ];

    /// Returns the string representation used in discovery output and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Project => "project",
            EntityKind::Team => "team",
            EntityKind::Issue => "issue",
            EntityKind::WorkflowState => "workflow_state",
            EntityKind::User => "user",
            EntityKind::Cycle => "cycle",
            EntityKind::Label => "label",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The closed set of workflow state categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateType {
    Started,
    Unstarted,
    Completed,
    Canceled,
    Backlog,
}

impl StateType {
    /// Returns the string representation used by the source store.
    pub fn as_str(&self) -> &'static str {
        match self {
            StateType::Started => "started",
            StateType::Unstarted => "unstarted",
            StateType::Completed => "completed",
            StateType::Canceled => "canceled",
            StateType::Backlog => "backlog",
        }
    }

    /// Returns true for states an issue leaves the active set in.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StateType::Completed | StateType::Canceled)
    }
}

impl fmt::Display for StateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StateType {
    type Err = Error;

    // Exact match: the source store writes these lowercase and anything else
    // is not a workflow state.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "started" => Ok(StateType::Started),
            "unstarted" => Ok(StateType::Unstarted),
            "completed" => Ok(StateType::Completed),
            "canceled" => Ok(StateType::Canceled),
            "backlog" => Ok(StateType::Backlog),
            _ => Err(Error::InvalidStateType(s.to_string())),
        }
    }
}

type Predicate = fn(&Record) -> bool;

/// Export precedence. Team and Project come before Issue so that issue's
/// looser shape cannot claim their records.
const RULES: [(Predicate, EntityKind); 7] = [
    (is_project, EntityKind::Project),
    (is_team, EntityKind::Team),
    (is_issue, EntityKind::Issue),
    (is_workflow_state, EntityKind::WorkflowState),
    (is_user, EntityKind::User),
    (is_cycle, EntityKind::Cycle),
    (is_label, EntityKind::Label),
];

/// Discovery precedence: same order, with id/team requirements relaxed on
/// the last three so that drifted schemas still show up in reports.
const DISCOVERY_RULES: [(Predicate, EntityKind); 7] = [
    (is_project, EntityKind::Project),
    (is_team, EntityKind::Team),
    (is_issue, EntityKind::Issue),
    (is_workflow_state, EntityKind::WorkflowState),
    (is_user_like, EntityKind::User),
    (is_cycle_like, EntityKind::Cycle),
    (is_label_like, EntityKind::Label),
];

/// Classifies a record for export. Returns `None` for unknown shapes.
pub fn classify(record: &Record) -> Option<EntityKind> {
    first_match(&RULES, record)
}

/// Classifies a record for discovery reports.
pub fn detect(record: &Record) -> Option<EntityKind> {
    first_match(&DISCOVERY_RULES, record)
}

fn first_match(rules: &[(Predicate, EntityKind)], record: &Record) -> Option<EntityKind> {
    rules.iter().find(|(matches, _)| matches(record)).map(|(_, kind)| *kind)
}

/// Project: `{name, teamIds, statusId, organizationId}` with `teamIds` an array.
pub fn is_project(record: &Record) -> bool {
    has_keys(record, &["name", "teamIds", "statusId", "organizationId"])
        && matches!(record.get("teamIds"), Some(Value::Array(_)))
}

/// Team: `{key, name}` with `key` a short all-uppercase alphabetic code.
pub fn is_team(record: &Record) -> bool {
    if !has_keys(record, &["key", "name"]) {
        return false;
    }
    match record.get("key") {
        Some(Value::String(key)) => is_team_key(key),
        _ => false,
    }
}

fn is_team_key(key: &str) -> bool {
    !key.is_empty()
        && key.chars().count() <= 10
        && key.chars().all(char::is_alphabetic)
        && key.chars().any(char::is_uppercase)
        && !key.chars().any(char::is_lowercase)
}

/// Issue: `{number, teamId, title}`.
pub fn is_issue(record: &Record) -> bool {
    has_keys(record, &["number", "teamId", "title"])
}

/// Workflow state: `{name, type, color, teamId}` with a known `type`.
pub fn is_workflow_state(record: &Record) -> bool {
    has_keys(record, &["name", "type", "color", "teamId"])
        && record.get("type").and_then(Value::as_str).is_some_and(|t| t.parse::<StateType>().is_ok())
}

/// User: `{name, email, id}` with a string `email`.
pub fn is_user(record: &Record) -> bool {
    record.contains_key("id") && is_user_like(record)
}

/// Cycle: `{number, startsAt, endsAt, teamId}`.
pub fn is_cycle(record: &Record) -> bool {
    record.contains_key("teamId") && is_cycle_like(record)
}

/// Label: `{name, color, isGroup, id}` with a `#` color of at most 10 chars.
pub fn is_label(record: &Record) -> bool {
    record.contains_key("id") && is_label_like(record)
}

fn is_user_like(record: &Record) -> bool {
    has_keys(record, &["name", "email"]) && matches!(record.get("email"), Some(Value::String(_)))
}

fn is_cycle_like(record: &Record) -> bool {
    has_keys(record, &["number", "startsAt", "endsAt"])
}

fn is_label_like(record: &Record) -> bool {
    if !has_keys(record, &["name", "color", "isGroup"]) {
        return false;
    }
    match record.get("color") {
        Some(Value::String(color)) => color.starts_with('#') && color.chars().count() <= 10,
        _ => false,
    }
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
