// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Joins across entity tables.
//!
//! Entities refer to each other by id only. Every lookup here fails open:
//! a dangling reference is treated as "no information", never as an error.

use serde_json::Value;

use crate::classify::StateType;
use crate::record::{non_empty_str, str_field, Record};
use crate::tables::{EntityTable, EntityTables};

/// Team name used when a project's primary team cannot be resolved.
pub const UNKNOWN_TEAM: &str = "Unknown";

/// Default number of issue titles kept per project.
pub const DEFAULT_RECENT_ISSUE_LIMIT: usize = 10;

/// A project's primary team, resolved against the team table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimaryTeam<'a> {
    /// First entry of `teamIds`, if any.
    pub id: Option<&'a str>,
    /// The team's name, or [`UNKNOWN_TEAM`].
    pub name: &'a str,
}

/// Resolves the primary (first listed) team of a project.
pub fn primary_team<'a>(project: &'a Record, teams: &'a EntityTable) -> PrimaryTeam<'a> {
    let id = project
        .get("teamIds")
        .and_then(Value::as_array)
        .and_then(|ids| ids.first())
        .and_then(Value::as_str);

    let name = id
        .and_then(|id| teams.get(id))
        .and_then(|team| team.get("name"))
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_TEAM);

    PrimaryTeam { id, name }
}

/// Returns true unless the issue's state is known to be completed or canceled.
///
/// No `stateId`, a dangling one, or a state with an unrecognized type all
/// count as active.
pub fn is_active(issue: &Record, states: &EntityTable) -> bool {
    let Some(state_id) = non_empty_str(issue, "stateId") else {
        return true;
    };
    let state_type = states.get(state_id).map(|state| str_field(state, "type")).unwrap_or("");
    !state_type.parse::<StateType>().is_ok_and(|t| t.is_terminal())
}

/// Titles of the project's most recently updated active issues.
///
/// Issues are ordered by `updatedAt` descending, compared as strings. Ties
/// keep table order. At most `limit` titles are returned.
pub fn recent_issue_titles(project_id: &str, tables: &EntityTables, limit: usize) -> Vec<String> {
    let mut candidates: Vec<(&str, &str)> = tables
        .issues
        .values()
        .filter(|issue| !project_id.is_empty() && str_field(issue, "projectId") == project_id)
        .filter(|issue| is_active(issue, &tables.states))
        .filter_map(|issue| {
            non_empty_str(issue, "title").map(|title| (str_field(issue, "updatedAt"), title))
        })
        .collect();

    candidates.sort_by(|a, b| b.0.cmp(a.0));
    candidates.into_iter().take(limit).map(|(_, title)| title.to_string()).collect()
}

/// Returns true if the cycle ends strictly after `now`.
///
/// Both sides are compared as strings, which orders ISO-8601 timestamps
/// correctly when they share a format. Cycles without `endsAt` never qualify.
pub fn is_upcoming(cycle: &Record, now: &str) -> bool {
    non_empty_str(cycle, "endsAt").is_some_and(|ends_at| ends_at > now)
}

/// Cycles that have not yet ended, in table order.
pub fn upcoming_cycles<'a>(
    cycles: &'a EntityTable,
    now: &'a str,
) -> impl Iterator<Item = &'a Record> + 'a {
    cycles.values().filter(move |cycle| is_upcoming(cycle, now))
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
