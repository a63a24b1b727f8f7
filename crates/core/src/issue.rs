// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Issue records as reported by the external tracker.
//!
//! These are only ever built by decoding tracker JSON output; the sync engine
//! never constructs issues itself.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::{Error, Result};

/// Status of a tracker issue.
///
/// Only `open` and `closed` affect document checkboxes; everything else
/// (`in_progress`, `blocked`, `tombstone`, ...) is carried as [`IssueStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IssueStatus {
    Open,
    Closed,
    Other(String),
}

impl IssueStatus {
    pub fn as_str(&self) -> &str {
        match self {
            IssueStatus::Open => "open",
            IssueStatus::Closed => "closed",
            IssueStatus::Other(s) => s,
        }
    }
}

impl Default for IssueStatus {
    fn default() -> Self {
        IssueStatus::Other("unknown".to_string())
    }
}

impl From<String> for IssueStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "open" => IssueStatus::Open,
            "closed" => IssueStatus::Closed,
            _ => IssueStatus::Other(s),
        }
    }
}

impl From<IssueStatus> for String {
    fn from(status: IssueStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tracker issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalIssue {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: IssueStatus,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    #[serde(default)]
    pub parent: Option<String>,
    /// Remaining fields, including the correspondence field.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ExternalIssue {
    /// Returns a non-empty string field by name (e.g. `spec_id`).
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels
            .as_deref()
            .is_some_and(|labels| labels.iter().any(|l| l == label))
    }

    /// Decodes `list --json` output.
    ///
    /// Entries that are not valid issues are dropped rather than failing the
    /// whole list. Empty output decodes to an empty list.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }
        let value: Value = serde_json::from_str(json)?;
        let Value::Array(entries) = value else {
            return Err(Error::UnexpectedShape("expected a JSON array".to_string()));
        };
        Ok(entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect())
    }

    /// Decodes `show <id> --json` output, which may be a single object or a
    /// one-element array. Empty output decodes to `None`.
    pub fn one_from_json(json: &str) -> Result<Option<Self>> {
        if json.trim().is_empty() {
            return Ok(None);
        }
        let value: Value = serde_json::from_str(json)?;
        let value = match value {
            Value::Array(entries) => match entries.into_iter().next() {
                Some(first) => first,
                None => return Ok(None),
            },
            Value::Object(_) => value,
            _ => {
                return Err(Error::UnexpectedShape(
                    "expected a JSON object or array".to_string(),
                ))
            }
        };
        Ok(Some(serde_json::from_value(value)?))
    }
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
