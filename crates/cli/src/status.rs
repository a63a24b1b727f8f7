// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only sync status report.

use std::fmt;

use serde::Serialize;
use ts_core::{Document, ExternalIssue, IssueStatus};

use crate::error::Result;
use crate::tracker::{note, Tracker};

/// Task counts taken from the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskCounts {
    pub total: usize,
    pub completed: usize,
    /// Tasks carrying an inline marker.
    pub linked: usize,
    pub unlinked: usize,
}

/// Issue counts taken from the tracker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrackerCounts {
    pub total: usize,
    pub open: usize,
    pub closed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub document: String,
    pub tasks: TaskCounts,
    pub tracker: TrackerCounts,
}

impl TaskCounts {
    pub fn from_document(doc: &Document) -> Self {
        doc.tasks().fold(TaskCounts::default(), |mut counts, (_, task)| {
            counts.total += 1;
            if task.checkbox.is_done() {
                counts.completed += 1;
            }
            if task.marker.is_some() {
                counts.linked += 1;
            } else {
                counts.unlinked += 1;
            }
            counts
        })
    }
}

impl TrackerCounts {
    pub fn from_issues(issues: &[ExternalIssue]) -> Self {
        TrackerCounts {
            total: issues.len(),
            open: issues
                .iter()
                .filter(|i| i.status == IssueStatus::Open)
                .count(),
            closed: issues
                .iter()
                .filter(|i| i.status == IssueStatus::Closed)
                .count(),
        }
    }
}

/// Builds the status report. Nothing is written anywhere.
pub fn status_report(doc: &Document, name: &str, tracker: &dyn Tracker) -> Result<StatusReport> {
    note("sync --import-only", tracker.import()?);
    let issues = tracker.list()?;
    Ok(StatusReport {
        document: name.to_string(),
        tasks: TaskCounts::from_document(doc),
        tracker: TrackerCounts::from_issues(&issues),
    })
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sync status for: {}", self.document)?;
        writeln!(f, "  Total tasks: {}", self.tasks.total)?;
        writeln!(f, "  Completed:   {}", self.tasks.completed)?;
        writeln!(f, "  Linked:      {}", self.tasks.linked)?;
        writeln!(f, "  Unlinked:    {}", self.tasks.unlinked)?;
        writeln!(f)?;
        writeln!(f, "Tracker:")?;
        writeln!(f, "  Total issues: {}", self.tracker.total)?;
        writeln!(f, "  Open:         {}", self.tracker.open)?;
        write!(f, "  Closed:       {}", self.tracker.closed)
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
