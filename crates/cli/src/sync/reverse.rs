// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tracker to document sync.

use std::collections::HashSet;
use std::fmt;

use ts_core::{
    is_marker, Checkbox, DiscoveredEntry, Document, ExternalIssue, IssueStatus, LineKind,
};

use crate::config::Config;
use crate::error::Result;
use crate::tracker::{note, Tracker};

/// Counts reported at the end of a reverse sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseSummary {
    pub checkboxes_updated: usize,
    pub discovered_added: usize,
}

impl fmt::Display for ReverseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reverse sync complete:")?;
        writeln!(f, "  Checkboxes updated: {}", self.checkboxes_updated)?;
        write!(f, "  Discovered work added: {}", self.discovered_added)
    }
}

/// Checkbox state an issue status maps to, if any.
fn checkbox_for(status: &IssueStatus) -> Option<Checkbox> {
    match status {
        IssueStatus::Closed => Some(Checkbox::Done),
        IssueStatus::Open => Some(Checkbox::Pending),
        IssueStatus::Other(_) => None,
    }
}

/// Copies tracker status onto linked checkboxes and appends issues filed
/// outside the document under the discovered-work heading.
pub fn reverse_sync(
    doc: &mut Document,
    tracker: &dyn Tracker,
    config: &Config,
) -> Result<ReverseSummary> {
    note("sync --import-only", tracker.import()?);

    let mut updates = Vec::new();
    for (index, line) in doc.lines().iter().enumerate() {
        let (id, current) = match &line.kind {
            LineKind::Task(task) => match task.marker {
                Some(ref id) => (id, task.checkbox),
                None => continue,
            },
            LineKind::Discovered(entry) => (&entry.id, entry.checkbox),
            _ => continue,
        };
        let Some(issue) = tracker.show(id)? else {
            tracing::warn!(%id, "linked issue not found");
            continue;
        };
        match checkbox_for(&issue.status) {
            Some(wanted) if wanted != current => updates.push((index, wanted)),
            Some(_) => {}
            None => tracing::debug!(%id, status = %issue.status, "status leaves checkbox as is"),
        }
    }

    let mut summary = ReverseSummary::default();
    for (index, checkbox) in updates {
        if doc.set_checkbox(index, checkbox) {
            summary.checkboxes_updated += 1;
        }
    }

    let entries = discovered_entries(doc, tracker.list()?, config);
    summary.discovered_added = entries.len();
    doc.append_discovered(&config.discovered_heading, &entries);

    Ok(summary)
}

/// Selects discovered issues that are not yet in the document.
fn discovered_entries(
    doc: &Document,
    issues: Vec<ExternalIssue>,
    config: &Config,
) -> Vec<DiscoveredEntry> {
    let mut known: HashSet<String> = doc.markers().into_iter().map(str::to_string).collect();
    let mut entries = Vec::new();
    for issue in issues {
        if !issue.has_label(&config.discovered_label)
            || issue.field(&config.correspondence_field).is_some()
            || !known.insert(issue.id.clone())
        {
            continue;
        }
        if !is_marker(&issue.id, &config.id_prefix) {
            tracing::debug!(id = %issue.id, "discovered issue id does not match id_prefix");
            continue;
        }
        let title = issue
            .title
            .strip_prefix(config.discovered_prefix.as_str())
            .unwrap_or(&issue.title)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        entries.push(DiscoveredEntry {
            checkbox: match issue.status {
                IssueStatus::Closed => Checkbox::Done,
                _ => Checkbox::Pending,
            },
            title,
            id: issue.id,
        });
    }
    entries
}

#[cfg(test)]
#[path = "reverse_tests.rs"]
mod tests;
