// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Document to tracker sync.

use std::collections::{HashMap, HashSet};
use std::fmt;

use ts_core::{Document, LineKind, Phase, Task};

use crate::config::Config;
use crate::error::Result;
use crate::resolve::{Resolution, Resolver};
use crate::tracker::{ensure_initialized, note, NewIssue, Tracker};

/// Counts reported at the end of a forward sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardSummary {
    pub phases_created: usize,
    pub tasks_created: usize,
    /// Tasks already linked by marker or found by correspondence key.
    pub tasks_skipped: usize,
    /// Dependency edges the tracker accepted.
    pub dependencies_added: usize,
    /// Markers written into the document.
    pub tasks_linked: usize,
    pub warnings: usize,
}

impl fmt::Display for ForwardSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Forward sync complete:")?;
        writeln!(f, "  Phases: {} created", self.phases_created)?;
        writeln!(
            f,
            "  Tasks: {} created, {} skipped (already exist)",
            self.tasks_created, self.tasks_skipped
        )?;
        write!(f, "  Dependencies: {} added", self.dependencies_added)?;
        if self.warnings > 0 {
            write!(f, "\n  Warnings: {}", self.warnings)?;
        }
        Ok(())
    }
}

/// Walk state for the phase currently being synced.
#[derive(Default)]
struct Cursor {
    phase: Option<Phase>,
    /// Id of the previous task in the current phase.
    previous: Option<String>,
}

impl Cursor {
    fn phase_label(&self) -> String {
        match &self.phase {
            Some(phase) => phase.label(),
            None => "phase:0".to_string(),
        }
    }

    fn parent(&self) -> Option<String> {
        self.phase.as_ref().and_then(|p| p.external_id.clone())
    }
}

/// Creates tracker issues for every unlinked phase and task, then links the
/// new ids into the document.
///
/// Running it again on its own output creates nothing.
pub fn forward_sync(
    doc: &mut Document,
    tracker: &dyn Tracker,
    config: &Config,
) -> Result<ForwardSummary> {
    if let Some(outcome) = ensure_initialized(tracker)? {
        note("init", outcome);
    }
    note("sync --import-only", tracker.import()?);

    let mut resolver = Resolver::new(tracker, &config.correspondence_field);
    let mut summary = ForwardSummary::default();
    let mut phase_ids: HashMap<String, String> = HashMap::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut links: Vec<(usize, String)> = Vec::new();
    let mut cursor = Cursor::default();

    for (index, line) in doc.lines().iter().enumerate() {
        match &line.kind {
            LineKind::PhaseHeading(heading) => {
                let mut phase = Phase::from_heading(heading);
                let key = phase.correspondence_key();
                let id = match resolver.resolve(None, &key)? {
                    Resolution::Unlinked => {
                        let id = tracker.create(&NewIssue {
                            title: phase.issue_title(),
                            issue_type: Some(config.phase_issue_type.clone()),
                            labels: vec![phase.label()],
                            parent: None,
                            correspondence: Some(key.clone()),
                        })?;
                        resolver.record(&key, &id)?;
                        summary.phases_created += 1;
                        println!("Phase {}: created ({})", phase.number, id);
                        id
                    }
                    Resolution::Marker(id) | Resolution::Lookup(id) => {
                        println!("Phase {}: already exists ({})", phase.number, id);
                        id
                    }
                };
                phase_ids.insert(phase_key(&phase.number).to_string(), id.clone());
                phase.external_id = Some(id);
                cursor = Cursor {
                    phase: Some(phase),
                    previous: None,
                };
            }
            LineKind::Task(task) => {
                if !seen.insert(task.ordinal.as_str()) {
                    eprintln!(
                        "warning: line {}: duplicate task {}, skipped",
                        index + 1,
                        task.ordinal
                    );
                    summary.warnings += 1;
                    continue;
                }
                let id = sync_task(tracker, &mut resolver, &cursor, task, &mut summary)?;
                if task.marker.is_none() {
                    links.push((index, id.clone()));
                }
                cursor.previous = Some(id);
            }
            LineKind::DependencyClause(clause) => {
                for token in &clause.unsupported {
                    eprintln!(
                        "warning: line {}: phase range '{}' is not supported, list phases individually",
                        index + 1,
                        token
                    );
                    summary.warnings += 1;
                }
            }
            _ => {}
        }
    }

    let mut applied = HashSet::new();
    for rule in doc.dependency_rules() {
        let edge = (
            phase_key(&rule.phase).to_string(),
            phase_key(&rule.depends_on).to_string(),
        );
        if !applied.insert(edge) {
            continue;
        }
        match (
            phase_ids.get(phase_key(&rule.phase)),
            phase_ids.get(phase_key(&rule.depends_on)),
        ) {
            (Some(blocked), Some(blocker)) => {
                let outcome = note("dep add", tracker.add_dependency(blocked, blocker)?);
                if outcome.accepted() {
                    summary.dependencies_added += 1;
                    println!("  Phase {} -> Phase {}", rule.phase, rule.depends_on);
                }
            }
            _ => {
                eprintln!(
                    "warning: phase {} depends on phase {}, which has no heading",
                    rule.phase, rule.depends_on
                );
                summary.warnings += 1;
            }
        }
    }

    for (index, id) in links {
        if doc.link_task(index, &id) {
            summary.tasks_linked += 1;
        } else {
            tracing::debug!(line = index + 1, %id, "id not written as a marker");
        }
    }

    note("sync", tracker.flush()?);
    Ok(summary)
}

/// Phase number without leading zeros, so `01` and `1` name the same phase.
fn phase_key(number: &str) -> &str {
    let trimmed = number.trim_start_matches('0');
    if trimmed.is_empty() && !number.is_empty() {
        "0"
    } else {
        trimmed
    }
}

/// Resolves or creates one task and returns its issue id.
fn sync_task(
    tracker: &dyn Tracker,
    resolver: &mut Resolver<'_>,
    cursor: &Cursor,
    task: &Task,
    summary: &mut ForwardSummary,
) -> Result<String> {
    match resolver.resolve(task.marker.as_deref(), &task.ordinal)? {
        Resolution::Marker(id) => {
            summary.tasks_skipped += 1;
            println!("  {}: already synced ({})", task.ordinal, id);
            Ok(id)
        }
        Resolution::Lookup(id) => {
            summary.tasks_skipped += 1;
            println!("  {}: found by correspondence key ({})", task.ordinal, id);
            Ok(id)
        }
        Resolution::Unlinked => {
            let mut labels = vec![cursor.phase_label()];
            if let Some(ref story) = task.user_story {
                labels.push(story.clone());
            }
            if task.parallel {
                labels.push("parallel".to_string());
            }
            let id = tracker.create(&NewIssue {
                title: task.issue_title(),
                issue_type: None,
                labels,
                parent: cursor.parent(),
                correspondence: Some(task.ordinal.clone()),
            })?;
            resolver.record(&task.ordinal, &id)?;
            summary.tasks_created += 1;

            if task.checkbox.is_done() {
                note("close", tracker.close(&id)?);
            }
            if !task.parallel {
                if let Some(ref previous) = cursor.previous {
                    let outcome = note("dep add", tracker.add_dependency(&id, previous)?);
                    if outcome.accepted() {
                        summary.dependencies_added += 1;
                    }
                }
            }
            println!("  {}: created ({})", task.ordinal, id);
            Ok(id)
        }
    }
}

#[cfg(test)]
#[path = "forward_tests.rs"]
mod tests;
