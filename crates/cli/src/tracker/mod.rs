// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! External issue tracker adapter.
//!
//! This module provides:
//! - The [`Tracker`] trait, the small operation set the sync engine needs
//! - [`BdCli`], which runs the beads `bd` CLI as a blocking subprocess
//! - [`DryRun`], which wraps any tracker and only prints mutating commands
//! - [`Invocation`], the single rendering of a CLI call used for both
//!   execution and dry-run output
//!
//! Reads degrade to empty results when the tracker output cannot be decoded.
//! Mutations other than `create` are best-effort and report an [`Outcome`]
//! instead of failing the run.

pub mod bd;
pub mod dry_run;
pub mod invocation;
#[cfg(test)]
pub mod test_helpers;

pub use bd::BdCli;
pub use dry_run::DryRun;
pub use invocation::Invocation;

use ts_core::ExternalIssue;

use crate::error::Result;

/// Result of a best-effort tracker call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The tracker accepted the request.
    Applied,
    /// Dry-run: the request was printed, not sent.
    Simulated,
    /// The tracker refused the request (non-zero exit). The run continues.
    Rejected { reason: String },
}

impl Outcome {
    /// Returns true unless the tracker rejected the request.
    pub fn accepted(&self) -> bool {
        !matches!(self, Outcome::Rejected { .. })
    }
}

/// Fields for an issue to be created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewIssue {
    pub title: String,
    pub issue_type: Option<String>,
    pub labels: Vec<String>,
    pub parent: Option<String>,
    /// Value for the correspondence field (`phase-<n>` or a task ordinal).
    pub correspondence: Option<String>,
}

/// Operations the sync engine performs against the issue tracker.
pub trait Tracker {
    /// All issues (`list --json`).
    fn list(&self) -> Result<Vec<ExternalIssue>>;

    /// A single issue (`show <id> --json`), `None` if unknown or undecodable.
    fn show(&self, id: &str) -> Result<Option<ExternalIssue>>;

    /// Creates an issue and returns its identifier. Failure is fatal.
    fn create(&self, issue: &NewIssue) -> Result<String>;

    fn close(&self, id: &str) -> Result<Outcome>;

    /// Records that `blocked` cannot start until `blocker` is done.
    fn add_dependency(&self, blocked: &str, blocker: &str) -> Result<Outcome>;

    /// Rebuilds the tracker's query cache from its durable store
    /// (`sync --import-only`).
    fn import(&self) -> Result<Outcome>;

    /// Flushes pending changes to the durable store (`sync`).
    fn flush(&self) -> Result<Outcome>;

    /// Returns true if the tracker database answers queries.
    fn is_initialized(&self) -> Result<bool>;

    /// Creates the tracker database (`init`).
    fn init(&self) -> Result<Outcome>;
}

impl<T: Tracker + ?Sized> Tracker for &T {
    fn list(&self) -> Result<Vec<ExternalIssue>> {
        (**self).list()
    }

    fn show(&self, id: &str) -> Result<Option<ExternalIssue>> {
        (**self).show(id)
    }

    fn create(&self, issue: &NewIssue) -> Result<String> {
        (**self).create(issue)
    }

    fn close(&self, id: &str) -> Result<Outcome> {
        (**self).close(id)
    }

    fn add_dependency(&self, blocked: &str, blocker: &str) -> Result<Outcome> {
        (**self).add_dependency(blocked, blocker)
    }

    fn import(&self) -> Result<Outcome> {
        (**self).import()
    }

    fn flush(&self) -> Result<Outcome> {
        (**self).flush()
    }

    fn is_initialized(&self) -> Result<bool> {
        (**self).is_initialized()
    }

    fn init(&self) -> Result<Outcome> {
        (**self).init()
    }
}

/// Initializes the tracker database unless it already answers queries.
///
/// Returns `None` when the database was already initialized.
pub fn ensure_initialized(tracker: &dyn Tracker) -> Result<Option<Outcome>> {
    if tracker.is_initialized()? {
        return Ok(None);
    }
    let outcome = tracker.init()?;
    if outcome == Outcome::Applied {
        println!("Initialized tracker database.");
    }
    Ok(Some(outcome))
}

/// Logs a rejected best-effort call and passes the outcome through.
pub fn note(action: &str, outcome: Outcome) -> Outcome {
    if let Outcome::Rejected { reason } = &outcome {
        tracing::warn!(%action, %reason, "tracker rejected request");
    }
    outcome
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
