// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory tracker for engine tests.

use std::cell::{Cell, RefCell};

use serde_json::Value;
use ts_core::{ExternalIssue, IssueStatus};

use crate::error::{Error, Result};

use super::{NewIssue, Outcome, Tracker};

/// A tracker that keeps issues in memory and records every call.
#[derive(Debug, Default)]
pub struct FakeTracker {
    issues: RefCell<Vec<ExternalIssue>>,
    calls: RefCell<Vec<String>>,
    dependencies: RefCell<Vec<(String, String)>>,
    next_id: Cell<usize>,
    initialized: Cell<bool>,
    fail_create: bool,
    reject_dependencies: bool,
}

impl FakeTracker {
    pub fn new() -> Self {
        FakeTracker {
            initialized: Cell::new(true),
            ..FakeTracker::default()
        }
    }

    /// A tracker whose database has not been created yet.
    pub fn uninitialized() -> Self {
        FakeTracker::default()
    }

    /// Fails every `create` call.
    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Rejects every `add_dependency` call.
    pub fn rejecting_dependencies(mut self) -> Self {
        self.reject_dependencies = true;
        self
    }

    /// Seeds an existing issue.
    pub fn with_issue(self, issue: ExternalIssue) -> Self {
        self.issues.borrow_mut().push(issue);
        self
    }

    pub fn issues(&self) -> Vec<ExternalIssue> {
        self.issues.borrow().clone()
    }

    pub fn issue(&self, id: &str) -> Option<ExternalIssue> {
        self.issues.borrow().iter().find(|i| i.id == id).cloned()
    }

    /// Recorded calls, one verb per call (e.g. `create T001`, `close bd-1`).
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, verb: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.split_whitespace().next() == Some(verb))
            .count()
    }

    /// Dependency edges as `(blocked, blocker)` pairs.
    pub fn dependencies(&self) -> Vec<(String, String)> {
        self.dependencies.borrow().clone()
    }

    pub fn set_status(&self, id: &str, status: IssueStatus) {
        if let Some(issue) = self.issues.borrow_mut().iter_mut().find(|i| i.id == id) {
            issue.status = status;
        }
    }

    fn log(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

/// Builds an issue record for seeding a [`FakeTracker`].
pub fn issue(id: &str, title: &str, status: IssueStatus) -> ExternalIssue {
    ExternalIssue {
        id: id.to_string(),
        title: title.to_string(),
        status,
        ..ExternalIssue::default()
    }
}

/// Like [`issue`], with a `spec_id` correspondence key.
pub fn keyed_issue(id: &str, key: &str, status: IssueStatus) -> ExternalIssue {
    let mut issue = issue(id, key, status);
    issue
        .fields
        .insert("spec_id".to_string(), Value::String(key.to_string()));
    issue
}

impl Tracker for FakeTracker {
    fn list(&self) -> Result<Vec<ExternalIssue>> {
        self.log("list".to_string());
        Ok(self.issues())
    }

    fn show(&self, id: &str) -> Result<Option<ExternalIssue>> {
        self.log(format!("show {}", id));
        Ok(self.issue(id))
    }

    fn create(&self, new: &NewIssue) -> Result<String> {
        self.log(format!(
            "create {}",
            new.correspondence.as_deref().unwrap_or(&new.title)
        ));
        if self.fail_create {
            return Err(Error::CreateFailed {
                title: new.title.clone(),
                reason: "database locked".to_string(),
            });
        }
        let n = self.next_id.get() + 1;
        self.next_id.set(n);
        let id = format!("bd-{}", n);

        let mut created = issue(&id, &new.title, IssueStatus::Open);
        created.labels = Some(new.labels.clone());
        created.parent = new.parent.clone();
        if let Some(ref key) = new.correspondence {
            created
                .fields
                .insert("spec_id".to_string(), Value::String(key.clone()));
        }
        if let Some(ref issue_type) = new.issue_type {
            created
                .fields
                .insert("issue_type".to_string(), Value::String(issue_type.clone()));
        }
        self.issues.borrow_mut().push(created);
        Ok(id)
    }

    fn close(&self, id: &str) -> Result<Outcome> {
        self.log(format!("close {}", id));
        self.set_status(id, IssueStatus::Closed);
        Ok(Outcome::Applied)
    }

    fn add_dependency(&self, blocked: &str, blocker: &str) -> Result<Outcome> {
        self.log(format!("dep {} {}", blocked, blocker));
        if self.reject_dependencies {
            return Ok(Outcome::Rejected {
                reason: "cycle detected".to_string(),
            });
        }
        self.dependencies
            .borrow_mut()
            .push((blocked.to_string(), blocker.to_string()));
        Ok(Outcome::Applied)
    }

    fn import(&self) -> Result<Outcome> {
        self.log("import".to_string());
        Ok(Outcome::Applied)
    }

    fn flush(&self) -> Result<Outcome> {
        self.log("flush".to_string());
        Ok(Outcome::Applied)
    }

    fn is_initialized(&self) -> Result<bool> {
        Ok(self.initialized.get())
    }

    fn init(&self) -> Result<Outcome> {
        self.log("init".to_string());
        self.initialized.set(true);
        Ok(Outcome::Applied)
    }
}
