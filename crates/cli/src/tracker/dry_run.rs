// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Dry-run tracker wrapper.

use std::cell::Cell;

use ts_core::ExternalIssue;

use crate::config::Config;
use crate::error::Result;

use super::{Invocation, NewIssue, Outcome, Tracker};

/// Wraps a tracker so that mutations are printed instead of executed.
///
/// Reads go to the wrapped tracker, as does `import`, which only rebuilds
/// the tracker's query cache. Creates return placeholder ids
/// (`dry-run-1`, `dry-run-2`, ...) so the rest of a run can proceed.
pub struct DryRun<T> {
    inner: T,
    program: String,
    correspondence_flag: String,
    next_id: Cell<usize>,
}

impl<T: Tracker> DryRun<T> {
    pub fn new(inner: T, config: &Config) -> Self {
        DryRun {
            inner,
            program: config.binary.clone(),
            correspondence_flag: config.correspondence_flag(),
            next_id: Cell::new(0),
        }
    }

    pub fn into_inner(self) -> T {
        self.inner
    }

    fn print(&self, inv: &Invocation) -> Outcome {
        println!("[dry-run] {}", inv);
        Outcome::Simulated
    }
}

impl<T: Tracker> Tracker for DryRun<T> {
    fn list(&self) -> Result<Vec<ExternalIssue>> {
        self.inner.list()
    }

    fn show(&self, id: &str) -> Result<Option<ExternalIssue>> {
        self.inner.show(id)
    }

    fn create(&self, issue: &NewIssue) -> Result<String> {
        self.print(&Invocation::create(
            &self.program,
            issue,
            &self.correspondence_flag,
        ));
        let n = self.next_id.get() + 1;
        self.next_id.set(n);
        Ok(format!("dry-run-{}", n))
    }

    fn close(&self, id: &str) -> Result<Outcome> {
        Ok(self.print(&Invocation::close(&self.program, id)))
    }

    fn add_dependency(&self, blocked: &str, blocker: &str) -> Result<Outcome> {
        Ok(self.print(&Invocation::add_dependency(
            &self.program,
            blocked,
            blocker,
        )))
    }

    fn import(&self) -> Result<Outcome> {
        self.inner.import()
    }

    fn flush(&self) -> Result<Outcome> {
        Ok(self.print(&Invocation::flush(&self.program)))
    }

    fn is_initialized(&self) -> Result<bool> {
        self.inner.is_initialized()
    }

    fn init(&self) -> Result<Outcome> {
        Ok(self.print(&Invocation::init(&self.program)))
    }
}

#[cfg(test)]
#[path = "dry_run_tests.rs"]
mod tests;
