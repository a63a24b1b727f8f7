// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tracker CLI invocations.

use std::fmt;

use super::NewIssue;

/// A single call to the tracker CLI: program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    fn new(program: &str, args: &[&str]) -> Self {
        Invocation {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn list(program: &str) -> Self {
        Self::new(program, &["list", "--json"])
    }

    pub fn show(program: &str, id: &str) -> Self {
        Self::new(program, &["show", id, "--json"])
    }

    /// `create <title> [--type T] [--labels a,b] [--parent P] [--<field> V] --silent`
    pub fn create(program: &str, issue: &NewIssue, correspondence_flag: &str) -> Self {
        let mut inv = Self::new(program, &["create", &issue.title]);
        if let Some(ref issue_type) = issue.issue_type {
            inv.args.push("--type".to_string());
            inv.args.push(issue_type.clone());
        }
        if !issue.labels.is_empty() {
            inv.args.push("--labels".to_string());
            inv.args.push(issue.labels.join(","));
        }
        if let Some(ref parent) = issue.parent {
            inv.args.push("--parent".to_string());
            inv.args.push(parent.clone());
        }
        if let Some(ref key) = issue.correspondence {
            inv.args.push(correspondence_flag.to_string());
            inv.args.push(key.clone());
        }
        inv.args.push("--silent".to_string());
        inv
    }

    pub fn close(program: &str, id: &str) -> Self {
        Self::new(program, &["close", id])
    }

    pub fn add_dependency(program: &str, blocked: &str, blocker: &str) -> Self {
        Self::new(program, &["dep", "add", blocked, "--blocked-by", blocker])
    }

    pub fn import(program: &str) -> Self {
        Self::new(program, &["sync", "--import-only"])
    }

    pub fn flush(program: &str) -> Self {
        Self::new(program, &["sync"])
    }

    pub fn init(program: &str) -> Self {
        Self::new(program, &["init"])
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Quote an argument for display if it would not survive a shell as-is.
fn quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_.,:/=@+".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("\"{}\"", arg.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "invocation_tests.rs"]
mod tests;
