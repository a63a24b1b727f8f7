// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tracker backed by the beads `bd` CLI.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use ts_core::ExternalIssue;

use crate::config::Config;
use crate::env;
use crate::error::{Error, Result};

use super::{Invocation, NewIssue, Outcome, Tracker};

/// Captured result of one CLI call.
struct Captured {
    success: bool,
    stdout: String,
    stderr: String,
    status: String,
}

impl Captured {
    /// Best description of why a call failed.
    fn reason(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.status.clone()
        } else {
            stderr.to_string()
        }
    }
}

/// Runs tracker commands through the `bd` executable.
#[derive(Debug, Clone)]
pub struct BdCli {
    /// Name as configured, used in rendered commands.
    name: String,
    /// Resolved executable path.
    executable: PathBuf,
    correspondence_flag: String,
}

impl BdCli {
    /// Locates the configured tracker binary.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TrackerMissing`] if the binary cannot be found, so a
    /// run never starts against a tracker it cannot reach.
    pub fn locate(config: &Config) -> Result<Self> {
        let executable = locate_binary(&config.binary, env::search_path()).ok_or_else(|| {
            Error::TrackerMissing {
                binary: config.binary.clone(),
            }
        })?;
        tracing::debug!(executable = %executable.display(), "located tracker");
        Ok(BdCli {
            name: config.binary.clone(),
            executable,
            correspondence_flag: config.correspondence_flag(),
        })
    }

    fn run(&self, inv: &Invocation) -> Result<Captured> {
        tracing::debug!(command = %inv, "running tracker");
        let output = Command::new(&self.executable)
            .args(inv.args())
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => Error::TrackerMissing {
                    binary: self.name.clone(),
                },
                _ => Error::TrackerSpawn {
                    binary: self.name.clone(),
                    reason: e.to_string(),
                },
            })?;

        let captured = Captured {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status.to_string(),
        };
        if !captured.success {
            tracing::debug!(command = %inv, reason = %captured.reason(), "tracker command failed");
        }
        Ok(captured)
    }

    fn best_effort(&self, inv: Invocation) -> Result<Outcome> {
        let captured = self.run(&inv)?;
        if captured.success {
            Ok(Outcome::Applied)
        } else {
            Ok(Outcome::Rejected {
                reason: captured.reason(),
            })
        }
    }
}

impl Tracker for BdCli {
    fn list(&self) -> Result<Vec<ExternalIssue>> {
        let captured = self.run(&Invocation::list(&self.name))?;
        if !captured.success {
            return Ok(Vec::new());
        }
        match ExternalIssue::list_from_json(&captured.stdout) {
            Ok(issues) => Ok(issues),
            Err(e) => {
                tracing::warn!(error = %e, "could not decode issue list");
                Ok(Vec::new())
            }
        }
    }

    fn show(&self, id: &str) -> Result<Option<ExternalIssue>> {
        let captured = self.run(&Invocation::show(&self.name, id))?;
        if !captured.success {
            return Ok(None);
        }
        match ExternalIssue::one_from_json(&captured.stdout) {
            Ok(issue) => Ok(issue),
            Err(e) => {
                tracing::warn!(%id, error = %e, "could not decode issue");
                Ok(None)
            }
        }
    }

    fn create(&self, issue: &NewIssue) -> Result<String> {
        let inv = Invocation::create(&self.name, issue, &self.correspondence_flag);
        let captured = self.run(&inv)?;
        if !captured.success {
            return Err(Error::CreateFailed {
                title: issue.title.clone(),
                reason: captured.reason(),
            });
        }
        // --silent prints only the new id; tolerate leading chatter.
        captured
            .stdout
            .lines()
            .map(str::trim)
            .rfind(|line| !line.is_empty())
            .map(str::to_string)
            .ok_or_else(|| Error::CreateFailed {
                title: issue.title.clone(),
                reason: "tracker returned no issue id".to_string(),
            })
    }

    fn close(&self, id: &str) -> Result<Outcome> {
        self.best_effort(Invocation::close(&self.name, id))
    }

    fn add_dependency(&self, blocked: &str, blocker: &str) -> Result<Outcome> {
        self.best_effort(Invocation::add_dependency(&self.name, blocked, blocker))
    }

    fn import(&self) -> Result<Outcome> {
        self.best_effort(Invocation::import(&self.name))
    }

    fn flush(&self) -> Result<Outcome> {
        self.best_effort(Invocation::flush(&self.name))
    }

    fn is_initialized(&self) -> Result<bool> {
        Ok(self.run(&Invocation::list(&self.name))?.success)
    }

    fn init(&self) -> Result<Outcome> {
        self.best_effort(Invocation::init(&self.name))
    }
}

/// Resolve a binary name against `PATH`.
///
/// Names containing a path separator are checked directly.
pub fn locate_binary(name: &str, search_path: Option<OsString>) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    let direct = Path::new(name);
    if direct.components().count() > 1 {
        return is_executable(direct).then(|| direct.to_path_buf());
    }
    let search_path = search_path?;
    std::env::split_paths(&search_path)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .is_ok_and(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
#[path = "bd_tests.rs"]
mod tests;
