// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync configuration.
//!
//! Configuration is optional and read from `.tasksync.toml`, found by walking
//! up from the directory containing the tasks file. Every key has a default
//! matching the beads (`bd`) CLI:
//!
//! ```toml
//! binary = "bd"
//! id_prefix = "bd"
//! correspondence_field = "spec_id"
//! phase_issue_type = "epic"
//! discovered_label = "discovered"
//! discovered_prefix = "DISCOVERED: "
//! discovered_heading = "Discovered Work"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::env;
use crate::error::{Error, Result};

const CONFIG_FILE_NAME: &str = ".tasksync.toml";

/// Sync configuration stored in `.tasksync.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tracker executable, looked up on `PATH` unless it contains a path separator.
    pub binary: String,
    /// Prefix of tracker ids. Only `(<id_prefix>-...)` is read as a marker.
    pub id_prefix: String,
    /// Issue field holding the document key (`phase-<n>` or the task ordinal).
    pub correspondence_field: String,
    /// Issue type used for phase grouping issues.
    pub phase_issue_type: String,
    /// Label marking issues filed outside the document.
    pub discovered_label: String,
    /// Title prefix stripped from discovered issues when rendered.
    pub discovered_prefix: String,
    /// Heading of the section discovered work is appended under.
    pub discovered_heading: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            binary: "bd".to_string(),
            id_prefix: ts_core::DEFAULT_ID_PREFIX.to_string(),
            correspondence_field: "spec_id".to_string(),
            phase_issue_type: "epic".to_string(),
            discovered_label: "discovered".to_string(),
            discovered_prefix: "DISCOVERED: ".to_string(),
            discovered_heading: "Discovered Work".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the given file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))?;
        if config.correspondence_field.trim().is_empty() {
            return Err(Error::Config(
                "correspondence_field cannot be empty".to_string(),
            ));
        }
        if config.id_prefix.is_empty()
            || !config.id_prefix.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(Error::Config(format!(
                "id_prefix must be alphanumeric, got '{}'",
                config.id_prefix
            )));
        }
        Ok(config)
    }

    /// Loads the configuration that applies to a tasks file, falling back to
    /// defaults when no `.tasksync.toml` exists.
    pub fn for_document(document: &Path) -> Result<Self> {
        let start = document
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        match find_config(start) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Config::load(&path)
            }
            None => Ok(Config::default()),
        }
    }

    /// Applies environment overrides (`TASKSYNC_BINARY`).
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(binary) = env::tracker_binary() {
            self.binary = binary;
        }
        self
    }

    /// Command-line flag carrying the correspondence field (`spec_id` -> `--spec-id`).
    pub fn correspondence_flag(&self) -> String {
        format!("--{}", self.correspondence_field.replace('_', "-"))
    }
}

/// Find `.tasksync.toml` by walking up from `start`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start
        .canonicalize()
        .unwrap_or_else(|_| start.to_path_buf());
    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
