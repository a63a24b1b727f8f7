// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the tsync library.
///
/// Only fatal conditions are errors. Tracker calls that are allowed to fail
/// (closing, dependency edges, cache syncs) report an
/// [`Outcome`](crate::tracker::Outcome) instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("tasks file not found: {0}")]
    DocumentNotFound(String),

    #[error("tracker CLI ({binary}) is not installed\n  hint: install beads (https://github.com/beads-project/beads) or set TASKSYNC_BINARY")]
    TrackerMissing { binary: String },

    #[error("failed to run {binary}: {reason}")]
    TrackerSpawn { binary: String, reason: String },

    #[error("failed to create issue '{title}': {reason}")]
    CreateFailed { title: String, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Core(#[from] ts_core::Error),
}

/// A specialized Result type for tsync operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
