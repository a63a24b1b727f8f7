// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Which way a run moves information.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Document to tracker.
    Forward,
    /// Tracker to document.
    Reverse,
    /// Report only.
    Status,
}

#[derive(Parser, Debug)]
#[command(name = "tasksync")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sync a tasks.md checklist with the beads (bd) issue tracker")]
#[command(
    long_about = "Sync a tasks.md checklist with the beads (bd) issue tracker.\n\n\
    Forward sync (the default) creates an issue for every phase and task that is not yet \
    linked and writes the new ids back into the document. Reverse sync copies issue status \
    onto checkboxes and appends issues filed outside the document."
)]
#[command(after_help = "\
Examples:
  tasksync specs/tasks.md               Create issues for unlinked tasks
  tasksync specs/tasks.md --dry-run     Print the tracker commands instead
  tasksync specs/tasks.md --reverse     Update checkboxes from the tracker
  tasksync specs/tasks.md --status      Show sync status
  tasksync specs/tasks.md --status -o json

Environment:
  TASKSYNC_BINARY   Tracker executable (default: bd)
  TASKSYNC_LOG      Log filter, e.g. debug (default: warn)")]
pub struct Cli {
    /// Path to the tasks document
    #[arg(value_name = "tasks-file")]
    pub tasks_file: PathBuf,

    /// Update the document from the tracker
    #[arg(long, conflicts_with = "status")]
    pub reverse: bool,

    /// Show sync status without changing anything
    #[arg(long)]
    pub status: bool,

    /// Print tracker commands instead of running them; the document is not written
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for --status
    #[arg(long, short = 'o', value_enum, default_value = "text")]
    pub output: OutputFormat,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.status {
            Mode::Status
        } else if self.reverse {
            Mode::Reverse
        } else {
            Mode::Forward
        }
    }
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
