// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tsync - Sync a tasks.md checklist with an external issue tracker.
//!
//! This crate provides the engine behind the `tasksync` CLI, which keeps a
//! markdown task document and the beads (`bd`) issue tracker in agreement.
//!
//! # Main Components
//!
//! - [`Tracker`](tracker::Tracker) - The operations needed from the issue tracker
//! - [`BdCli`](tracker::BdCli) - Tracker backed by the `bd` executable
//! - [`forward_sync`](sync::forward_sync) / [`reverse_sync`](sync::reverse_sync) - The sync engines
//! - [`Config`] - Optional `.tasksync.toml` settings
//! - [`Error`] - Error types for all operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use tsync::{Cli, run};
//! use clap::Parser;
//!
//! run(Cli::parse())?;
//! ```

mod cli;
mod commands;

pub mod config;
pub mod env;
pub mod error;
pub mod resolve;
pub mod status;
pub mod sync;
pub mod tracker;

pub use cli::{Cli, Mode, OutputFormat};
pub use config::Config;
pub use error::{Error, Result};

use tracker::{BdCli, DryRun, Tracker};

/// Runs the command described by the parsed arguments.
///
/// The tasks file and the tracker binary are both checked before anything
/// is sent to the tracker.
pub fn run(cli: Cli) -> Result<()> {
    if !cli.tasks_file.is_file() {
        return Err(Error::DocumentNotFound(cli.tasks_file.display().to_string()));
    }
    let config = Config::for_document(&cli.tasks_file)?.with_env_overrides();
    let bd = BdCli::locate(&config)?;

    if cli.dry_run && cli.mode() != Mode::Status {
        dispatch(&cli, &DryRun::new(bd, &config), &config)
    } else {
        dispatch(&cli, &bd, &config)
    }
}

fn dispatch(cli: &Cli, tracker: &dyn Tracker, config: &Config) -> Result<()> {
    let path = cli.tasks_file.as_path();
    match cli.mode() {
        Mode::Forward => commands::forward::run(path, tracker, config, cli.dry_run).map(|_| ()),
        Mode::Reverse => commands::reverse::run(path, tracker, config, cli.dry_run).map(|_| ()),
        Mode::Status => commands::status::run(path, tracker, config, cli.output).map(|_| ()),
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
