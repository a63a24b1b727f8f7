// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the CLI are defined here
//! with typed accessor functions. The variable name constants are generated
//! by `build.rs` and live in the [`vars`] submodule.

use std::ffi::OsString;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Returns the value of `TASKSYNC_BINARY` if set and non-empty.
pub fn tracker_binary() -> Option<String> {
    std::env::var(vars::TASKSYNC_BINARY)
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// Returns the value of `TASKSYNC_LOG` if set.
pub fn log_filter() -> Option<String> {
    std::env::var(vars::TASKSYNC_LOG).ok()
}

/// Returns the raw `PATH` value used to locate the tracker binary.
pub fn search_path() -> Option<OsString> {
    std::env::var_os(vars::PATH)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
