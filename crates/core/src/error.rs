// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for ts-core operations.

use thiserror::Error;

/// All possible errors that can occur in ts-core operations.
///
/// Parsing a task document never fails; errors only arise when decoding
/// tracker output.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unexpected tracker output: {0}")]
    UnexpectedShape(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for ts-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
