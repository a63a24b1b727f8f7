// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use ts_core::Document;

use crate::config::Config;
use crate::error::Result;
use crate::sync::{forward_sync, ForwardSummary};
use crate::tracker::Tracker;

use super::{read_document, write_document};

/// Forward sync of the document at `path`. In dry-run the file is left as is.
pub fn run(
    path: &Path,
    tracker: &dyn Tracker,
    config: &Config,
    dry_run: bool,
) -> Result<ForwardSummary> {
    let original = read_document(path)?;
    let mut doc = Document::parse_with_prefix(&original, &config.id_prefix);
    let summary = forward_sync(&mut doc, tracker, config)?;
    if !dry_run {
        write_document(path, &original, &doc)?;
    }
    println!();
    println!("{}", summary);
    Ok(summary)
}

#[cfg(test)]
#[path = "forward_tests.rs"]
mod tests;
