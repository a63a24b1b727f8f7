// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use ts_core::Document;

use crate::config::Config;
use crate::error::Result;
use crate::sync::{reverse_sync, ReverseSummary};
use crate::tracker::Tracker;

use super::{read_document, write_document};

/// Reverse sync into the document at `path`. In dry-run the file is left as is.
pub fn run(
    path: &Path,
    tracker: &dyn Tracker,
    config: &Config,
    dry_run: bool,
) -> Result<ReverseSummary> {
    let original = read_document(path)?;
    let mut doc = Document::parse_with_prefix(&original, &config.id_prefix);
    let summary = reverse_sync(&mut doc, tracker, config)?;
    if dry_run {
        if doc.render() != original {
            println!("[dry-run] would update {}", path.display());
        }
    } else {
        write_document(path, &original, &doc)?;
    }
    println!("{}", summary);
    Ok(summary)
}

#[cfg(test)]
#[path = "reverse_tests.rs"]
mod tests;
