// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use ts_core::Document;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::Result;
use crate::status::{status_report, StatusReport};
use crate::tracker::Tracker;

use super::read_document;

pub fn run(
    path: &Path,
    tracker: &dyn Tracker,
    config: &Config,
    format: OutputFormat,
) -> Result<StatusReport> {
    let doc = Document::parse_with_prefix(&read_document(path)?, &config.id_prefix);
    let report = status_report(&doc, &path.display().to_string(), tracker)?;
    match format {
        OutputFormat::Text => println!("{}", report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(report)
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
