// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod forward;
pub mod reverse;
pub mod status;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;

use std::fs;
use std::path::Path;

use ts_core::Document;

use crate::error::{Error, Result};

/// Reads the tasks document, failing if the path is not a regular file.
pub fn read_document(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::DocumentNotFound(path.display().to_string()));
    }
    Ok(fs::read_to_string(path)?)
}

/// Rewrites the document in one write, only if its rendering changed.
///
/// Returns true if the file was written.
pub fn write_document(path: &Path, original: &str, doc: &Document) -> Result<bool> {
    let rendered = doc.render();
    if rendered == original {
        tracing::debug!(path = %path.display(), "document unchanged");
        return Ok(false);
    }
    fs::write(path, rendered)?;
    tracing::debug!(path = %path.display(), "document written");
    Ok(true)
}
