// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Identity resolution between document entries and tracker issues.
//!
//! An entry resolves, in order of precedence, through:
//! 1. its inline marker, which is authoritative and costs no tracker call
//! 2. a lookup of its correspondence key in the tracker's issue list, which
//!    is fetched at most once per run
//! 3. nothing, in which case the entry is eligible for creation

use std::collections::HashMap;

use crate::error::Result;
use crate::tracker::Tracker;

/// How an entry was matched to an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The document carried the id inline.
    Marker(String),
    /// The tracker holds an issue with the entry's correspondence key.
    Lookup(String),
    Unlinked,
}

impl Resolution {
    pub fn id(&self) -> Option<&str> {
        match self {
            Resolution::Marker(id) | Resolution::Lookup(id) => Some(id),
            Resolution::Unlinked => None,
        }
    }
}

/// Resolves correspondence keys against a tracker, caching its issue list.
pub struct Resolver<'a> {
    tracker: &'a dyn Tracker,
    field: String,
    index: Option<HashMap<String, String>>,
}

impl<'a> Resolver<'a> {
    /// `field` names the issue field holding correspondence keys.
    pub fn new(tracker: &'a dyn Tracker, field: &str) -> Self {
        Resolver {
            tracker,
            field: field.to_string(),
            index: None,
        }
    }

    pub fn resolve(&mut self, marker: Option<&str>, key: &str) -> Result<Resolution> {
        if let Some(id) = marker {
            return Ok(Resolution::Marker(id.to_string()));
        }
        Ok(match self.index()?.get(key) {
            Some(id) => Resolution::Lookup(id.clone()),
            None => Resolution::Unlinked,
        })
    }

    /// Records an issue created during this run so later lookups find it.
    pub fn record(&mut self, key: &str, id: &str) -> Result<()> {
        self.index()?.insert(key.to_string(), id.to_string());
        Ok(())
    }

    fn index(&mut self) -> Result<&mut HashMap<String, String>> {
        if self.index.is_none() {
            let mut index = HashMap::new();
            for issue in self.tracker.list()? {
                if let Some(key) = issue.field(&self.field) {
                    // The first issue carrying a key wins.
                    index
                        .entry(key.to_string())
                        .or_insert_with(|| issue.id.clone());
                }
            }
            tracing::debug!(keys = index.len(), "indexed tracker issues");
            self.index = Some(index);
        }
        Ok(self.index.get_or_insert_with(HashMap::new))
    }
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
