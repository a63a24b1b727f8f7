// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ts-core: Shared library for tasksync
//!
//! This crate provides the task document model and parser, and the issue
//! records decoded from the external tracker. It performs no I/O.

pub mod document;
pub mod error;
pub mod issue;

pub use document::{
    is_marker, Checkbox, DependencyClause, DependencyRule, DiscoveredEntry, Document, Line,
    LineKind, Phase, PhaseHeading, Task, DEFAULT_ID_PREFIX,
};
pub use error::{Error, Result};
pub use issue::{ExternalIssue, IssueStatus};
