// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync engines between a task document and the issue tracker.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐  forward  ┌─────────────┐     ┌─────────────┐
//! │  Document   │──────────►│  Resolver   │────►│   Tracker   │
//! │ (tasks.md)  │◄──────────│  (marker /  │◄────│   (trait)   │
//! └─────────────┘  reverse  │   lookup)   │     └─────────────┘
//!                           └─────────────┘
//! ```
//!
//! Both engines work on an in-memory [`Document`](ts_core::Document); the
//! caller decides whether the result is written back. Forward sync creates
//! issues, closes checked tasks and adds dependency edges. Reverse sync
//! copies issue status onto checkboxes and appends discovered work.

mod forward;
mod reverse;

pub use forward::{forward_sync, ForwardSummary};
pub use reverse::{reverse_sync, ReverseSummary};
