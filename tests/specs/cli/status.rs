// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Status specs.

#![cfg(unix)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use common::*;

const TASKS: &str = "\
## Phase 1: Setup
- [X] T001 (bd-2) One
- [x] T002 Two
- [ ] T003 (bd-4) Three
";

fn seeded() -> Workspace {
    let ws = Workspace::new(TASKS);
    ws.seed("bd-1|phase-1|open|\"phase:1\"|Phase 1: Setup");
    ws.seed("bd-2|T001|closed|\"phase:1\"|T001: One");
    ws.seed("bd-4|T003|in_progress|\"phase:1\"|T003: Three");
    ws
}

#[test]
fn text_report() {
    let ws = seeded();
    ws.tasksync()
        .arg("--status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sync status for: tasks.md"))
        .stdout(predicate::str::contains("  Total tasks: 3"))
        .stdout(predicate::str::contains("  Completed:   2"))
        .stdout(predicate::str::contains("  Linked:      2"))
        .stdout(predicate::str::contains("  Unlinked:    1"))
        .stdout(predicate::str::contains("  Total issues: 3"))
        .stdout(predicate::str::contains("  Open:         1"))
        .stdout(predicate::str::contains("  Closed:       1"));
    assert_eq!(ws.tasks(), TASKS);
}

#[test]
fn json_report() {
    let ws = seeded();
    let output = ws
        .tasksync()
        .args(["--status", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["document"], "tasks.md");
    assert_eq!(report["tasks"]["total"], 3);
    assert_eq!(report["tasks"]["unlinked"], 1);
    assert_eq!(report["tracker"]["open"], 1);
    assert_eq!(report["tracker"]["closed"], 1);
}

#[test]
fn status_is_read_only() {
    let ws = seeded();
    ws.tasksync().arg("--status").assert().success();
    assert_eq!(ws.calls(), "sync --import-only\nlist --json\n");
}
