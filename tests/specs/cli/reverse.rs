// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reverse sync specs: tracker -> tasks.md.

#![cfg(unix)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use common::*;

const LINKED: &str = "\
## Phase 1: Setup

- [ ] T001 (bd-2) Create project skeleton
- [X] T002 (bd-3) Add CI config
- [ ] T003 (bd-4) Write README
";

fn seeded() -> Workspace {
    let ws = Workspace::new(LINKED);
    ws.seed("bd-1|phase-1|open|\"phase:1\"|Phase 1: Setup");
    ws.seed("bd-2|T001|closed|\"phase:1\"|T001: Create project skeleton");
    ws.seed("bd-3|T002|open|\"phase:1\"|T002: Add CI config");
    ws.seed("bd-4|T003|in_progress|\"phase:1\"|T003: Write README");
    ws
}

#[test]
fn checkboxes_follow_tracker_status() {
    let ws = seeded();
    ws.tasksync()
        .arg("--reverse")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reverse sync complete:"))
        .stdout(predicate::str::contains("  Checkboxes updated: 2"))
        .stdout(predicate::str::contains("  Discovered work added: 0"));

    similar_asserts::assert_eq!(
        ws.tasks(),
        "\
## Phase 1: Setup

- [X] T001 (bd-2) Create project skeleton
- [ ] T002 (bd-3) Add CI config
- [ ] T003 (bd-4) Write README
"
    );
}

#[test]
fn discovered_work_is_appended_once() {
    let ws = seeded();
    ws.seed("bd-9||open|\"discovered\"|DISCOVERED: Fix flaky build");
    ws.seed("bd-10||closed|\"discovered\"|Update lockfile");

    ws.tasksync()
        .arg("--reverse")
        .assert()
        .success()
        .stdout(predicate::str::contains("  Discovered work added: 2"));

    let expected = "\
## Phase 1: Setup

- [X] T001 (bd-2) Create project skeleton
- [ ] T002 (bd-3) Add CI config
- [ ] T003 (bd-4) Write README

## Discovered Work

- [ ] (bd-9) Fix flaky build
- [X] (bd-10) Update lockfile
";
    similar_asserts::assert_eq!(ws.tasks(), expected);

    ws.tasksync()
        .arg("--reverse")
        .assert()
        .success()
        .stdout(predicate::str::contains("  Checkboxes updated: 0"))
        .stdout(predicate::str::contains("  Discovered work added: 0"));
    assert_eq!(ws.tasks(), expected);
}

#[test]
fn dry_run_leaves_document_alone() {
    let ws = seeded();
    ws.tasksync()
        .args(["--reverse", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[dry-run] would update tasks.md"))
        .stdout(predicate::str::contains("  Checkboxes updated: 2"));
    assert_eq!(ws.tasks(), LINKED);
}

#[test]
fn reverse_never_creates_issues() {
    let ws = Workspace::new("## Phase 1: Setup\n- [ ] T001 Unlinked\n");
    ws.tasksync().arg("--reverse").assert().success();
    let calls = ws.calls();
    assert!(!calls.contains("create"));
    assert!(!calls.contains("close"));
    assert!(!calls.contains("init"));
    assert_eq!(ws.tasks(), "## Phase 1: Setup\n- [ ] T001 Unlinked\n");
}
