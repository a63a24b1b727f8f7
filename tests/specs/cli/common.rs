// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test files,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// Stand-in for `bd`. Issues are kept one per line in `state/issues` as
/// `id|spec_id|status|labels|title`, and every call is appended to
/// `state/calls.log`.
const FAKE_BD: &str = r#"#!/bin/sh
state="$(dirname "$0")/state"
mkdir -p "$state"
echo "$*" >> "$state/calls.log"
issues="$state/issues"
touch "$issues"

json() {
    printf '['
    sep=''
    while IFS='|' read -r id spec status labels title; do
        if [ -n "$1" ] && [ "$id" != "$1" ]; then continue; fi
        printf '%s{"id":"%s","title":"%s","status":"%s","spec_id":"%s","labels":[%s]}' \
            "$sep" "$id" "$title" "$status" "$spec" "$labels"
        sep=','
    done < "$issues"
    printf ']\n'
}

case "$1" in
    list) json "" ;;
    show) json "$2" ;;
    create)
        title="$2"
        shift 2
        spec=''
        labels=''
        while [ $# -gt 0 ]; do
            case "$1" in
                --spec-id) spec="$2"; shift 2 ;;
                --labels) labels="$2"; shift 2 ;;
                --type|--parent) shift 2 ;;
                *) shift ;;
            esac
        done
        n=$(( $(wc -l < "$issues") + 1 ))
        quoted=$(printf '%s' "$labels" | sed 's/[^,][^,]*/"&"/g')
        echo "bd-$n|$spec|open|$quoted|$title" >> "$issues"
        echo "bd-$n"
        ;;
    close)
        sed "s/^$2|\([^|]*\)|[^|]*|/$2|\1|closed|/" "$issues" > "$issues.tmp"
        mv "$issues.tmp" "$issues"
        ;;
    dep|sync|init) ;;
    *) echo "unknown command: $1" >&2; exit 1 ;;
esac
"#;

pub fn tasksync() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("tasksync").unwrap()
}

/// A temp directory holding `tasks.md` and a fake `bd` under `bin/`.
pub struct Workspace {
    temp: TempDir,
}

impl Workspace {
    pub fn new(tasks: &str) -> Self {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("tasks.md"), tasks).unwrap();

        let bin = temp.path().join("bin");
        fs::create_dir_all(bin.join("state")).unwrap();
        let bd = bin.join("bd");
        fs::write(&bd, FAKE_BD).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&bd, fs::Permissions::from_mode(0o755)).unwrap();
        }
        Workspace { temp }
    }

    pub fn bd_path(&self) -> PathBuf {
        self.temp.path().join("bin").join("bd")
    }

    /// `tasksync tasks.md` run from the workspace against the fake tracker.
    pub fn tasksync(&self) -> Command {
        let mut cmd = tasksync();
        cmd.current_dir(self.temp.path())
            .env("TASKSYNC_BINARY", self.bd_path())
            .env_remove("TASKSYNC_LOG")
            .arg("tasks.md");
        cmd
    }

    pub fn tasks(&self) -> String {
        fs::read_to_string(self.temp.path().join("tasks.md")).unwrap()
    }

    pub fn write_tasks(&self, tasks: &str) {
        fs::write(self.temp.path().join("tasks.md"), tasks).unwrap();
    }

    /// Seeds an issue line (`id|spec_id|status|labels|title`).
    pub fn seed(&self, line: &str) {
        let path = self.temp.path().join("bin/state/issues");
        let mut content = fs::read_to_string(&path).unwrap_or_default();
        content.push_str(line);
        content.push('\n');
        fs::write(path, content).unwrap();
    }

    pub fn issues(&self) -> String {
        fs::read_to_string(self.temp.path().join("bin/state/issues")).unwrap_or_default()
    }

    pub fn calls(&self) -> String {
        fs::read_to_string(self.temp.path().join("bin/state/calls.log")).unwrap_or_default()
    }

    pub fn path(&self) -> &std::path::Path {
        self.temp.path()
    }
}
