// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Task document model and line parser.
//!
//! A task document (`tasks.md`) is line oriented:
//!
//! ```text
//! ## Phase 1: Setup
//! - [ ] T001 Create project skeleton
//! - [X] T002 (bd-a1b2) [P] [US1] Add CI workflow
//!
//! ## Dependencies
//! - **Phase 2** depends on Phase 1
//! ```
//!
//! Every line is classified into exactly one [`LineKind`]. Lines the parser
//! does not recognize are kept as [`LineKind::Text`], so parsing never fails
//! and [`Document::render`] reproduces the original text.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

// Pre-compiled line patterns. These are hard-coded and verified by the tests.
static PHASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"^## Phase (\d+):\s*(.*?)\s*$") {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    }
});
static TASK_RE: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"^- \[([ Xx])\] (T\d+)(?:\s+(.*?))?\s*$") {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    }
});
static DISCOVERED_RE: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"^- \[([ Xx])\] \(([^()\s]+)\)(?:\s+(.*?))?\s*$") {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    }
});
static DEPS_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r"(?i)^## Dependenc") {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    });
static DEP_CLAUSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(
        r"(?i)(?:depends\s+on|after)\s+phases?\s+(\d+(?:\s*-\s*\d+)?(?:\s*(?:,\s*and\b|,|\band\b|&)\s*\d+(?:\s*-\s*\d+)?)*)",
    ) {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    }
});
static DEP_SOURCE_RE: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"(?i)phase\s+(\d+)") {
    Ok(re) => re,
    Err(_) => unreachable!("static regex pattern"),
});
static DEP_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r"(?i),|&|\band\b") {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    });
static USER_STORY_RE: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"\[(US\d+)\]") {
    Ok(re) => re,
    Err(_) => unreachable!("static regex pattern"),
});
const PARALLEL_TOKEN: &str = "[P]";

/// Identifier prefix used by the beads tracker (`bd-a1b2`).
pub const DEFAULT_ID_PREFIX: &str = "bd";

/// Returns true if `token` is a tracker id of the form `<prefix>-<suffix>`.
///
/// The suffix is ASCII alphanumerics plus `_`, `-` and `.`.
pub fn is_marker(token: &str, prefix: &str) -> bool {
    token
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|suffix| {
            !suffix.is_empty()
                && suffix
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        })
}

/// Splits a leading `(id)` marker off a task description.
fn split_marker<'a>(text: &'a str, prefix: &str) -> (Option<&'a str>, &'a str) {
    let marker = text
        .strip_prefix('(')
        .and_then(|rest| rest.split_once(')'))
        .filter(|(id, _)| is_marker(id, prefix));
    match marker {
        Some((id, rest)) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
            (Some(id), rest.trim_start())
        }
        _ => (None, text),
    }
}

/// State of a checklist box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkbox {
    /// `[ ]`
    Pending,
    /// `[X]` or `[x]`
    Done,
}

impl Checkbox {
    fn from_mark(mark: &str) -> Self {
        match mark {
            "X" | "x" => Checkbox::Done,
            _ => Checkbox::Pending,
        }
    }

    /// Returns the character written between the brackets.
    pub fn mark(&self) -> char {
        match self {
            Checkbox::Pending => ' ',
            Checkbox::Done => 'X',
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Checkbox::Done)
    }
}

/// A `## Phase <n>: <title>` heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseHeading {
    /// Phase number as written (leading zeros preserved).
    pub number: String,
    pub title: String,
}

/// A phase of work, as tracked during a sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phase {
    pub number: String,
    pub title: String,
    /// Tracker identifier, attached once resolved or created.
    pub external_id: Option<String>,
}

impl Phase {
    pub fn from_heading(heading: &PhaseHeading) -> Self {
        Phase {
            number: heading.number.clone(),
            title: heading.title.clone(),
            external_id: None,
        }
    }

    /// Key stored in the tracker's correspondence field (`phase-<n>`).
    pub fn correspondence_key(&self) -> String {
        format!("phase-{}", self.number)
    }

    /// Label attached to the phase and all of its tasks (`phase:<n>`).
    pub fn label(&self) -> String {
        format!("phase:{}", self.number)
    }

    /// Title used for the phase's grouping issue.
    pub fn issue_title(&self) -> String {
        format!("Phase {}: {}", self.number, self.title)
    }
}

/// A `- [ ] T001 ...` task entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Ordinal identifier (e.g. `T001`), unique within a document.
    pub ordinal: String,
    pub checkbox: Checkbox,
    /// Inline `(id)` marker following the ordinal, if the task is linked.
    pub marker: Option<String>,
    /// Remaining text, including any `[P]` and `[USn]` tokens.
    pub description: String,
    /// The task may run concurrently with the previous task in its phase.
    pub parallel: bool,
    pub user_story: Option<String>,
}

impl Task {
    /// Description with `[P]` and `[USn]` tokens removed.
    pub fn clean_description(&self) -> String {
        let text = self.description.replace(PARALLEL_TOKEN, " ");
        let text = USER_STORY_RE.replace_all(&text, " ");
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Title used for the task's issue (`T001: Create project skeleton`).
    pub fn issue_title(&self) -> String {
        let desc = self.clean_description();
        if desc.is_empty() {
            self.ordinal.clone()
        } else {
            format!("{}: {}", self.ordinal, desc)
        }
    }
}

/// A checklist line linked to an issue that originated outside the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredEntry {
    pub id: String,
    pub checkbox: Checkbox,
    pub title: String,
}

impl DiscoveredEntry {
    /// Renders the entry as `- [ ] (<id>) <title>`.
    pub fn render(&self) -> String {
        if self.title.is_empty() {
            format!("- [{}] ({})", self.checkbox.mark(), self.id)
        } else {
            format!("- [{}] ({}) {}", self.checkbox.mark(), self.id, self.title)
        }
    }
}

/// Request that `phase` be blocked until `depends_on` completes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyRule {
    pub phase: String,
    pub depends_on: String,
}

/// A dependency-section line naming a source phase and its prerequisites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyClause {
    /// One rule per referenced phase, self references removed.
    pub rules: Vec<DependencyRule>,
    /// Referenced tokens that are not a single phase number (e.g. `1-3`).
    /// Ranges are not expanded.
    pub unsupported: Vec<String>,
}

/// Classification of a single document line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    PhaseHeading(PhaseHeading),
    Task(Task),
    Discovered(DiscoveredEntry),
    /// A `## Dependencies` heading.
    DependencySection,
    DependencyClause(DependencyClause),
    Text,
}

/// One line of the document with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub kind: LineKind,
}

/// A parsed task document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
    /// Only `(<id_prefix>-...)` tokens are read as markers.
    id_prefix: String,
}

impl Default for Document {
    fn default() -> Self {
        Document {
            lines: Vec::new(),
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
        }
    }
}

impl Document {
    /// Parses the full text of a task document using the beads id prefix.
    pub fn parse(text: &str) -> Self {
        Self::parse_with_prefix(text, DEFAULT_ID_PREFIX)
    }

    /// Parses a task document whose markers carry `id_prefix`.
    pub fn parse_with_prefix(text: &str, id_prefix: &str) -> Self {
        let mut lines = Vec::new();
        let mut in_deps = false;

        for raw in text.lines() {
            let kind = if DEPS_HEADER_RE.is_match(raw) {
                in_deps = true;
                LineKind::DependencySection
            } else if let Some(heading) = parse_phase_heading(raw) {
                in_deps = false;
                LineKind::PhaseHeading(heading)
            } else if in_deps {
                // Task lines are not synced from inside the dependencies
                // section, but discovered entries may be appended after it.
                match parse_dependency_clause(raw) {
                    Some(clause) => LineKind::DependencyClause(clause),
                    None => match parse_entry(raw, id_prefix) {
                        kind @ LineKind::Discovered(_) => kind,
                        _ => LineKind::Text,
                    },
                }
            } else {
                parse_entry(raw, id_prefix)
            };
            lines.push(Line {
                text: raw.to_string(),
                kind,
            });
        }

        Document {
            lines,
            id_prefix: id_prefix.to_string(),
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Task entries with their line index, in document order.
    pub fn tasks(&self) -> impl Iterator<Item = (usize, &Task)> {
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(i, line)| match &line.kind {
                LineKind::Task(task) => Some((i, task)),
                _ => None,
            })
    }

    /// All dependency rules from the dependencies section, in order.
    pub fn dependency_rules(&self) -> Vec<DependencyRule> {
        self.lines
            .iter()
            .filter_map(|line| match &line.kind {
                LineKind::DependencyClause(clause) => Some(clause.rules.iter().cloned()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Every identifier already present as an inline marker.
    pub fn markers(&self) -> HashSet<&str> {
        self.lines
            .iter()
            .filter_map(|line| match &line.kind {
                LineKind::Task(task) => task.marker.as_deref(),
                LineKind::Discovered(entry) => Some(entry.id.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Inserts an `(id)` marker right after the ordinal of the task at `index`.
    ///
    /// Returns `false` (and leaves the line untouched) if the line is not a
    /// task, already carries a marker, or `id` would not read back as one.
    pub fn link_task(&mut self, index: usize, id: &str) -> bool {
        if !is_marker(id, &self.id_prefix) {
            return false;
        }
        let Some(line) = self.lines.get_mut(index) else {
            return false;
        };
        let ordinal = match &line.kind {
            LineKind::Task(task) if task.marker.is_none() => task.ordinal.clone(),
            _ => return false,
        };
        line.text = line
            .text
            .replacen(&ordinal, &format!("{} ({})", ordinal, id), 1);
        line.kind = parse_entry(&line.text, &self.id_prefix);
        true
    }

    /// Sets the checkbox of the task or discovered entry at `index`.
    ///
    /// Returns `true` only if the line changed.
    pub fn set_checkbox(&mut self, index: usize, checkbox: Checkbox) -> bool {
        let Some(line) = self.lines.get_mut(index) else {
            return false;
        };
        let current = match &line.kind {
            LineKind::Task(task) => task.checkbox,
            LineKind::Discovered(entry) => entry.checkbox,
            _ => return false,
        };
        if current == checkbox {
            return false;
        }
        // Both patterns anchor on the five-byte `- [?]` prefix.
        let Some(rest) = line.text.get(5..) else {
            return false;
        };
        line.text = format!("- [{}]{}", checkbox.mark(), rest);
        line.kind = parse_entry(&line.text, &self.id_prefix);
        true
    }

    /// Appends discovered entries under the `## <heading>` section.
    ///
    /// The section is created at the end of the document if it does not
    /// exist; otherwise entries go after the last non-blank line of it.
    pub fn append_discovered(&mut self, heading: &str, entries: &[DiscoveredEntry]) {
        if entries.is_empty() {
            return;
        }
        let heading_line = format!("## {}", heading);
        let new_lines: Vec<Line> = entries
            .iter()
            .map(|entry| Line {
                text: entry.render(),
                kind: LineKind::Discovered(entry.clone()),
            })
            .collect();

        let existing = self
            .lines
            .iter()
            .position(|line| line.text.trim().eq_ignore_ascii_case(&heading_line));

        match existing {
            Some(start) => {
                let end = self
                    .lines
                    .iter()
                    .enumerate()
                    .skip(start + 1)
                    .find(|(_, line)| line.text.starts_with("## "))
                    .map_or(self.lines.len(), |(i, _)| i);
                let mut at = end;
                while at > start + 1
                    && self
                        .lines
                        .get(at - 1)
                        .is_some_and(|line| line.text.trim().is_empty())
                {
                    at -= 1;
                }
                let tail = self.lines.split_off(at);
                self.lines.extend(new_lines);
                self.lines.extend(tail);
            }
            None => {
                if self
                    .lines
                    .last()
                    .is_some_and(|line| !line.text.trim().is_empty())
                {
                    self.lines.push(text_line(""));
                }
                self.lines.push(text_line(&heading_line));
                self.lines.push(text_line(""));
                self.lines.extend(new_lines);
            }
        }
    }

    /// Renders the document back to text, one line per entry with a trailing
    /// newline.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.text);
            out.push('\n');
        }
        out
    }
}

fn text_line(text: &str) -> Line {
    Line {
        text: text.to_string(),
        kind: LineKind::Text,
    }
}

fn parse_phase_heading(line: &str) -> Option<PhaseHeading> {
    let caps = PHASE_RE.captures(line)?;
    Some(PhaseHeading {
        number: caps.get(1)?.as_str().to_string(),
        title: caps
            .get(2)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
    })
}

/// Classifies a checklist line as a task, a discovered entry, or plain text.
fn parse_entry(line: &str, id_prefix: &str) -> LineKind {
    if let Some(caps) = TASK_RE.captures(line) {
        let checkbox = Checkbox::from_mark(caps.get(1).map_or(" ", |m| m.as_str()));
        let ordinal = caps.get(2).map_or("", |m| m.as_str()).to_string();
        let rest = caps.get(3).map_or("", |m| m.as_str());
        let (marker, description) = split_marker(rest, id_prefix);
        let marker = marker.map(str::to_string);
        let description = description.to_string();
        let parallel = description.contains(PARALLEL_TOKEN);
        let user_story = USER_STORY_RE
            .captures(&description)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string());
        return LineKind::Task(Task {
            ordinal,
            checkbox,
            marker,
            description,
            parallel,
            user_story,
        });
    }

    if let Some(caps) = DISCOVERED_RE
        .captures(line)
        .filter(|caps| caps.get(2).is_some_and(|m| is_marker(m.as_str(), id_prefix)))
    {
        return LineKind::Discovered(DiscoveredEntry {
            checkbox: Checkbox::from_mark(caps.get(1).map_or(" ", |m| m.as_str())),
            id: caps.get(2).map_or("", |m| m.as_str()).to_string(),
            title: caps
                .get(3)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        });
    }

    LineKind::Text
}

/// Extracts a dependency clause from a line of the dependencies section.
///
/// The source phase is the first `Phase <n>` mentioned before the
/// `depends on` / `after` clause.
fn parse_dependency_clause(line: &str) -> Option<DependencyClause> {
    let clause = DEP_CLAUSE_RE.captures(line)?;
    let whole = clause.get(0)?;
    let list = clause.get(1)?.as_str();

    let prefix = line.get(..whole.start())?;
    let source = DEP_SOURCE_RE
        .captures(prefix)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())?;

    let mut result = DependencyClause::default();
    for token in DEP_SEPARATOR_RE.split(list) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        if token.chars().all(|c| c.is_ascii_digit()) {
            if token != source {
                result.rules.push(DependencyRule {
                    phase: source.clone(),
                    depends_on: token.to_string(),
                });
            }
        } else {
            result.unsupported.push(token.to_string());
        }
    }

    Some(result)
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
