//! # Report Module
//!
//! This module collects the results of an audit run: what happened to each
//! checked file, which files still have problems, and a summary of the run.
//!
//! The [`ProblemReport`] keeps insertion order so the printed issue list is
//! stable across runs of the same tree.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Problem recorded for a file whose header cannot be repaired automatically.
pub const NEEDS_FIX_MESSAGE: &str = "Needs license header fixed";

/// Problem recorded in check-only mode for a file that would be repaired.
pub const OUTDATED_MESSAGE: &str = "License header is outdated";

/// Information about a checked file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
  /// Display path of the file, with forward slashes
  pub path: String,
  /// What the audit did with the file
  pub action: FileAction,
}

/// Possible outcomes for a checked file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileAction {
  /// File already had the canonical header
  Compliant,
  /// Header was rewritten in place
  Repaired,
  /// Header would be rewritten, but the run was check-only
  NeedsRepair,
  /// Header could not be repaired automatically
  Unrepairable,
}

/// Ordered mapping from file path to the problems found in it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemReport {
  entries: Vec<(String, Vec<String>)>,
}

impl ProblemReport {
  pub const fn new() -> Self {
    Self { entries: Vec::new() }
  }

  /// Appends a problem for a path, keeping the path's first-seen position.
  pub fn add(&mut self, path: impl Into<String>, message: impl Into<String>) {
    let path = path.into();
    let message = message.into();

    if let Some((_, problems)) = self.entries.iter_mut().find(|(p, _)| *p == path) {
      problems.push(message);
    } else {
      self.entries.push((path, vec![message]));
    }
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Number of files with at least one problem.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn get(&self, path: &str) -> Option<&[String]> {
    self
      .entries
      .iter()
      .find(|(p, _)| p == path)
      .map(|(_, problems)| problems.as_slice())
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
    self.entries.iter().map(|(p, problems)| (p.as_str(), problems.as_slice()))
  }

  /// Width of the longest reported path, in characters.
  pub fn path_width(&self) -> usize {
    self.entries.iter().map(|(p, _)| p.chars().count()).max().unwrap_or(0)
  }

  /// Renders one `path | message` row per problem, with paths left-justified
  /// to the longest reported path.
  pub fn rows(&self) -> Vec<String> {
    let width = self.path_width();
    self
      .iter()
      .flat_map(|(path, problems)| {
        problems
          .iter()
          .map(move |problem| format!("{:<width$} | {}", path, problem, width = width))
      })
      .collect()
  }
}

impl Serialize for ProblemReport {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    let mut map = serializer.serialize_map(Some(self.entries.len()))?;
    for (path, problems) in &self.entries {
      map.serialize_entry(path, problems)?;
    }
    map.end()
  }
}

/// Summary of an audit run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
  /// Number of target files checked
  pub files_checked: usize,
  /// Files that already had the canonical header
  pub compliant: usize,
  /// Files whose header was rewritten
  pub repaired: usize,
  /// Files recorded in the problem report
  pub with_issues: usize,
}

impl Summary {
  /// Builds a summary from per-file reports.
  pub fn from_reports(reports: &[FileReport]) -> Self {
    let mut summary = Self {
      files_checked: reports.len(),
      ..Self::default()
    };

    for report in reports {
      match report.action {
        FileAction::Compliant => summary.compliant += 1,
        FileAction::Repaired => summary.repaired += 1,
        FileAction::NeedsRepair | FileAction::Unrepairable => summary.with_issues += 1,
      }
    }

    summary
  }
}

/// Everything an audit run produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditOutcome {
  pub summary: Summary,
  pub files: Vec<FileReport>,
  pub problems: ProblemReport,
}

impl AuditOutcome {
  /// Builds an outcome from per-file reports and the problems found.
  pub fn new(files: Vec<FileReport>, problems: ProblemReport) -> Self {
    Self {
      summary: Summary::from_reports(&files),
      files,
      problems,
    }
  }

  /// `true` if the run found nothing that needs a human.
  pub fn is_clean(&self) -> bool {
    self.problems.is_empty()
  }
}

/// Writes the outcome as pretty-printed JSON to `output_path`.
pub fn write_json_report(outcome: &AuditOutcome, output_path: &Path) -> Result<()> {
  let content = serde_json::to_string_pretty(outcome).with_context(|| "Failed to serialize JSON report")?;
  fs::write(output_path, content).with_context(|| format!("Failed to write report to {}", output_path.display()))
}
