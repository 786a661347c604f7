//! # Output Module
//!
//! This module centralizes the user-facing output of an audit run: the
//! success line, the issue table and the optional summary.
//!
//! stdout stays predictable for build pipelines. Colors are only applied when
//! the stream supports them (or `--colors=always` forces them).

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::{ProblemReport, Summary};

/// Printed when the run found nothing that needs a human.
pub const NO_ISSUES_MESSAGE: &str = "No issues found.";

/// Header line printed before the issue table.
pub const ISSUES_HEADER: &str = "Issues:";

/// Print the success message.
pub fn print_no_issues() {
  if is_quiet() {
    return;
  }

  println!("{}", NO_ISSUES_MESSAGE.if_supports_color(Stream::Stdout, |s| s.green()));
}

/// Print the issue table.
///
/// The header is printed even in quiet mode; the rows are what a build log
/// needs to show.
pub fn print_issues(problems: &ProblemReport) {
  println!("{}", ISSUES_HEADER.if_supports_color(Stream::Stdout, |s| s.red()));
  for row in problems.rows() {
    println!("{}", row);
  }
}

/// Print the processing summary in verbose mode.
///
/// Format: "Checked N files: X compliant, Y repaired, Z with issues"
pub fn print_summary(summary: &Summary) {
  if !is_verbose() {
    return;
  }

  let issues = if summary.with_issues > 0 {
    summary
      .with_issues
      .if_supports_color(Stream::Stderr, |s| s.red())
      .to_string()
  } else {
    summary
      .with_issues
      .if_supports_color(Stream::Stderr, |s| s.cyan())
      .to_string()
  };

  eprintln!(
    "Checked {} {}: {} compliant, {} repaired, {} with issues",
    summary.files_checked,
    if summary.files_checked == 1 { "file" } else { "files" },
    summary.compliant.if_supports_color(Stream::Stderr, |s| s.cyan()),
    summary.repaired.if_supports_color(Stream::Stderr, |s| s.yellow()),
    issues
  );
}
