//! # Processor Module
//!
//! This module contains the auditor that walks a source tree, checks the
//! license header of every target file, repairs the headers it safely can,
//! and records the files it cannot.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - Whole-file reading and writing
//! - [`file_collector`] - Directory traversal and extension filtering
//!
//! The [`Auditor`] struct is the main entry point. A run returns an
//! [`AuditOutcome`]; printing and exit status are left to the caller.

mod file_collector;
mod file_io;

use std::path::{Path, PathBuf};

use anyhow::Result;
pub use file_collector::{FileCollector, display_path};
pub use file_io::FileIO;
use tracing::{debug, trace};

use crate::diff::DiffManager;
use crate::header::{HeaderStatus, LicenseBlock};
use crate::{info_log, warn_log};
use crate::report::{AuditOutcome, FileAction, FileReport, NEEDS_FIX_MESSAGE, OUTDATED_MESSAGE, ProblemReport};

/// Default directory the auditor walks.
pub const DEFAULT_ROOT: &str = "kernel";

/// Default suffix of the files the auditor checks.
pub const DEFAULT_EXTENSION: &str = ".rs";

/// Configuration for creating an Auditor instance.
pub struct AuditorConfig {
  pub license_block: LicenseBlock,
  pub root: PathBuf,
  pub extension: String,

  /// Report repairable files instead of rewriting them
  pub check_only: bool,

  pub diff_manager: Option<DiffManager>,
}

impl AuditorConfig {
  /// Creates a config for the given root with the default license block and
  /// extension.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// AuditorConfig {
  ///     check_only: true,
  ///     ..AuditorConfig::new("kernel")
  /// }
  /// ```
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self {
      license_block: LicenseBlock::default(),
      root: root.into(),
      extension: DEFAULT_EXTENSION.to_string(),
      check_only: false,
      diff_manager: None,
    }
  }
}

impl Default for AuditorConfig {
  fn default() -> Self {
    Self::new(DEFAULT_ROOT)
  }
}

/// Auditor for license headers under a source tree.
///
/// The `Auditor` is responsible for:
/// - Walking the root directory for target files
/// - Classifying each file's header
/// - Rewriting repairable headers in place (unless check-only)
/// - Collecting the files that need a human
pub struct Auditor {
  license_block: LicenseBlock,

  /// Whether to only report repairable files without rewriting them
  check_only: bool,

  diff_manager: DiffManager,

  file_collector: FileCollector,
}

impl Auditor {
  pub fn new(config: AuditorConfig) -> Self {
    Self {
      license_block: config.license_block,
      check_only: config.check_only,
      diff_manager: config.diff_manager.unwrap_or_else(|| DiffManager::new(false, None)),
      file_collector: FileCollector::new(config.root, config.extension),
    }
  }

  pub fn root(&self) -> &Path {
    self.file_collector.root()
  }

  /// Audits every target file under the root.
  ///
  /// Files are processed one at a time in traversal order. Repairs are
  /// written as they are found and announced with
  /// `Updated license header in <path>`.
  ///
  /// # Errors
  ///
  /// Returns an error if a target file cannot be read or a repaired file
  /// cannot be written. A missing root is not an error.
  pub fn run(&self) -> Result<AuditOutcome> {
    let files = self.file_collector.collect();

    let mut reports = Vec::with_capacity(files.len());
    let mut problems = ProblemReport::new();

    for path in files {
      let action = self.audit_file(&path, &mut problems)?;
      reports.push(FileReport {
        path: display_path(&path),
        action,
      });
    }

    let outcome = AuditOutcome::new(reports, problems);
    debug!(
      "Audited {} files: {} compliant, {} repaired, {} with issues",
      outcome.summary.files_checked,
      outcome.summary.compliant,
      outcome.summary.repaired,
      outcome.summary.with_issues
    );

    Ok(outcome)
  }

  /// Checks a single file and repairs or reports it.
  ///
  /// Problems are appended to `problems` under the file's display path.
  pub fn audit_file(&self, path: &Path, problems: &mut ProblemReport) -> Result<FileAction> {
    let content = FileIO::read_full_content(path)?;
    let path_key = display_path(path);

    match self.license_block.classify(&content) {
      HeaderStatus::Compliant => {
        trace!("Compliant: {}", path_key);
        Ok(FileAction::Compliant)
      }
      HeaderStatus::Repairable { header_start, suffix_start } => {
        trace!(
          "Repairable: {} (old header spans bytes {}..{})",
          path_key, header_start, suffix_start
        );
        let repaired = self.license_block.rebuild(&content, suffix_start);

        if self.check_only {
          if self.diff_manager.is_enabled()
            && let Err(e) = self.diff_manager.display_diff(path, &content, &repaired)
          {
            warn_log!("Failed to display diff for {}: {}", path_key, e);
          }
          problems.add(path_key, OUTDATED_MESSAGE);
          return Ok(FileAction::NeedsRepair);
        }

        FileIO::write_file(path, &repaired)?;
        info_log!("Updated license header in {}", path_key);
        Ok(FileAction::Repaired)
      }
      HeaderStatus::Unrepairable { delimiter_count } => {
        debug!("Unrepairable: {} ({} delimiter occurrences)", path_key, delimiter_count);
        problems.add(path_key, NEEDS_FIX_MESSAGE);
        Ok(FileAction::Unrepairable)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;
  use crate::header::{DEFAULT_DELIMITER, DEFAULT_LICENSE_TEXT};

  fn canonical() -> String {
    format!("{DEFAULT_DELIMITER}\n{DEFAULT_LICENSE_TEXT}\n{DEFAULT_DELIMITER}")
  }

  #[test]
  fn test_audit_file_records_unrepairable() -> Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("plain.rs");
    fs::write(&path, "hello world")?;

    let auditor = Auditor::new(AuditorConfig::new(temp_dir.path()));
    let mut problems = ProblemReport::new();
    let action = auditor.audit_file(&path, &mut problems)?;

    assert_eq!(action, FileAction::Unrepairable);
    assert_eq!(
      problems.get(&display_path(&path)),
      Some(&[NEEDS_FIX_MESSAGE.to_string()][..])
    );
    assert_eq!(fs::read_to_string(&path)?, "hello world");
    Ok(())
  }

  #[test]
  fn test_audit_file_repairs_in_place() -> Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("main.rs");
    fs::write(&path, format!("{d}\nOLD TEXT\n{d}\nfn main() {{}}", d = DEFAULT_DELIMITER))?;

    let auditor = Auditor::new(AuditorConfig::new(temp_dir.path()));
    let mut problems = ProblemReport::new();
    let action = auditor.audit_file(&path, &mut problems)?;

    assert_eq!(action, FileAction::Repaired);
    assert!(problems.is_empty());
    assert_eq!(fs::read_to_string(&path)?, format!("{}\nfn main() {{}}", canonical()));
    Ok(())
  }

  #[test]
  fn test_check_only_leaves_repairable_file_untouched() -> Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("main.rs");
    let original = format!("{d}\nOLD TEXT\n{d}\nfn main() {{}}", d = DEFAULT_DELIMITER);
    fs::write(&path, &original)?;

    let auditor = Auditor::new(AuditorConfig {
      check_only: true,
      ..AuditorConfig::new(temp_dir.path())
    });
    let mut problems = ProblemReport::new();
    let action = auditor.audit_file(&path, &mut problems)?;

    assert_eq!(action, FileAction::NeedsRepair);
    assert_eq!(
      problems.get(&display_path(&path)),
      Some(&[OUTDATED_MESSAGE.to_string()][..])
    );
    assert_eq!(fs::read_to_string(&path)?, original);
    Ok(())
  }

  #[test]
  fn test_run_on_missing_root_is_clean() -> Result<()> {
    let temp_dir = tempdir()?;
    let auditor = Auditor::new(AuditorConfig::new(temp_dir.path().join("kernel")));

    let outcome = auditor.run()?;
    assert!(outcome.is_clean());
    assert_eq!(outcome.summary.files_checked, 0);
    Ok(())
  }

  #[test]
  fn test_run_with_custom_license_block() -> Result<()> {
    let temp_dir = tempdir()?;
    fs::write(temp_dir.path().join("a.txt"), "#--\nold\n#--\nbody\n")?;
    fs::write(temp_dir.path().join("b.rs"), "ignored by extension")?;

    let auditor = Auditor::new(AuditorConfig {
      license_block: LicenseBlock::new("#--", "# Licensed"),
      extension: ".txt".to_string(),
      ..AuditorConfig::new(temp_dir.path())
    });

    let outcome = auditor.run()?;
    assert!(outcome.is_clean());
    assert_eq!(outcome.summary.files_checked, 1);
    assert_eq!(
      fs::read_to_string(temp_dir.path().join("a.txt"))?,
      "#--\n# Licensed\n#--\nbody\n"
    );
    Ok(())
  }

  #[test]
  fn test_default_config_targets_kernel_sources() {
    let config = AuditorConfig::default();
    assert_eq!(config.root, PathBuf::from(DEFAULT_ROOT));
    assert_eq!(config.extension, DEFAULT_EXTENSION);
    assert!(!config.check_only);
    assert_eq!(config.license_block, LicenseBlock::default());
  }
}
