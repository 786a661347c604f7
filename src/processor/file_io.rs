//! # File I/O Module
//!
//! Whole-file read and write operations used by the auditor. Each call opens,
//! reads or writes the entire content, and closes the file before returning.

use std::path::Path;

use anyhow::{Context, Result};

/// File I/O operations for the auditor.
pub struct FileIO;

impl FileIO {
  /// Read full file content.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file to read
  ///
  /// # Returns
  ///
  /// The complete file content as a String.
  pub fn read_full_content(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
  }

  /// Overwrite a file with new content.
  pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
  }
}
