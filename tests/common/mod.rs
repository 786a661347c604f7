#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sanity_check::header::{DEFAULT_DELIMITER, DEFAULT_LICENSE_TEXT};

/// The canonical header with nothing after it.
pub fn canonical() -> String {
  format!("{DEFAULT_DELIMITER}\n{DEFAULT_LICENSE_TEXT}\n{DEFAULT_DELIMITER}")
}

/// A file body starting with the canonical header.
pub fn compliant(body: &str) -> String {
  format!("{}{}", canonical(), body)
}

/// A file body with an old header bounded by two delimiter lines.
pub fn stale(old_text: &str, body: &str) -> String {
  format!("{DEFAULT_DELIMITER}\n{old_text}\n{DEFAULT_DELIMITER}{body}")
}

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> Result<PathBuf> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(path)
}

/// Reads a file back as a string.
pub fn read(path: &Path) -> Result<String> {
  fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
