//! # File Collector Module
//!
//! This module walks the configured root directory and collects the files
//! whose name ends with the target extension.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

/// File collector for directory traversal and extension filtering.
pub struct FileCollector {
  /// Directory to walk
  root: PathBuf,
  /// Suffix a file name must end with, e.g. `.rs`
  extension: String,
}

impl FileCollector {
  /// Creates a new FileCollector.
  ///
  /// # Parameters
  ///
  /// * `root` - The directory to walk recursively
  /// * `extension` - The suffix that selects target files
  pub fn new(root: PathBuf, extension: impl Into<String>) -> Self {
    Self {
      root,
      extension: extension.into(),
    }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Returns `true` if the file name ends with the target extension.
  pub fn matches_extension(&self, path: &Path) -> bool {
    path
      .file_name()
      .map(|name| name.to_string_lossy().ends_with(&self.extension))
      .unwrap_or(false)
  }

  /// Walks the root recursively and returns every regular target file.
  ///
  /// A missing or unreadable root yields no files. Entries that cannot be
  /// read are skipped. Symlinks to regular files are collected under their
  /// link path; symlinked directories are not descended into.
  pub fn collect(&self) -> Vec<PathBuf> {
    debug!("Scanning directory: {}", self.root.display());
    let start_time = std::time::Instant::now();

    let mut files = Vec::new();
    for entry in WalkDir::new(&self.root).follow_links(false) {
      let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
          debug!("Skipping unreadable entry: {}", e);
          continue;
        }
      };

      if !is_regular_file(&entry) {
        continue;
      }

      if self.matches_extension(entry.path()) {
        files.push(entry.into_path());
      } else {
        trace!("Skipping: {} (extension mismatch)", entry.path().display());
      }
    }

    debug!(
      "Found {} target files in {}ms",
      files.len(),
      start_time.elapsed().as_millis()
    );

    files
  }
}

/// Returns `true` if the entry is a regular file or a symlink resolving to one.
fn is_regular_file(entry: &DirEntry) -> bool {
  if !entry.path_is_symlink() {
    return entry.file_type().is_file();
  }

  match fs::metadata(entry.path()) {
    Ok(metadata) => metadata.is_file(),
    Err(e) => {
      debug!("Skipping dangling symlink {}: {}", entry.path().display(), e);
      false
    }
  }
}

/// Normalizes a path for display, using forward slashes as separators.
pub fn display_path(path: &Path) -> String {
  path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
  use std::fs;

  use anyhow::Result;
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_collect_filters_by_extension() -> Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path().join("kernel");
    fs::create_dir_all(root.join("src/arch"))?;
    fs::write(root.join("src/lib.rs"), "")?;
    fs::write(root.join("src/arch/mod.rs"), "")?;
    fs::write(root.join("src/notes.txt"), "")?;
    fs::write(root.join("Cargo.toml"), "")?;

    let collector = FileCollector::new(root.clone(), ".rs");
    let mut files = collector.collect();
    files.sort();

    assert_eq!(files, vec![root.join("src/arch/mod.rs"), root.join("src/lib.rs")]);
    Ok(())
  }

  #[test]
  fn test_collect_missing_root_is_empty() {
    let collector = FileCollector::new(PathBuf::from("/nonexistent/kernel"), ".rs");
    assert!(collector.collect().is_empty());
  }

  #[test]
  fn test_directories_named_like_targets_are_skipped() -> Result<()> {
    let temp_dir = tempdir()?;
    fs::create_dir_all(temp_dir.path().join("weird.rs"))?;

    let collector = FileCollector::new(temp_dir.path().to_path_buf(), ".rs");
    assert!(collector.collect().is_empty());
    Ok(())
  }

  #[cfg(unix)]
  #[test]
  fn test_symlinked_files_are_collected() -> Result<()> {
    use std::os::unix::fs::symlink;

    let temp_dir = tempdir()?;
    let root = temp_dir.path().join("kernel");
    let outside = temp_dir.path().join("outside");
    fs::create_dir_all(&root)?;
    fs::create_dir_all(outside.join("nested"))?;
    fs::write(outside.join("shared.rs"), "hello world")?;
    fs::write(outside.join("nested/deep.rs"), "")?;

    symlink(outside.join("shared.rs"), root.join("lib.rs"))?;
    symlink(outside.join("nested"), root.join("linked_dir"))?;
    symlink(outside.join("missing.rs"), root.join("dangling.rs"))?;

    let collector = FileCollector::new(root.clone(), ".rs");
    assert_eq!(collector.collect(), vec![root.join("lib.rs")]);
    Ok(())
  }

  #[test]
  fn test_matches_extension_is_suffix_match() {
    let collector = FileCollector::new(PathBuf::from("kernel"), ".rs");
    assert!(collector.matches_extension(Path::new("kernel/src/main.rs")));
    assert!(!collector.matches_extension(Path::new("kernel/src/main.RS")));
    assert!(!collector.matches_extension(Path::new("kernel/src/main.rs.bak")));
  }

  #[test]
  fn test_display_path_uses_forward_slashes() {
    assert_eq!(display_path(Path::new("kernel\\src\\lib.rs")), "kernel/src/lib.rs");
    assert_eq!(display_path(Path::new("kernel/src/lib.rs")), "kernel/src/lib.rs");
  }
}
