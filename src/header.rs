//! # Header Module
//!
//! This module contains the license block that every target file must begin
//! with, and the classification of file content against it.
//!
//! A file is either already compliant, repairable (its content carries exactly
//! two delimiter lines, which are taken to bound an older header), or
//! unrepairable and left for a human to fix.

/// Delimiter line that brackets the license header.
pub const DEFAULT_DELIMITER: &str = "///////////////////////////////////////////////////////////////////////////////L";

/// License text placed between the two delimiter lines.
pub const DEFAULT_LICENSE_TEXT: &str = "// The MIT License (MIT)
// Copyright (c) 2021 [untitled os] Team
// See LICENSE.txt and CREDITS.txt for details";

/// Outcome of checking a file's content against a [`LicenseBlock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStatus {
  /// Content already starts with the canonical header.
  Compliant,
  /// Content contains exactly two delimiters and can be rewritten.
  ///
  /// `header_start` is the byte offset of the first delimiter and
  /// `suffix_start` the byte offset just past the second one. Everything
  /// before `suffix_start` is replaced by the canonical header.
  Repairable { header_start: usize, suffix_start: usize },
  /// Any other delimiter count; the file cannot be fixed automatically.
  Unrepairable { delimiter_count: usize },
}

/// The delimiter and license text a file header is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseBlock {
  delimiter: String,
  text: String,
  canonical: String,
}

impl LicenseBlock {
  /// Creates a license block from a delimiter line and the license text.
  pub fn new(delimiter: impl Into<String>, text: impl Into<String>) -> Self {
    let delimiter = delimiter.into();
    let text = text.into();
    let canonical = format!("{delimiter}\n{text}\n{delimiter}");

    Self {
      delimiter,
      text,
      canonical,
    }
  }

  pub fn delimiter(&self) -> &str {
    &self.delimiter
  }

  pub fn text(&self) -> &str {
    &self.text
  }

  /// The exact header serialization: `DELIMITER\nTEXT\nDELIMITER`.
  pub fn canonical(&self) -> &str {
    &self.canonical
  }

  /// Returns `true` if the content starts with the canonical header.
  ///
  /// This is a byte-literal prefix match; CRLF line endings are not
  /// normalized.
  pub fn is_compliant(&self, content: &str) -> bool {
    content.starts_with(&self.canonical)
  }

  /// Classifies the content against this license block.
  ///
  /// Delimiter occurrences are counted without overlap.
  pub fn classify(&self, content: &str) -> HeaderStatus {
    if self.is_compliant(content) {
      return HeaderStatus::Compliant;
    }

    let offsets: Vec<usize> = content.match_indices(self.delimiter.as_str()).map(|(i, _)| i).collect();
    match offsets.as_slice() {
      [first, second] => HeaderStatus::Repairable {
        header_start: *first,
        suffix_start: second + self.delimiter.len(),
      },
      _ => HeaderStatus::Unrepairable {
        delimiter_count: offsets.len(),
      },
    }
  }

  /// Replaces everything before `suffix_start` with the canonical header.
  pub fn rebuild(&self, content: &str, suffix_start: usize) -> String {
    format!("{}{}", self.canonical, &content[suffix_start..])
  }
}

impl Default for LicenseBlock {
  fn default() -> Self {
    Self::new(DEFAULT_DELIMITER, DEFAULT_LICENSE_TEXT)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn repair(block: &LicenseBlock, content: &str) -> Option<String> {
    match block.classify(content) {
      HeaderStatus::Repairable { suffix_start, .. } => Some(block.rebuild(content, suffix_start)),
      HeaderStatus::Compliant | HeaderStatus::Unrepairable { .. } => None,
    }
  }

  fn canonical_with(body: &str) -> String {
    format!("{DEFAULT_DELIMITER}\n{DEFAULT_LICENSE_TEXT}\n{DEFAULT_DELIMITER}{body}")
  }

  #[test]
  fn test_default_delimiter_shape() {
    // Matches the delimiter lines already present in the kernel sources.
    assert_eq!(DEFAULT_DELIMITER.len(), 80);
    assert!(DEFAULT_DELIMITER.ends_with('L'));
    assert!(DEFAULT_DELIMITER[..79].chars().all(|c| c == '/'));
  }

  #[test]
  fn test_canonical_serialization() {
    let block = LicenseBlock::new("--", "text");
    assert_eq!(block.canonical(), "--\ntext\n--");
    assert_eq!(block.delimiter(), "--");
    assert_eq!(block.text(), "text");
  }

  #[test]
  fn test_compliant_content() {
    let block = LicenseBlock::default();
    assert_eq!(block.classify(&canonical_with("\nfn main() {}")), HeaderStatus::Compliant);
    assert_eq!(block.classify(&canonical_with("")), HeaderStatus::Compliant);
  }

  #[test]
  fn test_no_delimiter_is_unrepairable() {
    let block = LicenseBlock::default();
    assert_eq!(
      block.classify("hello world"),
      HeaderStatus::Unrepairable { delimiter_count: 0 }
    );
    assert_eq!(block.classify(""), HeaderStatus::Unrepairable { delimiter_count: 0 });
  }

  #[test]
  fn test_single_delimiter_is_unrepairable() {
    let block = LicenseBlock::default();
    let content = format!("{DEFAULT_DELIMITER}\n// truncated header\nfn main() {{}}");
    assert_eq!(block.classify(&content), HeaderStatus::Unrepairable { delimiter_count: 1 });
    assert_eq!(repair(&block, &content), None);
  }

  #[test]
  fn test_three_delimiters_is_unrepairable() {
    let block = LicenseBlock::default();
    let content = format!("{d}\nold\n{d}\n// {d}\n", d = DEFAULT_DELIMITER);
    assert_eq!(block.classify(&content), HeaderStatus::Unrepairable { delimiter_count: 3 });
  }

  #[test]
  fn test_two_delimiters_is_repairable() {
    let block = LicenseBlock::default();
    let content = format!("{d}\nOLD TEXT\n{d}\nfn main() {{}}", d = DEFAULT_DELIMITER);
    let suffix_start = content.len() - "\nfn main() {}".len();

    assert_eq!(
      block.classify(&content),
      HeaderStatus::Repairable {
        header_start: 0,
        suffix_start,
      }
    );
    assert_eq!(repair(&block, &content), Some(canonical_with("\nfn main() {}")));
  }

  #[test]
  fn test_repair_discards_leading_content() {
    let block = LicenseBlock::default();
    let content = format!("#![no_std]\n{d}\nOLD\n{d}\nfn f() {{}}\n", d = DEFAULT_DELIMITER);

    match block.classify(&content) {
      HeaderStatus::Repairable { header_start, .. } => assert_eq!(header_start, "#![no_std]\n".len()),
      other => panic!("expected repairable, got {other:?}"),
    }
    assert_eq!(repair(&block, &content), Some(canonical_with("\nfn f() {}\n")));
  }

  #[test]
  fn test_repaired_content_is_compliant() {
    let block = LicenseBlock::default();
    let content = format!("{d}\nstale\n{d}\nmod a;\n", d = DEFAULT_DELIMITER);
    let repaired = repair(&block, &content).expect("content should be repairable");

    assert_eq!(block.classify(&repaired), HeaderStatus::Compliant);
  }

  #[test]
  fn test_crlf_header_is_not_compliant() {
    let block = LicenseBlock::default();
    let crlf = canonical_with("\nfn main() {}").replace('\n', "\r\n");

    assert!(!block.is_compliant(&crlf));
    assert!(matches!(block.classify(&crlf), HeaderStatus::Repairable { .. }));
  }

  #[test]
  fn test_delimiter_occurrences_do_not_overlap() {
    let block = LicenseBlock::new("aa", "x");
    assert_eq!(block.classify("aaaa"), HeaderStatus::Repairable {
      header_start: 0,
      suffix_start: 4,
    });
    assert_eq!(block.classify("aaa"), HeaderStatus::Unrepairable { delimiter_count: 1 });
  }

  #[test]
  fn test_compliant_file_is_not_repaired() {
    let block = LicenseBlock::default();
    assert_eq!(repair(&block, &canonical_with("\nfn main() {}")), None);
  }
}
