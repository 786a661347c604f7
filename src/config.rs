//! # Configuration Module
//!
//! This module provides configuration support for sanity-check, allowing the
//! audited root, the target extension and the license block to be changed
//! without rebuilding.
//!
//! Configuration is read from a `.sanity-check.toml` file in the current
//! directory, or from the path given with `--config`. Every key is optional;
//! missing keys fall back to the built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::header::{DEFAULT_DELIMITER, DEFAULT_LICENSE_TEXT, LicenseBlock};
use crate::processor::{DEFAULT_EXTENSION, DEFAULT_ROOT};
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".sanity-check.toml";

/// License block overrides.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
pub struct LicenseConfig {
  /// Delimiter line bracketing the header
  #[serde(default)]
  pub delimiter: Option<String>,

  /// License text between the delimiter lines, without a trailing newline
  #[serde(default)]
  pub text: Option<String>,
}

/// Main configuration struct for sanity-check.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
pub struct Config {
  /// Directory to walk
  #[serde(default)]
  pub root: Option<PathBuf>,

  /// File name suffix that selects target files (e.g. ".rs")
  #[serde(default)]
  pub extension: Option<String>,

  #[serde(default)]
  pub license: LicenseConfig,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A configured value is unusable.
  #[error("Invalid value for '{key}': {message}")]
  InvalidValue { key: &'static str, message: String },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - The extension, delimiter and license text are non-empty when set
  /// - The delimiter does not occur inside the license text
  pub fn validate(&self) -> Result<(), ConfigError> {
    if let Some(ref extension) = self.extension
      && extension.is_empty()
    {
      return Err(ConfigError::InvalidValue {
        key: "extension",
        message: "extension cannot be empty".to_string(),
      });
    }

    if let Some(ref delimiter) = self.license.delimiter
      && delimiter.is_empty()
    {
      return Err(ConfigError::InvalidValue {
        key: "license.delimiter",
        message: "delimiter cannot be empty".to_string(),
      });
    }

    if let Some(ref text) = self.license.text
      && text.is_empty()
    {
      return Err(ConfigError::InvalidValue {
        key: "license.text",
        message: "license text cannot be empty".to_string(),
      });
    }

    let block = self.license_block();
    if block.text().contains(block.delimiter()) {
      return Err(ConfigError::InvalidValue {
        key: "license.text",
        message: "license text must not contain the delimiter".to_string(),
      });
    }

    Ok(())
  }

  /// The license block described by this config, with defaults filled in.
  pub fn license_block(&self) -> LicenseBlock {
    LicenseBlock::new(
      self.license.delimiter.as_deref().unwrap_or(DEFAULT_DELIMITER),
      self.license.text.as_deref().unwrap_or(DEFAULT_LICENSE_TEXT),
    )
  }

  /// The configured root, or `kernel`.
  pub fn root_or_default(&self) -> PathBuf {
    self.root.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT))
  }

  /// The configured extension, or `.rs`.
  pub fn extension_or_default(&self) -> String {
    self.extension.clone().unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. `.sanity-check.toml` in `base_dir`
///
/// An explicit path that does not exist is an error rather than a silent
/// fallback.
pub fn discover_config_path(explicit_path: Option<&Path>, base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Ok(Some(path.to_path_buf()));
    }
    return Err(ConfigError::ReadError {
      path: path.to_path_buf(),
      source: std::io::Error::new(std::io::ErrorKind::NotFound, "config file not found"),
    });
  }

  let default_config = base_dir.join(DEFAULT_CONFIG_FILENAME);
  if default_config.is_file() {
    verbose_log!("Using config: {}", default_config.display());
    return Ok(Some(default_config));
  }

  verbose_log!("No config file found");
  Ok(None)
}

/// Load configuration from the discovered path, or return the defaults.
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path from CLI flag
/// * `base_dir` - Directory searched for `.sanity-check.toml`
/// * `no_config` - If true, skip config file discovery and use defaults
pub fn load_config(explicit_path: Option<&Path>, base_dir: &Path, no_config: bool) -> Result<Config> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(Config::default());
  }

  match discover_config_path(explicit_path, base_dir)? {
    Some(path) => Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display())),
    None => Ok(Config::default()),
  }
}
