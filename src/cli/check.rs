//! # Check Command
//!
//! This module implements the audit command: resolve the configuration, run
//! the auditor, print the result and set the exit status.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Args;
use clap::builder::NonEmptyStringValueParser;
use tracing::debug;

use crate::config::load_config;
use crate::diff::DiffManager;
use crate::info_log;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{print_issues, print_no_issues, print_summary};
use crate::processor::{Auditor, AuditorConfig};
use crate::report::{AuditOutcome, write_json_report};

/// Arguments for the audit command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
  /// Directory to scan recursively [default: kernel]
  #[arg(long, value_name = "DIR")]
  pub root: Option<PathBuf>,

  /// File name suffix of the files to check [default: .rs]
  #[arg(long, value_name = "EXT", value_parser = NonEmptyStringValueParser::new())]
  pub extension: Option<String>,

  /// Check only: report outdated headers instead of rewriting them
  #[arg(long)]
  pub check: bool,

  /// Show the diff of each repair check mode would apply
  #[arg(long, requires = "check")]
  pub show_diff: bool,

  /// Save the diff of each repair check mode would apply to a file
  #[arg(long, value_name = "FILE", requires = "check")]
  pub save_diff: Option<PathBuf>,

  /// Write a JSON report of the run to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Path to config file (default: .sanity-check.toml in the current directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except the issue table and errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl CheckArgs {
  /// Builds the auditor configuration from CLI flags, the config file and the
  /// built-in defaults, in that order of precedence.
  fn auditor_config(&self) -> Result<AuditorConfig> {
    let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;
    let config = load_config(self.config.as_deref(), &current_dir, self.no_config)?;

    let root = self.root.clone().unwrap_or_else(|| config.root_or_default());
    let extension = self.extension.clone().unwrap_or_else(|| config.extension_or_default());

    let diff_manager = DiffManager::new(self.show_diff, self.save_diff.clone());
    diff_manager.init()?;

    Ok(AuditorConfig {
      license_block: config.license_block(),
      root,
      extension,
      check_only: self.check,
      diff_manager: Some(diff_manager),
    })
  }
}

/// Run the audit with the given arguments
///
/// Exits the process with status 1 if any file still needs attention.
pub fn run_check(args: CheckArgs) -> Result<()> {
  // Initialize tracing subscriber for structured logging
  init_tracing(args.quiet, args.verbose);

  // Set verbose mode for output formatting and info_log! macro
  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  debug!(
    "sanity-check {} ({})",
    env!("CARGO_PKG_VERSION"),
    option_env!("GIT_HASH").unwrap_or("unknown revision")
  );

  let auditor = Auditor::new(args.auditor_config()?);
  debug!("Auditing {} (check only: {})", auditor.root().display(), args.check);

  let outcome = auditor.run()?;

  print_summary(&outcome.summary);

  if let Some(ref output_path) = args.report_json {
    write_json_report(&outcome, output_path)?;
    info_log!("Generated JSON report at {}", output_path.display());
  }

  if !report_outcome(&outcome) {
    process::exit(1);
  }

  Ok(())
}

/// Prints the final result and returns `true` if the run is clean.
fn report_outcome(outcome: &AuditOutcome) -> bool {
  if outcome.is_clean() {
    print_no_issues();
    return true;
  }

  print_issues(&outcome.problems);
  false
}
