//! # sanity-check
//!
//! Verifies, and where it safely can repairs, the license header at the top
//! of every kernel source file.

use anyhow::Result;
use sanity_check::cli::{Cli, run_check};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run_check(cli.check_args)
}
