//! # sanity-check
//!
//! A maintenance tool that makes sure every source file under a tree starts
//! with the project's license header.
//!
//! The header is a block of license text bracketed by two identical delimiter
//! lines. For each target file the tool either:
//!
//! * confirms the file already starts with the canonical header,
//! * rewrites the header in place when the file contains exactly two
//!   delimiter lines (an older header bounded by the same markers), or
//! * records the file as needing a human fix.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use sanity_check::processor::{Auditor, AuditorConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let auditor = Auditor::new(AuditorConfig::new("kernel"));
//!     let outcome = auditor.run()?;
//!
//!     for row in outcome.problems.rows() {
//!         println!("{}", row);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`header`] - The license block and header classification
//! * [`processor`] - Tree walking, per-file repair and problem collection
//! * [`report`] - Problem report, summary and JSON output
//! * [`logging`] - Logging utilities for verbose output
//!
//! [`header`]: crate::header
//! [`processor`]: crate::processor
//! [`report`]: crate::report
//! [`logging`]: crate::logging

pub mod cli;
pub mod config;
pub mod diff;
pub mod header;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
