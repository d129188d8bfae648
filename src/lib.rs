//! # clarity-docs
//!
//! Heuristic analysis of release documentation.
//!
//! Release notes and merge-request records are read from a bucket laid out
//! by release version, scanned with keyword and pattern tables, and turned
//! into structured summaries.
//!
//! ## Quick Start
//!
//! ```rust
//! use clarity_docs::analysis::{ContentAnalyzer, ReleaseType};
//!
//! let record = ContentAnalyzer::new().analyze("# Release 2.0\n\nFixes a crash.", "v2.0");
//! assert_eq!(record.title, "Release 2.0");
//! assert_eq!(record.release_type, ReleaseType::Major);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod cli;
pub mod config;
pub mod data;
pub mod export;
pub mod store;
pub mod utils;

pub use crate::cli::Cli;

/// The current version of clarity-docs.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
