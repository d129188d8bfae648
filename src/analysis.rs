//! Heuristic content analysis of release documentation.
//!
//! The analyzer reads free-form markdown release notes and derives structured
//! metadata by pattern matching alone. Each extractor scans the same input
//! independently; only the release type consumes another extractor's result.

pub mod mr;
pub mod patterns;
pub mod record;
mod release;
mod sections;

pub use patterns::PatternTables;
pub use record::{
    AnalysisRecord, ComplexityScore, Impact, LinesChanged, MrAnalysisRecord, MrType, ReleaseType,
};

/// Stateless analyzer over a set of read-only pattern tables.
///
/// Cheap to copy and safe to share across threads.
#[derive(Debug, Clone, Copy)]
pub struct ContentAnalyzer {
    tables: &'static PatternTables,
}

impl ContentAnalyzer {
    /// Creates an analyzer over the built-in tables.
    pub fn new() -> Self {
        Self {
            tables: patterns::tables(),
        }
    }

    /// Creates an analyzer over caller-supplied tables.
    pub fn with_tables(tables: &'static PatternTables) -> Self {
        Self { tables }
    }

    /// Returns the tables this analyzer matches with.
    pub fn tables(&self) -> &'static PatternTables {
        self.tables
    }
}

impl Default for ContentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns today's date in the "Month DD, YYYY" display form.
pub fn today_label() -> String {
    chrono::Local::now().format("%B %d, %Y").to_string()
}
