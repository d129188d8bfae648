//! Report structures emitted by the CLI.

use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisRecord, MrAnalysisRecord};
use crate::store::ChangeRecord;

pub mod yaml;

pub use yaml::to_yaml;

/// Version information for the tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Version of clarity-docs that produced the report.
    pub clarity_docs: String,
}

impl Default for VersionInfo {
    fn default() -> Self {
        Self {
            clarity_docs: crate::VERSION.to_string(),
        }
    }
}

/// Analysis of one release-notes document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseReport {
    /// Tool version.
    pub versions: VersionInfo,
    /// Release version the document was analyzed as.
    pub release: String,
    /// Object key or file path the document was read from.
    pub source: String,
    /// Derived metadata.
    pub analysis: AnalysisRecord,
}

/// One row of the release listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseEntry {
    /// Release version.
    pub version: String,
    /// Number of change records filed under the release.
    pub mr_count: usize,
}

/// Releases known to the bucket, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseListing {
    /// Project label.
    pub project: String,
    /// Releases, newest first.
    pub releases: Vec<ReleaseEntry>,
}

/// Analysis of one change record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRecordReport {
    /// Release the record belongs to, or `None` for the release under development.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
    /// Descriptor parsed from the record's filename.
    pub record: ChangeRecord,
    /// Derived metadata.
    pub analysis: MrAnalysisRecord,
}
