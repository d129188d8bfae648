//! Analysis result types.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Structured summary derived from one release-notes document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// First heading of the document, or a fixed default.
    pub title: String,
    /// First substantial plain paragraph line, or a fixed default.
    pub summary: String,
    /// Heuristic count of new-feature mentions.
    pub features_count: usize,
    /// Heuristic count of improvement mentions.
    pub improvements_count: usize,
    /// Heuristic count of change and fix mentions.
    pub changes_count: usize,
    /// Number of change records filed under the release.
    pub mr_count: usize,
    /// Extracted project label.
    pub project_name: String,
    /// Literal date found in the document, or today's date.
    pub release_date: String,
    /// Uppercased technical terms, at most five.
    pub technical_highlights: BTreeSet<String>,
    /// Coarse size classification.
    pub complexity_score: ComplexityScore,
    /// Intent classification of the release.
    pub release_type: ReleaseType,
}

/// Coarse three-level classification of a release's apparent scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplexityScore {
    /// Short document with few technical terms.
    Low,
    /// More than 500 words.
    Medium,
    /// More than 1000 words.
    High,
}

impl fmt::Display for ComplexityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

/// Classification of a release's intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReleaseType {
    /// Version label of the form `vN.0` or `N.0.0`.
    #[serde(rename = "Major Release")]
    Major,
    /// More than three feature mentions.
    #[serde(rename = "Feature Release")]
    Feature,
    /// Mentions fixes, bugs, patches or hotfixes.
    #[serde(rename = "Maintenance Release")]
    Maintenance,
    /// Anything else.
    #[serde(rename = "Standard Release")]
    Standard,
    /// No content was available to classify.
    Unknown,
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Major => write!(f, "Major Release"),
            Self::Feature => write!(f, "Feature Release"),
            Self::Maintenance => write!(f, "Maintenance Release"),
            Self::Standard => write!(f, "Standard Release"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Summary derived from a single change record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MrAnalysisRecord {
    /// Kind of change the record describes.
    #[serde(rename = "type")]
    pub mr_type: MrType,
    /// Impact level estimated from text length.
    pub impact: Impact,
    /// Number of distinct file-like tokens mentioned.
    pub files_changed: usize,
    /// Bucketed estimate of lines of code touched.
    pub lines_changed: LinesChanged,
}

/// Kind of change a change record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MrType {
    /// Adds something new.
    Feature,
    /// Fixes a defect.
    #[serde(rename = "Bug Fix")]
    BugFix,
    /// Refactors or optimizes existing code.
    Improvement,
    /// Unclassified.
    Other,
}

impl fmt::Display for MrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Feature => write!(f, "Feature"),
            Self::BugFix => write!(f, "Bug Fix"),
            Self::Improvement => write!(f, "Improvement"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// Impact level of a change record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    /// Up to 200 words.
    Low,
    /// More than 200 words.
    Medium,
    /// More than 500 words.
    High,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

/// Bucketed estimate of lines of code changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinesChanged {
    /// Up to 150 words of description.
    #[serde(rename = "<50")]
    UnderFifty,
    /// More than 150 words of description.
    #[serde(rename = "50-100")]
    FiftyToHundred,
    /// More than 300 words of description.
    #[serde(rename = "100+")]
    OverHundred,
}

impl fmt::Display for LinesChanged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnderFifty => write!(f, "<50"),
            Self::FiftyToHundred => write!(f, "50-100"),
            Self::OverHundred => write!(f, "100+"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_type_labels() {
        assert_eq!(ReleaseType::Major.to_string(), "Major Release");
        assert_eq!(ReleaseType::Maintenance.to_string(), "Maintenance Release");
        assert_eq!(ReleaseType::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn release_type_serializes_as_label() -> anyhow::Result<()> {
        let json = serde_json::to_string(&ReleaseType::Feature)?;
        assert_eq!(json, "\"Feature Release\"");
        let parsed: ReleaseType = serde_json::from_str("\"Standard Release\"")?;
        assert_eq!(parsed, ReleaseType::Standard);
        Ok(())
    }

    #[test]
    fn mr_record_uses_type_key() -> anyhow::Result<()> {
        let record = MrAnalysisRecord {
            mr_type: MrType::BugFix,
            impact: Impact::Low,
            files_changed: 2,
            lines_changed: LinesChanged::UnderFifty,
        };
        let value = serde_json::to_value(&record)?;
        assert_eq!(value["type"], "Bug Fix");
        assert_eq!(value["lines_changed"], "<50");
        Ok(())
    }
}
