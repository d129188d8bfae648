//! Release overview rendering and markdown export.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::info;

use crate::analysis::AnalysisRecord;

/// Errors raised while writing an export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The version cannot be used as part of a filename.
    #[error("Version '{0}' cannot be used in an export filename")]
    InvalidVersion(String),

    /// Filesystem failure.
    #[error("Failed to write export {}", path.display())]
    Io {
        /// Path being written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

/// Returns the export filename for `version`.
pub fn export_filename(version: &str) -> String {
    format!("Release-Notes-{version}.md")
}

/// Returns the document body with blank lines removed.
pub fn display_body(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the summary and the "Released on" line.
pub fn overview_block(record: &AnalysisRecord) -> String {
    format!(
        "{}\n\nReleased on {} \u{2022} {}",
        record.summary, record.release_date, record.release_type
    )
}

/// Renders the overview followed by the cleaned document body.
pub fn release_overview(record: &AnalysisRecord, content: &str) -> String {
    format!("{}\n\n{}", overview_block(record), display_body(content))
}

/// Renders the full markdown export of a release.
pub fn export_document(version: &str, record: &AnalysisRecord, content: &str) -> String {
    format!(
        "# Release Notes - {version}\n\n{}\n\n---\n\n{}\n",
        overview_block(record),
        content.trim_end()
    )
}

/// Writes `document` as the export of `version` into `output_dir`.
///
/// The file is written to a temporary sibling first and renamed into place.
pub fn write_export(output_dir: &Path, version: &str, document: &str) -> Result<PathBuf, ExportError> {
    if version.is_empty() || version.contains(['/', '\\']) || version == ".." {
        return Err(ExportError::InvalidVersion(version.to_string()));
    }

    fs::create_dir_all(output_dir).map_err(|source| ExportError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let target = output_dir.join(export_filename(version));
    let io_err = |source: io::Error| ExportError::Io {
        path: target.clone(),
        source,
    };

    let mut temp = NamedTempFile::new_in(output_dir).map_err(io_err)?;
    temp.write_all(document.as_bytes()).map_err(io_err)?;
    temp.persist(&target).map_err(|e| io_err(e.error))?;

    info!(version, path = %target.display(), bytes = document.len(), "Exported release notes");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{ComplexityScore, ReleaseType};
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn record() -> AnalysisRecord {
        AnalysisRecord {
            title: "Payments 2.0".to_string(),
            summary: "This release reworks settlement batching for every merchant account."
                .to_string(),
            features_count: 1,
            improvements_count: 0,
            changes_count: 0,
            mr_count: 3,
            project_name: "Payments".to_string(),
            release_date: "March 04, 2024".to_string(),
            technical_highlights: BTreeSet::new(),
            complexity_score: ComplexityScore::Low,
            release_type: ReleaseType::Major,
        }
    }

    const NOTES: &str = "# Payments 2.0\n\n\nThis release reworks settlement batching.\n\n## New Features\n- Batch settlement\n";

    #[test]
    fn display_body_drops_blank_lines() {
        assert_eq!(display_body("a\n\n  \nb\n"), "a\nb");
        assert_eq!(display_body(""), "");
    }

    #[test]
    fn overview_text() {
        insta::assert_snapshot!(release_overview(&record(), NOTES), @r"
        This release reworks settlement batching for every merchant account.

        Released on March 04, 2024 • Major Release

        # Payments 2.0
        This release reworks settlement batching.
        ## New Features
        - Batch settlement
        ");
    }

    #[test]
    fn export_document_layout() {
        insta::assert_snapshot!(export_document("v2.0", &record(), NOTES), @r"
        # Release Notes - v2.0

        This release reworks settlement batching for every merchant account.

        Released on March 04, 2024 • Major Release

        ---

        # Payments 2.0


        This release reworks settlement batching.

        ## New Features
        - Batch settlement
        ");
    }

    #[test]
    fn write_export_creates_directory() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let output_dir = temp_dir.path().join("nested").join("out");

        let path = write_export(&output_dir, "v2.0", "# Release Notes - v2.0\n")?;

        assert_eq!(path, output_dir.join("Release-Notes-v2.0.md"));
        assert_eq!(fs::read_to_string(&path)?, "# Release Notes - v2.0\n");
        Ok(())
    }

    #[test]
    fn write_export_replaces_existing_file() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        write_export(temp_dir.path(), "v1.0", "old")?;
        let path = write_export(temp_dir.path(), "v1.0", "new")?;

        assert_eq!(fs::read_to_string(path)?, "new");
        let entries = fs::read_dir(temp_dir.path())?.count();
        assert_eq!(entries, 1);
        Ok(())
    }

    #[test]
    fn write_export_rejects_path_versions() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        for version in ["", "..", "a/b", "a\\b"] {
            assert!(matches!(
                write_export(temp_dir.path(), version, "x"),
                Err(ExportError::InvalidVersion(_))
            ));
        }
        Ok(())
    }
}
