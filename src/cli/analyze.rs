//! Analysis of local release-notes files.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use super::{formatting, OutputFormat};
use crate::analysis::ContentAnalyzer;
use crate::data::{to_yaml, ReleaseReport, VersionInfo};

/// Analyzes a markdown file without consulting the bucket.
#[derive(Parser)]
pub struct AnalyzeCommand {
    /// Markdown file to analyze.
    pub file: PathBuf,

    /// Version label used to classify the release.
    #[arg(long, default_value = "")]
    pub release: String,

    /// Output format.
    #[arg(long, value_enum, default_value = "yaml")]
    pub format: OutputFormat,
}

impl AnalyzeCommand {
    /// Executes the analyze command.
    pub fn execute(self) -> Result<()> {
        let content = fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read {}", self.file.display()))?;
        debug!(file = %self.file.display(), bytes = content.len(), "Read release notes");

        let analysis = ContentAnalyzer::new().analyze(&content, &self.release);
        match self.format {
            OutputFormat::Text => println!("{}", formatting::format_analysis(&analysis)),
            OutputFormat::Yaml => {
                let report = ReleaseReport {
                    versions: VersionInfo::default(),
                    release: self.release,
                    source: self.file.display().to_string(),
                    analysis,
                };
                print!("{}", to_yaml(&report)?);
            }
        }
        Ok(())
    }
}
