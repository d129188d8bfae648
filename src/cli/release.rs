//! Release-notes commands.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use super::{formatting, open_catalog, OutputFormat};
use crate::analysis::{AnalysisRecord, ContentAnalyzer};
use crate::config::ConfigOverrides;
use crate::data::{to_yaml, ReleaseEntry, ReleaseListing, ReleaseReport, VersionInfo};
use crate::export;
use crate::store::DocumentSource;

/// Release-notes operations.
#[derive(Parser)]
pub struct ReleaseCommand {
    /// Release subcommand to execute.
    #[command(subcommand)]
    pub command: ReleaseSubcommands,
}

/// Release subcommands.
#[derive(Subcommand)]
pub enum ReleaseSubcommands {
    /// Lists releases, newest first.
    List,
    /// Lists every file stored for a release.
    Files {
        /// Release version.
        version: String,
    },
    /// Shows the release overview and notes.
    Show {
        /// Release version.
        version: String,
        /// Output format.
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Prints the analysis of a release's notes as YAML.
    Analyze {
        /// Release version.
        version: String,
    },
    /// Exports a release's notes as markdown.
    Export {
        /// Release version.
        version: String,
    },
}

impl ReleaseCommand {
    /// Executes the release command.
    pub fn execute(self, overrides: &ConfigOverrides) -> Result<()> {
        let (config, catalog) = open_catalog(overrides)?;

        match self.command {
            ReleaseSubcommands::List => {
                let versions = catalog.release_versions().context("Failed to list releases")?;
                if versions.is_empty() {
                    eprintln!("No releases found in {}", catalog.store().root().display());
                    return Ok(());
                }
                let listing = ReleaseListing {
                    project: config.project_name,
                    releases: versions
                        .into_iter()
                        .map(|version| ReleaseEntry {
                            mr_count: catalog.count_change_records(&version),
                            version,
                        })
                        .collect(),
                };
                print!("{}", to_yaml(&listing)?);
            }
            ReleaseSubcommands::Files { version } => {
                for key in catalog.release_files(&version)? {
                    println!("{key}");
                }
            }
            ReleaseSubcommands::Show { version, format } => {
                let (content, analysis) = analyze_release(&catalog, &version)?;
                match format {
                    OutputFormat::Text => {
                        println!("{}", export::release_overview(&analysis, &content));
                    }
                    OutputFormat::Yaml => {
                        print!("{}", to_yaml(&report(version, analysis))?);
                    }
                }
            }
            ReleaseSubcommands::Analyze { version } => {
                let (_, analysis) = analyze_release(&catalog, &version)?;
                print!("{}", to_yaml(&report(version, analysis))?);
            }
            ReleaseSubcommands::Export { version } => {
                let (content, analysis) = analyze_release(&catalog, &version)?;
                let document = export::export_document(&version, &analysis, &content);
                let path = export::write_export(&config.output_dir, &version, &document)?;
                println!("Exported {version} to {}", path.display());
            }
        }
        Ok(())
    }
}

/// Loads and analyzes the notes of `version`.
fn analyze_release(
    catalog: &impl DocumentSource,
    version: &str,
) -> Result<(String, AnalysisRecord)> {
    let Some(content) = catalog
        .release_notes(version)
        .with_context(|| format!("Failed to read release notes for {version}"))?
    else {
        bail!("No release notes found for version {version}");
    };

    let mr_count = catalog.count_change_records(version);
    let analysis = ContentAnalyzer::new().analyze_with_mr_count(&content, version, mr_count);
    Ok((content, analysis))
}

fn report(release: String, analysis: AnalysisRecord) -> ReleaseReport {
    ReleaseReport {
        versions: VersionInfo::default(),
        source: format!("{}{release}/", crate::store::RELEASES_PREFIX),
        release,
        analysis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryObjectStore, ReleaseCatalog};

    #[test]
    fn analyze_release_counts_change_records() -> anyhow::Result<()> {
        let mut store = MemoryObjectStore::new();
        store.insert("releases/v4.0/20240101_release-note_v4.0.md", "# Four\n\n## Fixes\n- one");
        store.insert("releases/v4.0/mr_docs/mr1_aaaaaaaa.json", "{}");
        store.insert("releases/v4.0/mr_docs/mr2_bbbbbbbb.json", "{}");
        let catalog = ReleaseCatalog::new(store);

        let (content, analysis) = analyze_release(&catalog, "v4.0")?;
        assert!(content.starts_with("# Four"));
        assert_eq!(analysis.mr_count, 2);
        assert_eq!(analysis.title, "Four");
        Ok(())
    }

    #[test]
    fn analyze_release_without_notes_fails() {
        let catalog = ReleaseCatalog::new(MemoryObjectStore::new());
        let err = analyze_release(&catalog, "v9.0").unwrap_err();
        assert!(err.to_string().contains("No release notes found for version v9.0"));
    }

    #[test]
    fn report_points_at_release_folder() {
        let analysis = ContentAnalyzer::new().analyze("# x", "v1.0");
        let report = report("v1.0".to_string(), analysis);
        assert_eq!(report.source, "releases/v1.0/");
    }
}
