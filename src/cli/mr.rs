//! Merge-request record commands.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use super::{formatting, open_catalog, OutputFormat};
use crate::analysis::ContentAnalyzer;
use crate::config::ConfigOverrides;
use crate::data::{to_yaml, ChangeRecordReport};
use crate::store::{find_change_record, ChangeRecord, DocumentSource};

/// Merge-request record operations.
#[derive(Parser)]
pub struct MrCommand {
    /// MR subcommand to execute.
    #[command(subcommand)]
    pub command: MrSubcommands,
}

/// MR subcommands.
#[derive(Subcommand)]
pub enum MrSubcommands {
    /// Lists releases that carry MR records, newest first.
    Releases,
    /// Lists the MR records of a release.
    List {
        /// Release version.
        #[arg(required_unless_present = "current")]
        release: Option<String>,
        /// Lists records of the release under development instead.
        #[arg(long, conflicts_with = "release")]
        current: bool,
    },
    /// Shows an MR record with its header and analysis.
    Show(RecordArgs),
    /// Prints the analysis of an MR record.
    Analyze {
        /// Record to analyze.
        #[command(flatten)]
        target: RecordArgs,
        /// Output format.
        #[arg(long, value_enum, default_value = "yaml")]
        format: OutputFormat,
    },
}

/// Selects one MR record: `<RELEASE> <MR>`, or `--current <MR>`.
#[derive(Args)]
pub struct RecordArgs {
    /// Release version followed by the record's display name or identifier prefix.
    #[arg(value_names = ["RELEASE", "MR"], num_args = 1..=2, required = true)]
    pub targets: Vec<String>,
    /// Looks the record up in the release under development.
    #[arg(long)]
    pub current: bool,
}

impl RecordArgs {
    /// Returns the release to search (`None` for the current release) and the query.
    pub fn resolve(&self) -> Result<(Option<&str>, &str)> {
        match (self.current, self.targets.as_slice()) {
            (false, [release, mr]) => Ok((Some(release.as_str()), mr.as_str())),
            (true, [mr]) => Ok((None, mr.as_str())),
            (false, _) => bail!("Expected <RELEASE> <MR>, or --current <MR>"),
            (true, _) => bail!("--current takes only <MR>"),
        }
    }
}

impl MrCommand {
    /// Executes the MR command.
    pub fn execute(self, overrides: &ConfigOverrides) -> Result<()> {
        let (_, catalog) = open_catalog(overrides)?;

        match self.command {
            MrSubcommands::Releases => {
                let versions = catalog
                    .mr_release_versions()
                    .context("Failed to list MR releases")?;
                if versions.is_empty() {
                    eprintln!(
                        "No releases with MR records found in {}",
                        catalog.store().root().display()
                    );
                }
                for version in versions {
                    println!("{version}");
                }
            }
            MrSubcommands::List { release, current } => {
                let (label, records) = match release {
                    Some(release) if !current => {
                        let records = catalog.change_records(&release)?;
                        (release, records)
                    }
                    _ => ("current release".to_string(), catalog.current_release_records()?),
                };
                if records.is_empty() {
                    eprintln!("No MRs found for {label}");
                }
                for record in &records {
                    println!("{}", formatting::format_record_line(record));
                }
            }
            MrSubcommands::Show(target) => {
                let (release, mr) = target.resolve()?;
                let (record, content) = load_record(&catalog, release, mr)?;
                let analysis = ContentAnalyzer::new().analyze_mr(&content);
                println!("{}\n\n---\n", formatting::format_mr_header(&record));
                println!("{}", content.trim_end());
                println!("\n---\n\n{}", formatting::format_mr_analysis(&analysis));
            }
            MrSubcommands::Analyze { target, format } => {
                let (release, mr) = target.resolve()?;
                let (record, content) = load_record(&catalog, release, mr)?;
                let analysis = ContentAnalyzer::new().analyze_mr(&content);
                match format {
                    OutputFormat::Text => println!("{}", formatting::format_mr_analysis(&analysis)),
                    OutputFormat::Yaml => {
                        let report = ChangeRecordReport {
                            release: release.map(str::to_string),
                            record,
                            analysis,
                        };
                        print!("{}", to_yaml(&report)?);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Resolves `query` among the records of `release` and reads its text.
///
/// `None` searches the release under development.
fn load_record(
    catalog: &impl DocumentSource,
    release: Option<&str>,
    query: &str,
) -> Result<(ChangeRecord, String)> {
    let (scope, records) = match release {
        Some(release) => (
            format!("release {release}"),
            catalog
                .change_records(release)
                .with_context(|| format!("Failed to list MRs for {release}"))?,
        ),
        None => (
            "the current release".to_string(),
            catalog
                .current_release_records()
                .context("Failed to list current release MRs")?,
        ),
    };
    let record = find_change_record(&records, query)
        .cloned()
        .ok_or_else(|| anyhow!("No MR matching '{query}' in {scope}"))?;
    let content = catalog
        .change_record_text(&record)?
        .ok_or_else(|| anyhow!("Could not retrieve MR documentation {}", record.path))?;
    Ok((record, content))
}
