//! CLI interface for clarity-docs.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{AppConfig, ConfigOverrides};
use crate::store::{FsObjectStore, ReleaseCatalog};
use crate::utils::Settings;

pub mod analyze;
pub mod config;
pub(crate) mod formatting;
pub mod help;
pub mod mr;
pub mod release;

/// clarity-docs: heuristic analysis of release documentation.
#[derive(Parser)]
#[command(name = "clarity-docs")]
#[command(about = "Heuristic analysis of release notes and merge request records", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the release documentation (overrides BUCKET_NAME).
    #[arg(long, global = true, value_name = "DIR")]
    pub bucket: Option<PathBuf>,

    /// Directory exports are written to (overrides OUTPUT_DIR).
    #[arg(long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Main command categories.
#[derive(Subcommand)]
pub enum Commands {
    /// Analyzes a local release-notes file.
    Analyze(analyze::AnalyzeCommand),
    /// Release notes stored in the bucket.
    Release(release::ReleaseCommand),
    /// Merge request records stored in the bucket.
    Mr(mr::MrCommand),
    /// Configuration information.
    Config(config::ConfigCommand),
    /// Displays comprehensive help for all commands.
    #[command(name = "help-all")]
    HelpAll(help::HelpCommand),
}

/// Output format for analysis commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// YAML report.
    Yaml,
    /// Human-readable text.
    Text,
}

impl Cli {
    /// Executes the CLI command.
    pub fn execute(self) -> Result<()> {
        let overrides = ConfigOverrides {
            bucket: self.bucket,
            output_dir: self.output_dir,
        };
        match self.command {
            Commands::Analyze(analyze_cmd) => analyze_cmd.execute(),
            Commands::Release(release_cmd) => release_cmd.execute(&overrides),
            Commands::Mr(mr_cmd) => mr_cmd.execute(&overrides),
            Commands::Config(config_cmd) => config_cmd.execute(&overrides),
            Commands::HelpAll(help_cmd) => help_cmd.execute(),
        }
    }
}

/// Resolves configuration from the settings file, environment and overrides.
pub(crate) fn load_config(overrides: &ConfigOverrides) -> Result<AppConfig> {
    let settings = Settings::load().context("Failed to load settings")?;
    Ok(AppConfig::resolve(&settings, overrides)?)
}

/// Opens the configured bucket as a release catalog.
pub(crate) fn open_catalog(
    overrides: &ConfigOverrides,
) -> Result<(AppConfig, ReleaseCatalog<FsObjectStore>)> {
    let config = load_config(overrides)?;
    let store = FsObjectStore::open(&config.bucket)
        .with_context(|| format!("Failed to open bucket {}", config.bucket.display()))?;
    Ok((config, ReleaseCatalog::new(store)))
}
