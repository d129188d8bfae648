//! Configuration-related CLI commands.

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::load_config;
use crate::config::ConfigOverrides;
use crate::data::to_yaml;

/// Configuration operations.
#[derive(Parser)]
pub struct ConfigCommand {
    /// Configuration subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Shows the resolved configuration.
    Show,
}

impl ConfigCommand {
    /// Executes the config command.
    pub fn execute(self, overrides: &ConfigOverrides) -> Result<()> {
        match self.command {
            ConfigSubcommands::Show => {
                let config = load_config(overrides)?;
                print!("{}", to_yaml(&config)?);
                Ok(())
            }
        }
    }
}
