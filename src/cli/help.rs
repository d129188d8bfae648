//! Help for every command in one document.

use anyhow::Result;
use clap::{Command, CommandFactory, Parser};

use super::Cli;

/// Prints help for every command.
#[derive(Parser)]
pub struct HelpCommand {}

/// Renders help sections for the whole command tree.
pub struct HelpGenerator {
    app: Command,
}

impl HelpGenerator {
    /// Creates a generator over the clarity-docs command tree.
    pub fn new() -> Self {
        Self { app: Cli::command() }
    }

    /// Renders the root help followed by every subcommand, depth first.
    ///
    /// Siblings are ordered by name so the output is stable.
    pub fn generate_all_help(&self) -> String {
        let mut sections = vec![render_section(&self.app, None)];
        collect_sections(&self.app, "", &mut sections);
        sections.join(&format!("\n\n{}\n\n", "=".repeat(80)))
    }
}

impl Default for HelpGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_sections(cmd: &Command, prefix: &str, sections: &mut Vec<String>) {
    let mut children: Vec<&Command> = cmd
        .get_subcommands()
        .filter(|c| c.get_name() != "help")
        .collect();
    children.sort_by(|a, b| a.get_name().cmp(b.get_name()));

    for child in children {
        let path = if prefix.is_empty() {
            child.get_name().to_string()
        } else {
            format!("{prefix} {}", child.get_name())
        };
        sections.push(render_section(child, Some(&path)));
        collect_sections(child, &path, sections);
    }
}

fn render_section(cmd: &Command, path: Option<&str>) -> String {
    let name = path.map_or_else(
        || cmd.get_name().to_string(),
        |p| format!("clarity-docs {p}"),
    );
    let about = cmd
        .get_about()
        .map_or_else(|| "No description available".to_string(), ToString::to_string);
    format!("{name} - {about}\n\n{}", cmd.clone().render_help())
}

impl HelpCommand {
    /// Executes the help command.
    pub fn execute(self) -> Result<()> {
        println!("{}", HelpGenerator::new().generate_all_help());
        Ok(())
    }
}
