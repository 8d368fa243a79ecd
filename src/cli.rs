//! CLI argument parsing and command dispatch

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::WriteStyle;
use log::LevelFilter;

use crate::commands;

/// pomtree - Load, transform and rewrite multi-module Maven descriptors
#[derive(Parser, Debug)]
#[command(name = "pomtree")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize log output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Display the module hierarchy of a solution
    Tree(commands::tree::TreeArgs),

    /// List every descriptor of a solution
    Ls(commands::ls::LsArgs),

    /// Substitute a ${property} placeholder in dependency classifiers
    Classifier(commands::classifier::ClassifierArgs),

    /// Switch snapshot versions to releases
    Release(commands::release::ReleaseArgs),

    /// Switch release versions to the next snapshot
    Snapshot(commands::snapshot::SnapshotArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level, &self.color)?;

        match self.command {
            Commands::Tree(args) => commands::tree::execute(args),
            Commands::Ls(args) => commands::ls::execute(args),
            Commands::Classifier(args) => commands::classifier::execute(args),
            Commands::Release(args) => commands::release::execute(args),
            Commands::Snapshot(args) => commands::snapshot::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

fn init_logging(level: &str, color: &str) -> Result<()> {
    let filter: LevelFilter = level
        .parse()
        .with_context(|| format!("Invalid log level `{}`", level))?;
    let style = match color {
        "always" => WriteStyle::Always,
        "never" => WriteStyle::Never,
        _ => WriteStyle::Auto,
    };
    let installed = env_logger::Builder::new()
        .filter_level(filter)
        .write_style(style)
        .format_timestamp(None)
        .try_init();
    if let Err(err) = installed {
        // only one logger per process; tests run several commands in one
        log::debug!("Keeping the existing logger: {}", err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["pomtree", "ls", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level, "debug");
        assert!(matches!(cli.command, Commands::Ls(_)));
    }

    #[test]
    fn test_logging_can_be_initialized_twice() {
        assert!(init_logging("warn", "never").is_ok());
        assert!(init_logging("debug", "always").is_ok());
    }

    #[test]
    fn test_invalid_log_level_is_rejected() {
        let err = init_logging("loud", "auto").unwrap_err();
        assert!(err.to_string().contains("Invalid log level"));
    }
}
