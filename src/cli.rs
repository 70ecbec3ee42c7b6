//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `triage`.
#[derive(Debug, Parser)]
#[command(name = "triage", version, about = "Classify test failures and locate their scenarios")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify raw failure output into a structured record.
    Classify {
        /// Read the failure text from a file instead of stdin.
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Locate the scenario that declared a failed step.
    Locate {
        /// The failed step phrase.
        step: String,
        /// Scenario-name hint to narrow the search.
        #[arg(long)]
        scenario: Option<String>,
        /// Directory of feature documents (overrides the config).
        #[arg(long)]
        features: Option<PathBuf>,
    },
    /// Resolve a step phrase to its declaring method.
    StepDef {
        /// The step phrase to resolve.
        step: String,
        /// YAML step-declaration index (overrides the config).
        #[arg(long)]
        index: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_classify_with_file() {
        let cli = Cli::parse_from(["triage", "classify", "--file", "failure.txt"]);
        assert!(matches!(cli.command, Command::Classify { file: Some(_) }));
    }

    #[test]
    fn parses_locate_with_hint() {
        let cli = Cli::parse_from(["triage", "locate", "When I log in", "--scenario", "Login"]);
        match cli.command {
            Command::Locate { step, scenario, features } => {
                assert_eq!(step, "When I log in");
                assert_eq!(scenario.as_deref(), Some("Login"));
                assert!(features.is_none());
            }
            Command::Classify { .. } | Command::StepDef { .. } => panic!("wrong command"),
        }
    }

    #[test]
    fn parses_step_def() {
        let cli = Cli::parse_from(["triage", "step-def", "When I log in"]);
        assert!(matches!(cli.command, Command::StepDef { .. }));
    }
}
