//! Core library entry for the `triage` CLI.
//!
//! Turns raw, unstructured test-failure output into structured records
//! and locates the authoring scenario for a failed behavior-test step.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod failure;
pub mod gherkin;
pub mod ports;
pub mod stepdef;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["triage", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_executes_locate_against_a_missing_directory() {
        // A nonexistent features directory is an empty corpus, so the
        // command succeeds with no match.
        let result =
            run(["triage", "locate", "When I log in", "--features", "/nonexistent/features"]);
        assert!(result.is_ok());
    }
}
