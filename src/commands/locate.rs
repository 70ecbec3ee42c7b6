//! `triage locate` command.

use std::path::Path;

use crate::adapters::live::DirectoryCorpus;
use crate::config::TriageConfig;
use crate::gherkin::locator::ScenarioLocator;

/// Execute the `locate` command.
///
/// Scans the configured feature directories (or the `--features`
/// override) for the scenario declaring the failed step and prints it as
/// JSON. No match prints a note and is not an error.
///
/// # Errors
///
/// Returns an error string if the corpus cannot be read or the record
/// cannot be serialized.
pub fn run(step: &str, scenario_hint: Option<&str>, features: Option<&Path>) -> Result<(), String> {
    let config = TriageConfig::load(Path::new("."))?;
    let roots: Vec<std::path::PathBuf> = match features {
        Some(dir) => vec![dir.to_path_buf()],
        None => config.feature_dirs.iter().map(std::path::PathBuf::from).collect(),
    };

    for root in roots {
        let corpus = DirectoryCorpus::new(&root, config.extensions.clone());
        let locator = ScenarioLocator::new(&corpus);
        let found = locator
            .locate(step, scenario_hint)
            .map_err(|e| format!("Failed to scan {}: {e}", root.display()))?;
        if let Some(record) = found {
            let json = serde_json::to_string_pretty(&record)
                .map_err(|e| format!("Failed to serialize scenario: {e}"))?;
            println!("{json}");
            return Ok(());
        }
    }

    println!("No scenario found for step: {step}");
    Ok(())
}
