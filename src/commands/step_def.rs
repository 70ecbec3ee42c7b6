//! `triage step-def` command.

use std::path::{Path, PathBuf};

use crate::adapters::live::YamlSourceIndex;
use crate::config::TriageConfig;
use crate::stepdef::StepDefinitionLocator;

/// Execute the `step-def` command.
///
/// Resolves the step phrase against the YAML declaration index and prints
/// the matching definition as JSON. No match prints a note and is not an
/// error.
///
/// # Errors
///
/// Returns an error string if no index is configured, the index cannot be
/// read, or the record cannot be serialized.
pub fn run(step: &str, index: Option<&Path>) -> Result<(), String> {
    let config = TriageConfig::load(Path::new("."))?;
    let index_path = match index {
        Some(path) => path.to_path_buf(),
        None => config
            .step_index
            .map(PathBuf::from)
            .ok_or_else(|| "No step index configured; pass --index or set step_index".to_string())?,
    };

    let source_index = YamlSourceIndex::new(&index_path);
    let locator = StepDefinitionLocator::new(&source_index);
    let found = locator.locate(step).map_err(|e| e.to_string())?;

    match found {
        Some(record) => {
            let json = serde_json::to_string_pretty(&record)
                .map_err(|e| format!("Failed to serialize definition: {e}"))?;
            println!("{json}");
        }
        None => println!("No step definition found for: {step}"),
    }
    Ok(())
}
