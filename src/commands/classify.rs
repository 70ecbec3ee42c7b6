//! `triage classify` command.

use std::io::Read;
use std::path::Path;

use chrono::Utc;

use crate::failure::classifier::FailureClassifier;

/// Execute the `classify` command.
///
/// Reads failure text from `file` or stdin, classifies it, and prints the
/// structured record as JSON.
///
/// # Errors
///
/// Returns an error string if the input cannot be read, is empty, or the
/// record cannot be serialized.
pub fn run(file: Option<&Path>) -> Result<(), String> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| format!("Failed to read stdin: {e}"))?;
            buffer
        }
    };

    let classifier = FailureClassifier::default();
    let record = classifier.classify(&text).map_err(|e| e.to_string())?;

    eprintln!(
        "Classified at {} by `{}` in {}ms",
        Utc::now().to_rfc3339(),
        record.parsing_strategy,
        record.parsing_duration_millis
    );
    let json = serde_json::to_string_pretty(&record)
        .map_err(|e| format!("Failed to serialize record: {e}"))?;
    println!("{json}");
    Ok(())
}
