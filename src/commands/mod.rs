//! Command dispatch and handlers.

pub mod classify;
pub mod locate;
pub mod step_def;

use crate::cli::Command;

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    match command {
        Command::Classify { file } => classify::run(file.as_deref()),
        Command::Locate { step, scenario, features } => {
            locate::run(step, scenario.as_deref(), features.as_deref())
        }
        Command::StepDef { step, index } => step_def::run(step, index.as_deref()),
    }
}
