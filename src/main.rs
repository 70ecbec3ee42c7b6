//! Binary entry point for the `triage` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match triage::run(std::env::args_os()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
