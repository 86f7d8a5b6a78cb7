//! Specify CLI - Setup tool for spec-driven development projects

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = specify_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
