//! `askcoded` binary entry point.
//!
//! Runs the bridge until a termination signal arrives and maps launch
//! failures onto the process exit code.

use std::io::{self, Write};
use std::process::ExitCode;

use askcode_config::ConfigError;
use askcoded::{BootstrapError, LaunchError, run_bridge};

fn main() -> ExitCode {
    match run_bridge() {
        Ok(()) => ExitCode::SUCCESS,
        Err(LaunchError::Bootstrap(BootstrapError::Configuration { source })) => {
            if let ConfigError::Cli(error) = &*source {
                error.exit();
            }
            report(&*source)
        }
        Err(error) => report(&error),
    }
}

fn report(error: &dyn std::error::Error) -> ExitCode {
    // stderr may already be closed; the exit code still reports failure.
    if let Err(write_error) = writeln!(io::stderr().lock(), "askcoded: {error}") {
        drop(write_error);
    }
    ExitCode::FAILURE
}
