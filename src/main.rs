//! langdetect CLI entrypoint.
//!
//! Provides a thin wrapper over the `cli` module: parse args, install
//! logging, dispatch to the selected command, and exit with an appropriate
//! status. For programmatic use, prefer the library API (`langdetect::api`).

use std::process::ExitCode;

use langdetect::cli;

fn main() -> ExitCode {
    // Parse errors are already logged by `start`.
    let Ok(options) = cli::start(std::env::args().skip(1)) else {
        return ExitCode::FAILURE;
    };

    match cli::run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
