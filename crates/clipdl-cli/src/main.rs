use clipdl_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Diagnostics go to the state-dir log file only; stderr is reserved for
    // forwarded downloader errors, so a failed init just means no tracing.
    let _ = logging::init_logging();

    // Parse CLI, fetch, and exit with the outcome's code. Everything owned by
    // the run is dropped before `exit`.
    let code = match Cli::run_from_args() {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("clipdl error: {:#}", err);
            1
        }
    };
    std::process::exit(code);
}
