use etagsum_core::logging;

mod cli;

use crate::cli::{Cli, PROGRAM};

fn main() {
    // Initialize logging as early as possible.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and dispatch.
    match Cli::run_from_args() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("{PROGRAM}: {:#}", err);
            std::process::exit(1);
        }
    }
}
