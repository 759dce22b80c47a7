use masbc_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Log to the XDG state file; stderr if that cannot be opened.
    if let Err(e) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", e);
    }

    if let Err(err) = Cli::run_from_args() {
        eprintln!("masbc error: {:#}", err);
        std::process::exit(1);
    }
}
