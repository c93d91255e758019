use clap::Parser;
use hlp_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();

    // Initialize logging before anything can fail.
    if cli.log_file {
        if let Err(err) = logging::init_logging_file() {
            logging::init_logging_stderr();
            tracing::warn!("file logging unavailable, using stderr: {:#}", err);
        }
    } else {
        logging::init_logging_stderr();
    }

    if let Err(err) = cli.run() {
        eprintln!("hlp error: {:#}", err);
        std::process::exit(1);
    }
}
