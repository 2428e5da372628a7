mod config;
mod error;
mod events;
mod fetch;
mod filter;
mod flights;
mod logging;
mod pipeline;
mod rank;
mod table;

use clap::Parser;
use std::process;

fn main() {
    let args = config::Args::parse();
    let config = config::Config::from_args(args);
    logging::init_logging(config.verbosity, config.color);

    tracing::debug!(?config, "starting");

    // Failures were already reported through the event sink.
    if pipeline::run(&config).is_err() {
        process::exit(1);
    }
}
