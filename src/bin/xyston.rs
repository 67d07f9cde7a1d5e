//! Xyston CLI binary.

use std::process;

use clap::Parser;
use log::LevelFilter;

use xyston::cli::args::XystonArgs;
use xyston::cli::commands::execute_command;

fn main() {
    let args = XystonArgs::parse();

    let log_level = match args.verbosity() {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
