#![deny(clippy::pedantic)]

#[macro_use]
extern crate log;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

mod args;
mod cli;
mod minimal_logger;

use args::{RustmsncArgs, RustmsncCommand};
use minimal_logger::MinimalLogger;

static MIN_LOGGER: MinimalLogger = MinimalLogger;

fn main() -> Result<()> {
    // Set up the minimal logger to stderr
    log::set_logger(&MIN_LOGGER)?;

    let args = RustmsncArgs::parse();

    log::set_max_level(match (args.quiet, args.verbose) {
        (true, _) => LevelFilter::Warn,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    });

    match args.command {
        RustmsncCommand::Simulate(simulate_args) => {
            cli::simulate::simulate_with_logger(simulate_args)
        },
    }
}
