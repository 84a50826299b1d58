pub mod aggregate;
pub mod classify;
pub mod cli;
pub mod dataset;
pub mod filter;
pub mod ingest;
pub mod inspect;
pub mod io_utils;
pub mod preview;
pub mod session;
pub mod summary;
pub mod table;
pub mod tally;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("survey_tally", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Inspect(args) => inspect::execute(&args),
        Commands::Preview(args) => preview::execute(&args),
        Commands::Summary(args) => summary::execute(&args),
        Commands::Tally(args) => tally::execute(&args),
    }
}
