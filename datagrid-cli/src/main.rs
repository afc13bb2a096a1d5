mod cli;
mod commands;
mod config;
mod display;
mod error;
mod paths;

use std::fs::File;
use std::process::ExitCode;

use clap::Parser;
use log::error;
use simplelog::{Config as LogConfig, WriteLogger};

use crate::cli::Cli;
use crate::config::Config;
use crate::error::CliError;

fn init_logging(config: &Config) -> Result<(), CliError> {
    let level = config.level_filter()?;
    let path = paths::prepare_log_file();
    let file = File::create(&path).map_err(|source| CliError::Log { path, source })?;
    // Ignored when a logger is already installed.
    let _ = WriteLogger::init(level, LogConfig::default(), file);
    Ok(())
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = Config::load(cli.overrides.config.as_deref())?;
    config.apply(&cli.overrides);
    init_logging(&config)?;
    commands::run(cli.command, &config).await
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
