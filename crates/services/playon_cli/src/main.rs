// File: services/playon_cli/src/main.rs
mod app;
mod args;
mod commands;

use clap::Parser;
use playon_common::logging;
use playon_config::load_config;
use std::path::Path;
use std::process::ExitCode;

use crate::app::App;
use crate::args::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load config: {}", err);
            return ExitCode::FAILURE;
        }
    };

    // Keep the guard alive so file logs are flushed on exit
    let level = logging::parse_level(&config.logging.level);
    let _guard = match config.logging.directory.as_deref() {
        Some(directory) => Some(logging::init_with_file(level, Path::new(directory))),
        None => {
            logging::init_with_level(level);
            None
        }
    };

    let result = match App::new(&config) {
        Ok(app) => commands::run(&app, cli.command).await,
        Err(err) => Err(err),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            logging::log_error(&err, "Command failed");
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
