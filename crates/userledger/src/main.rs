//! `UserLedger` - command-line account registry.
//!
//! Each invocation loads the store, optionally logs in, runs one operation,
//! and saves the store when it changed.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use userledger_core::Settings;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    info!("Starting UserLedger");

    let config_path = cli.config.clone().unwrap_or_else(Settings::default_location);
    let settings = match Settings::load(&config_path) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to read settings from {}: {e}", config_path.display());
            eprintln!("Error: invalid settings file {}: {e}", config_path.display());
            return ExitCode::FAILURE;
        }
    };

    let store_path = if cli.user_data {
        Settings::user_data_store()
    } else {
        settings.resolve_store_path(cli.file.as_deref())
    };

    match commands::execute(cli.command, &store_path) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Command failed: {e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "userledger=debug,userledger_core=debug"
    } else {
        "userledger=info,userledger_core=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
