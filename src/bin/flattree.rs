//! Flattree CLI Binary

use clap::Parser;
use flattree::logging::init_logging;
use flattree::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(Some(&config.logging)) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    let context = match CliContext::new(config, cli.store.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize CLI context");
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            if e.is_client_error() {
                tracing::warn!(status = e.status_code(), error = %e, "{}", e.title());
            } else {
                tracing::error!(status = e.status_code(), error = %e, "{}", e.title());
            }
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
