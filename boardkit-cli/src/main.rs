//! `Boardkit` CLI - Command-line interface for `Boardkit` layout documents
//!
//! Provides commands for creating, inspecting, validating and editing page
//! layouts stored in a documents directory.

mod cli;
mod commands;
mod error;
mod util;

use boardkit_core::config::LoggingSettings;
use boardkit_core::tracing::{TracingConfig, TracingLevel, init_tracing};
use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        // Commands report a broken settings file themselves.
        let logging = util::create_config_manager(cli.config.as_deref())
            .ok()
            .and_then(|manager| manager.load_settings().ok())
            .map(|settings| settings.logging)
            .unwrap_or_default();
        if let Err(e) = init_tracing(&tracing_config(&logging, cli.verbose)) {
            eprintln!("Warning: {e}");
        }
    }

    let result = commands::dispatch(&cli.context(), cli.command);

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}

/// Builds the tracing setup from the `[logging]` section and `-v` count
fn tracing_config(logging: &LoggingSettings, verbose: u8) -> TracingConfig {
    let config = TracingConfig::new()
        .with_level(TracingLevel::from_verbosity(logging.level, verbose))
        .with_targets(verbose > 2);
    match &logging.filter {
        Some(filter) => config.with_filter(filter.clone()),
        None => config,
    }
}
