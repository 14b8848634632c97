// RelayDX - Vendor-agnostic lab result pipeline
// Copyright (c) 2025 RelayDX Contributors
// Licensed under the MIT License

use clap::Parser;
use relaydx::cli::{Cli, Commands};
use relaydx::config::LoggingConfig;
use relaydx::logging::init_logging;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging with console-only config (no file logging for CLI)
    let log_level = cli.log_level.as_deref().unwrap_or("info");
    let logging_config = LoggingConfig::default();
    let _guard = match init_logging(log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "RelayDX - Vendor-agnostic lab result pipeline"
    );

    let exit_code = match &cli.command {
        Commands::Process(args) => args.execute(&cli.config),
        Commands::Inspect(args) => args.execute(&cli.config),
        Commands::ValidateConfig(args) => args.execute(&cli.config),
        Commands::Init(args) => args.execute(),
    };

    match exit_code {
        Ok(code) => process::exit(code),
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
