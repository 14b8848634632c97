//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for RelayDX using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// RelayDX - Vendor-agnostic lab result pipeline
#[derive(Parser, Debug)]
#[command(name = "relaydx")]
#[command(version, about, long_about = None)]
#[command(author = "RelayDX Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "relaydx.toml", env = "RELAYDX_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RELAYDX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process a lab result file through the full pipeline
    Process(commands::process::ProcessArgs),

    /// Parse a lab result file and show the raw extraction
    Inspect(commands::inspect::InspectArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
