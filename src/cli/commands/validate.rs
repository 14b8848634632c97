//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the RelayDX configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Application: {}", config.application.name);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Analyte: {}", config.analyte.name);
        println!("  Default LOINC: {}", config.analyte.default_code);
        println!(
            "  LOINC Allow-list: {}",
            config.analyte.code_allow_list.join(", ")
        );
        println!("  Canonical Unit: {}", config.analyte.canonical_unit);
        println!(
            "  Value Range: {} - {}",
            config.analyte.min_value, config.analyte.max_value
        );
        println!("  File Logging: {}", config.logging.local_enabled);

        Ok(0)
    }
}
