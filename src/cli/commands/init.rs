//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "relaydx.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing RelayDX configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::starter_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} to adjust the analyte profile", self.output);
                println!("  2. Run: relaydx process <file> [--format hl7|csv|json]");
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write {}: {e}", self.output);
                Ok(1)
            }
        }
    }

    /// Starter configuration mirroring the built-in eGFR defaults
    fn starter_config() -> &'static str {
        r#"# RelayDX configuration

[application]
name = "relaydx"
log_level = "info"

# Target analyte profile. The defaults below describe eGFR (CKD-EPI);
# supporting another analyte is a matter of changing this section.
[analyte]
name = "eGFR (CKD-EPI)"
default_code = "98979-8"
code_allow_list = ["98979-8", "33914-3", "62238-1"]
vendor_codes = ["EGFR001", "EGFR"]
keywords = ["EGFR", "GLOMERULAR"]
canonical_unit = "mL/min/1.73m2"
unit_variants = ["mL/min/1.73 m²", "ml/min/1.73m2"]
unit_fragments = ["ml/min", "1.73"]
ucum_code = "mL/min/{1.73_m2}"
min_value = 0.0
max_value = 200.0
default_reference_range = ">=90"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RelayConfig;

    #[test]
    fn test_starter_config_parses_and_validates() {
        let config: RelayConfig = toml::from_str(InitArgs::starter_config()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.analyte.default_code, "98979-8");
    }
}
