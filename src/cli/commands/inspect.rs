//! Inspect command implementation
//!
//! Parses a file and prints the raw extraction without normalizing or
//! validating, for debugging vendor feeds.

use crate::config::load_config_or_default;
use crate::core::pipeline::Pipeline;
use crate::domain::raw::SourceFormat;
use clap::Args;
use std::fs;
use std::str::FromStr;

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the input file
    pub file: String,

    /// Input format (hl7, csv, json); inferred from the file extension
    /// when omitted
    #[arg(short, long)]
    pub format: Option<String>,
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(file = %self.file, "Inspecting lab result file");

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        let format = match &self.format {
            Some(f) => match SourceFormat::from_str(f) {
                Ok(f) => f,
                Err(reason) => {
                    println!("❌ {reason}");
                    return Ok(2);
                }
            },
            None => match SourceFormat::from_extension(&self.file) {
                Some(f) => f,
                None => {
                    println!(
                        "❌ Cannot infer format from '{}', pass --format hl7|csv|json",
                        self.file
                    );
                    return Ok(2);
                }
            },
        };

        let input = match fs::read_to_string(&self.file) {
            Ok(contents) => contents,
            Err(e) => {
                println!("❌ Failed to read {}: {e}", self.file);
                return Ok(1);
            }
        };

        let pipeline = Pipeline::new(config.analyte);
        match pipeline.parse(&input, format) {
            Ok(records) => {
                println!("✅ {} record(s) extracted from {} input", records.len(), format);
                println!("{}", serde_json::to_string_pretty(&records)?);
                Ok(0)
            }
            Err(e) => {
                println!("❌ Parse failed: {e}");
                Ok(1)
            }
        }
    }
}
