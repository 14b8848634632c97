//! Process command implementation
//!
//! Runs one file through the full pipeline and emits the batch outcome
//! as JSON: counts, per-record validation errors, the enriched canonical
//! results, and the generated FHIR resource pairs.

use crate::config::load_config_or_default;
use crate::core::pipeline::{BatchResult, Pipeline};
use crate::domain::raw::SourceFormat;
use clap::Args;
use std::fs;
use std::str::FromStr;

/// Arguments for the process command
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Path to the input file
    pub file: String,

    /// Input format (hl7, csv, json); inferred from the file extension
    /// when omitted
    #[arg(short, long)]
    pub format: Option<String>,

    /// Write the batch JSON to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(file = %self.file, "Processing lab result file");

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        let format = match self.resolve_format() {
            Ok(f) => f,
            Err(reason) => {
                println!("❌ {reason}");
                return Ok(2);
            }
        };

        let input = match fs::read_to_string(&self.file) {
            Ok(contents) => contents,
            Err(e) => {
                println!("❌ Failed to read {}: {e}", self.file);
                return Ok(1);
            }
        };

        let pipeline = Pipeline::new(config.analyte);
        let batch = match pipeline.run(&input, format) {
            Ok(batch) => batch,
            Err(e) => {
                println!("❌ Batch failed: {e}");
                return Ok(1);
            }
        };

        println!(
            "✅ {}: {} parsed, {} validated, {} rejected",
            format, batch.raw_count, batch.validated_count, batch.errors.len()
        );
        for error in &batch.errors {
            println!("   rejected: {error}");
        }

        let json = serde_json::to_string_pretty(&batch_json(&batch))?;
        match &self.output {
            Some(path) => {
                fs::write(path, &json)?;
                println!("   output written to {path}");
            }
            None => println!("{json}"),
        }

        Ok(0)
    }

    fn resolve_format(&self) -> Result<SourceFormat, String> {
        match &self.format {
            Some(f) => SourceFormat::from_str(f),
            None => SourceFormat::from_extension(&self.file).ok_or_else(|| {
                format!(
                    "Cannot infer format from '{}', pass --format hl7|csv|json",
                    self.file
                )
            }),
        }
    }
}

/// Serializes the batch with clinical enrichment attached to each result
fn batch_json(batch: &BatchResult) -> serde_json::Value {
    let results: Vec<serde_json::Value> = batch
        .results
        .iter()
        .map(|r| {
            let mut value = serde_json::to_value(r).unwrap_or_default();
            if let Some(map) = value.as_object_mut() {
                map.insert(
                    "clinical_stage".to_string(),
                    r.clinical_stage().to_string().into(),
                );
                map.insert("risk_level".to_string(), r.risk_level().to_string().into());
                map.insert("needs_attention".to_string(), r.needs_attention().into());
            }
            value
        })
        .collect();

    serde_json::json!({
        "source": batch.source,
        "raw_count": batch.raw_count,
        "validated_count": batch.validated_count,
        "errors": batch.errors,
        "results": results,
        "resources": batch.resources,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_format_from_flag() {
        let args = ProcessArgs {
            file: "data.txt".to_string(),
            format: Some("hl7".to_string()),
            output: None,
        };
        assert_eq!(args.resolve_format().unwrap(), SourceFormat::Hl7);
    }

    #[test]
    fn test_resolve_format_from_extension() {
        let args = ProcessArgs {
            file: "data.json".to_string(),
            format: None,
            output: None,
        };
        assert_eq!(args.resolve_format().unwrap(), SourceFormat::Json);
    }

    #[test]
    fn test_resolve_format_unknown_extension() {
        let args = ProcessArgs {
            file: "data.bin".to_string(),
            format: None,
            output: None,
        };
        assert!(args.resolve_format().is_err());
    }

    #[test]
    fn test_batch_json_includes_enrichment() {
        let pipeline = Pipeline::with_defaults();
        let csv = "MRN,NUMERIC_RESULT,RESULT_UNITS\nM1,72,mL/min/1.73m2\n";
        let batch = pipeline.run(csv, SourceFormat::Csv).unwrap();
        let json = batch_json(&batch);
        assert_eq!(json["results"][0]["clinical_stage"], "G2 - Mildly decreased");
        assert_eq!(json["results"][0]["needs_attention"], false);
        assert_eq!(json["validated_count"], 1);
    }
}
