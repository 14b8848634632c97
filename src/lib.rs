// RelayDX - Vendor-agnostic lab result pipeline
// Copyright (c) 2025 RelayDX Contributors
// Licensed under the MIT License

//! # RelayDX - Vendor-agnostic lab result pipeline
//!
//! RelayDX ingests laboratory test results delivered by independent
//! vendors in three incompatible wire formats — HL7 v2 ORU^R01 messages,
//! vendor CSV exports, and vendor JSON payloads — and converts them into
//! a single canonical representation, validated against clinical domain
//! rules, from which FHIR-style Observation + DiagnosticReport resources
//! are generated.
//!
//! The guarantee: regardless of which lab sent the data, in whatever
//! format, the downstream consumer receives structurally identical,
//! semantically validated output.
//!
//! ## Architecture
//!
//! RelayDX follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`ingest`] - Format parsers (HL7, CSV, JSON)
//! - [`core`] - Normalization, validation, enrichment, orchestration
//! - [`output`] - FHIR-shaped output resource construction
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration and the analyte profile
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```
//! use relaydx::core::pipeline::Pipeline;
//! use relaydx::domain::raw::SourceFormat;
//!
//! let pipeline = Pipeline::with_defaults();
//!
//! let csv = "MRN,NUMERIC_RESULT,RESULT_UNITS\nMRN001,72,mL/min/1.73m2\n";
//! let batch = pipeline.run(csv, SourceFormat::Csv).unwrap();
//!
//! assert_eq!(batch.validated_count, 1);
//! let pair = &batch.resources[0];
//! assert_eq!(
//!     pair.report.result[0].reference,
//!     format!("Observation/{}", pair.observation.id)
//! );
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::RelayError`]. Whole-batch
//! failures (unparseable input, no matching results, no valid results)
//! surface as errors; per-record validation failures are accumulated in
//! the [`core::BatchResult`] instead of aborting the batch.
//!
//! ## Logging
//!
//! RelayDX uses structured logging with the `tracing` crate:
//!
//! ```
//! use tracing::{info, warn};
//!
//! info!(count = 3, "Parsed HL7 observations");
//! warn!(value = "PENDING", "Non-numeric result value, defaulting to 0");
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod ingest;
pub mod logging;
pub mod output;
