//! Pipeline orchestrator
//!
//! Sequences parse → normalize → validate → enrich → build over one
//! batch. Stages run in strict sequence with no shared mutable state
//! between records; a parse failure aborts the batch, while a failure at
//! normalize/validate time for one record is recorded and processing
//! continues for its siblings. The pipeline holds no process-wide state,
//! so independent batches may run concurrently in the host process.

use crate::config::AnalyteProfile;
use crate::core::{normalize, validate};
use crate::domain::canonical::CanonicalResult;
use crate::domain::raw::{RawRecord, SourceFormat};
use crate::domain::result::Result;
use crate::domain::RelayError;
use crate::ingest;
use crate::output::{build_resource_pair, ResourcePair};
use serde::Serialize;

/// Aggregate outcome of one batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    /// Source format of the batch
    pub source: SourceFormat,

    /// Records the parser extracted
    pub raw_count: usize,

    /// Records that survived validation
    pub validated_count: usize,

    /// Validation error text for each rejected record
    pub errors: Vec<String>,

    /// The validated canonical results, in input order
    pub results: Vec<CanonicalResult>,

    /// One resource pair per validated result, in input order
    pub resources: Vec<ResourcePair>,
}

/// The vendor-transparent processing pipeline
///
/// Owns the analyte profile and exposes the four call boundaries:
/// [`parse`](Self::parse), [`normalize_validate`](Self::normalize_validate),
/// [`build`](Self::build), and the orchestrated [`run`](Self::run).
///
/// # Examples
///
/// ```
/// use relaydx::core::pipeline::Pipeline;
/// use relaydx::domain::raw::SourceFormat;
///
/// let pipeline = Pipeline::with_defaults();
/// let csv = "MRN,NUMERIC_RESULT,RESULT_UNITS\nMRN1,72,mL/min/1.73m2\n";
/// let batch = pipeline.run(csv, SourceFormat::Csv).unwrap();
/// assert_eq!(batch.validated_count, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    profile: AnalyteProfile,
}

impl Pipeline {
    /// Creates a pipeline for the given analyte profile
    pub fn new(profile: AnalyteProfile) -> Self {
        Self { profile }
    }

    /// Creates a pipeline with the built-in eGFR profile
    pub fn with_defaults() -> Self {
        Self::new(AnalyteProfile::default())
    }

    /// The analyte profile this pipeline validates against
    pub fn profile(&self) -> &AnalyteProfile {
        &self.profile
    }

    /// Parses raw input in the declared format into raw records
    ///
    /// # Errors
    ///
    /// Whole-input failures only; see [`crate::domain::ParseError`]
    pub fn parse(&self, input: &str, format: SourceFormat) -> Result<Vec<RawRecord>> {
        Ok(ingest::parse(input, format, &self.profile)?)
    }

    /// Normalizes and validates a batch of raw records
    ///
    /// Returns the validated results alongside the error text of every
    /// rejected record. Rejection never aborts siblings.
    pub fn normalize_validate(
        &self,
        raw: Vec<RawRecord>,
    ) -> (Vec<CanonicalResult>, Vec<String>) {
        let mut valid = Vec::new();
        let mut errors = Vec::new();

        for record in raw {
            let source = record.source;
            let candidate = normalize::normalize(record, &self.profile);
            match validate::validate(candidate, &self.profile) {
                Ok(result) => {
                    tracing::info!(
                        patient = %result.patient_id,
                        value = result.result_value,
                        unit = %result.unit,
                        stage = %result.clinical_stage(),
                        "Validated result"
                    );
                    valid.push(result);
                }
                Err(e) => {
                    tracing::warn!(source = %source, error = %e, "Record failed validation");
                    errors.push(e.to_string());
                }
            }
        }

        (valid, errors)
    }

    /// Builds the output resource pair for one validated result
    pub fn build(&self, result: &CanonicalResult) -> ResourcePair {
        build_resource_pair(result, &self.profile)
    }

    /// Runs the full batch: parse, normalize, validate, enrich, build
    ///
    /// # Errors
    ///
    /// - [`RelayError::Parse`] when the whole input fails to parse or
    ///   contains no matching records
    /// - [`RelayError::NoValidResults`] when parsing succeeded but every
    ///   record failed validation
    pub fn run(&self, input: &str, format: SourceFormat) -> Result<BatchResult> {
        tracing::info!(format = %format, bytes = input.len(), "Processing batch");

        let raw = self.parse(input, format)?;
        let raw_count = raw.len();

        let (results, errors) = self.normalize_validate(raw);

        if results.is_empty() {
            return Err(RelayError::NoValidResults {
                failed: errors.len(),
                errors,
            });
        }

        let resources: Vec<ResourcePair> =
            results.iter().map(|r| self.build(r)).collect();

        tracing::info!(
            raw = raw_count,
            validated = results.len(),
            rejected = errors.len(),
            "Batch complete"
        );

        Ok(BatchResult {
            source: format,
            raw_count,
            validated_count: results.len(),
            errors,
            results,
            resources,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_csv_batch() {
        let pipeline = Pipeline::with_defaults();
        let csv = "\
MRN,PATIENT_LAST,PATIENT_FIRST,NUMERIC_RESULT,RESULT_UNITS,COLLECTION_DATETIME
MRN1,Doe,Jane,72,mL/min/1.73m2,2025-08-06T10:30:00Z
";
        let batch = pipeline.run(csv, SourceFormat::Csv).unwrap();
        assert_eq!(batch.raw_count, 1);
        assert_eq!(batch.validated_count, 1);
        assert!(batch.errors.is_empty());
        assert_eq!(batch.resources.len(), 1);
        assert_eq!(batch.results[0].patient_id, "Doe^Jane^MRN1");
    }

    #[test]
    fn test_partial_failure_isolated() {
        let pipeline = Pipeline::with_defaults();
        // second row out of range, third has a foreign unit
        let csv = "\
MRN,NUMERIC_RESULT,RESULT_UNITS
A,72,mL/min/1.73m2
B,250,mL/min/1.73m2
C,50,mg/dL
";
        let batch = pipeline.run(csv, SourceFormat::Csv).unwrap();
        assert_eq!(batch.raw_count, 3);
        assert_eq!(batch.validated_count, 1);
        assert_eq!(batch.errors.len(), 2);
        assert_eq!(batch.resources.len(), 1);
    }

    #[test]
    fn test_all_invalid_is_no_valid_results() {
        let pipeline = Pipeline::with_defaults();
        let csv = "MRN,NUMERIC_RESULT\n,250\n";
        let err = pipeline.run(csv, SourceFormat::Csv).unwrap_err();
        match err {
            RelayError::NoValidResults { failed, errors } => {
                assert_eq!(failed, 1);
                assert_eq!(errors.len(), 1);
            }
            other => panic!("expected NoValidResults, got {other}"),
        }
    }

    #[test]
    fn test_parse_failure_aborts_batch() {
        let pipeline = Pipeline::with_defaults();
        let err = pipeline.run("{broken", SourceFormat::Json).unwrap_err();
        assert!(matches!(err, RelayError::Parse(_)));
    }

    #[test]
    fn test_resources_reference_their_observation() {
        let pipeline = Pipeline::with_defaults();
        let csv = "MRN,NUMERIC_RESULT,RESULT_UNITS\nA,72,mL/min/1.73m2\nB,95,mL/min/1.73m2\n";
        let batch = pipeline.run(csv, SourceFormat::Csv).unwrap();
        for pair in &batch.resources {
            assert_eq!(
                pair.report.result[0].reference,
                format!("Observation/{}", pair.observation.id)
            );
        }
    }
}
