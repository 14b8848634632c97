//! Domain error types
//!
//! This module defines the error hierarchy for RelayDX. All errors are
//! domain-specific and don't expose third-party types.
//!
//! The taxonomy distinguishes whole-batch failures from per-record ones:
//!
//! - [`ParseError`] — the input could not be parsed at all, or parsed but
//!   contained no matching results. Fatal to the batch.
//! - [`ValidationError`] — a single canonical record violated one or more
//!   domain invariants. Non-fatal; the record is excluded and the reasons
//!   are retained in the batch summary.
//! - [`RelayError::NoValidResults`] — parsing succeeded but every record
//!   failed validation. Fatal, but distinguishable from parse failures.

use super::raw::SourceFormat;
use thiserror::Error;

/// Main RelayDX error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Whole-input parse failures
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Per-record validation failures
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Every record in the batch failed validation
    ///
    /// Parsing itself succeeded, so this is reported separately from
    /// [`ParseError`] to let callers distinguish "bad input" from
    /// "structurally fine input with no usable results".
    #[error("No valid results: all {failed} parsed records failed validation")]
    NoValidResults { failed: usize, errors: Vec<String> },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Whole-input parse failures
///
/// A single malformed segment, row, or entry among good ones is skipped
/// and logged, never surfaced as a `ParseError`. Only failures covering
/// the entire input are fatal.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input bytes do not parse as the declared format at all
    #[error("Input is not valid {format}: {reason}")]
    InvalidFormat {
        format: SourceFormat,
        reason: String,
    },

    /// Input parsed structurally but contained zero matching records
    #[error("No results found in {format} input: {reason}")]
    NoResultsFound {
        format: SourceFormat,
        reason: String,
    },
}

impl ParseError {
    /// Creates an `InvalidFormat` error
    pub fn invalid_format(format: SourceFormat, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            format,
            reason: reason.into(),
        }
    }

    /// Creates a `NoResultsFound` error
    pub fn no_results(format: SourceFormat, reason: impl Into<String>) -> Self {
        Self::NoResultsFound {
            format,
            reason: reason.into(),
        }
    }
}

/// Validation failure for a single canonical record
///
/// Violations are collected rather than reported fail-fast, so a rejected
/// record lists every rule it broke. Any single violation is sufficient
/// to reject the record.
#[derive(Debug, Clone, Error)]
#[error("{}", violations.join("; "))]
pub struct ValidationError {
    /// Every rule the record violated, in evaluation order
    pub violations: Vec<String>,
}

impl ValidationError {
    /// Creates an empty violation collector
    pub fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    /// Records a violation
    pub fn push(&mut self, violation: impl Into<String>) {
        self.violations.push(violation.into());
    }

    /// Returns true if no violations were recorded
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Converts the collector into a result: `Ok(value)` when empty,
    /// `Err(self)` when any violation was recorded
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationError> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl Default for ValidationError {
    fn default() -> Self {
        Self::new()
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for RelayError {
    fn from(err: std::io::Error) -> Self {
        RelayError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for RelayError {
    fn from(err: toml::de::Error) -> Self {
        RelayError::Configuration(format!("TOML parse error: {err}"))
    }
}
