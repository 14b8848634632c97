//! Format parsers
//!
//! One parser per supported wire format, each turning raw text into an
//! ordered sequence of [`RawRecord`]s. The shared policy: tolerant of
//! unknown or missing fields, strict about emitting at least one record
//! or failing loudly, and never fatal on a single bad record when others
//! are available.
//!
//! [`RawRecord`]: crate::domain::raw::RawRecord

pub mod csv;
pub mod fields;
pub mod hl7;
pub mod json;

use crate::config::AnalyteProfile;
use crate::domain::errors::ParseError;
use crate::domain::raw::{RawRecord, SourceFormat};

/// Dispatches to the parser for the caller-declared format
///
/// # Errors
///
/// Propagates the parser's whole-input failures
/// ([`ParseError::InvalidFormat`], [`ParseError::NoResultsFound`])
pub fn parse(
    input: &str,
    format: SourceFormat,
    profile: &AnalyteProfile,
) -> Result<Vec<RawRecord>, ParseError> {
    match format {
        SourceFormat::Hl7 => hl7::parse_hl7(input),
        SourceFormat::Csv => csv::parse_csv(input),
        SourceFormat::Json => json::parse_json(input, profile),
    }
}
