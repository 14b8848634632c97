//! Raw record types produced by the format parsers
//!
//! A [`RawRecord`] is the loosely-typed, best-effort extraction from one
//! input record before canonical normalization. No invariants hold yet:
//! every field is optional and numeric fields that failed numeric parsing
//! are retained as text rather than dropped.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source wire format of an inbound batch
///
/// Formats are distinguished by a caller-supplied hint (file extension or
/// declared vendor); the pipeline performs no schema discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// HL7 v2 ORU^R01 messages
    Hl7,
    /// Vendor CSV export
    Csv,
    /// Vendor JSON payload
    Json,
}

impl SourceFormat {
    /// Infers the format from a file extension, if recognizable
    ///
    /// # Examples
    ///
    /// ```
    /// use relaydx::domain::raw::SourceFormat;
    ///
    /// assert_eq!(SourceFormat::from_extension("results.hl7"), Some(SourceFormat::Hl7));
    /// assert_eq!(SourceFormat::from_extension("results.csv"), Some(SourceFormat::Csv));
    /// assert_eq!(SourceFormat::from_extension("results.txt"), None);
    /// ```
    pub fn from_extension(path: &str) -> Option<Self> {
        let ext = path.rsplit('.').next()?.to_ascii_lowercase();
        match ext.as_str() {
            "hl7" | "oru" => Some(Self::Hl7),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hl7 => "hl7",
            Self::Csv => "csv",
            Self::Json => "json",
        };
        write!(f, "{name}")
    }
}

impl FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hl7" | "oru" => Ok(Self::Hl7),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "Unknown format '{other}', expected one of: hl7, csv, json"
            )),
        }
    }
}

/// A result value as extracted, before any validation
///
/// Parsers try numeric conversion first and keep the original text when
/// it fails, so the validator can report the offending value instead of
/// silently losing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// A value that parsed as a number
    Number(f64),
    /// A value that did not parse as a number, kept verbatim
    Text(String),
}

impl RawValue {
    /// Parses a raw string, preferring the numeric representation
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.parse::<f64>() {
            Ok(n) => Self::Number(n),
            Err(_) => Self::Text(trimmed.to_string()),
        }
    }

    /// Returns the numeric value, if this is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Format-agnostic extraction from one input record
///
/// Produced by a parser, consumed by the normalizer within a single
/// pipeline pass. Carries the source format tag so downstream stages and
/// batch summaries can attribute a record to its origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Which parser produced this record
    pub source: SourceFormat,

    /// Patient identifier or composite `Last^First^id` name, if extracted
    pub patient_id: Option<String>,

    /// Test code as sent by the vendor (LOINC or vendor-local)
    pub test_code: Option<String>,

    /// Human-readable test label, if sent
    pub test_name: Option<String>,

    /// Measured value; text is retained when numeric parsing failed
    pub result_value: Option<RawValue>,

    /// Unit string as sent
    pub unit: Option<String>,

    /// Collection/result timestamp as sent; never fabricated by a parser
    pub timestamp: Option<String>,

    /// Vendor-supplied reference range, if any
    pub reference_range: Option<String>,

    /// Vendor-supplied interpretation/abnormal flag, if any
    pub interpretation: Option<String>,

    /// Sending laboratory name, if identifiable
    pub lab_name: Option<String>,
}

impl RawRecord {
    /// Creates an empty record tagged with its source format
    pub fn new(source: SourceFormat) -> Self {
        Self {
            source,
            patient_id: None,
            test_code: None,
            test_name: None,
            result_value: None,
            unit: None,
            timestamp: None,
            reference_range: None,
            interpretation: None,
            lab_name: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!(SourceFormat::from_str("hl7").unwrap(), SourceFormat::Hl7);
        assert_eq!(SourceFormat::from_str("CSV").unwrap(), SourceFormat::Csv);
        assert_eq!(SourceFormat::from_str(" json ").unwrap(), SourceFormat::Json);
        assert!(SourceFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            SourceFormat::from_extension("lab/results.HL7"),
            Some(SourceFormat::Hl7)
        );
        assert_eq!(
            SourceFormat::from_extension("export.json"),
            Some(SourceFormat::Json)
        );
        assert_eq!(SourceFormat::from_extension("readme"), None);
    }

    #[test]
    fn test_raw_value_parse_number() {
        assert_eq!(RawValue::parse("72.5"), RawValue::Number(72.5));
        assert_eq!(RawValue::parse(" 60 "), RawValue::Number(60.0));
    }

    #[test]
    fn test_raw_value_parse_retains_text() {
        assert_eq!(RawValue::parse(">60"), RawValue::Text(">60".to_string()));
        assert_eq!(RawValue::parse(">60").as_number(), None);
    }

    #[test]
    fn test_raw_record_starts_empty() {
        let record = RawRecord::new(SourceFormat::Csv);
        assert_eq!(record.source, SourceFormat::Csv);
        assert!(record.patient_id.is_none());
        assert!(record.result_value.is_none());
    }
}
