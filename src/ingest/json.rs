//! Vendor JSON parser
//!
//! Vendor payloads expose a test catalogue array under one of several
//! known top-level keys. The parser scans the catalogue and keeps only
//! entries matching the target analyte predicate (keyword match on the
//! test name, or a known vendor/LOINC code); non-matching entries are
//! discarded. Patient identity is assembled from separate name/DOB
//! sub-fields into one composite `Last^First^dob` string.

use crate::config::AnalyteProfile;
use crate::domain::errors::ParseError;
use crate::domain::raw::{RawRecord, RawValue, SourceFormat};
use serde_json::Value;

/// Top-level keys a vendor may nest the test catalogue under
const CATALOGUE_KEYS: &[&str] = &["labResults", "testResults", "results"];

/// Parses a vendor JSON payload into raw records for the target analyte
///
/// # Errors
///
/// - [`ParseError::InvalidFormat`] on malformed JSON syntax or a
///   non-object root
/// - [`ParseError::NoResultsFound`] when no catalogue key is present or
///   no entry matches the analyte
pub fn parse_json(input: &str, profile: &AnalyteProfile) -> Result<Vec<RawRecord>, ParseError> {
    let data: Value = serde_json::from_str(input)
        .map_err(|e| ParseError::invalid_format(SourceFormat::Json, e.to_string()))?;

    let root = data.as_object().ok_or_else(|| {
        ParseError::invalid_format(SourceFormat::Json, "top-level value is not an object")
    })?;

    let catalogue = CATALOGUE_KEYS
        .iter()
        .find_map(|key| root.get(*key).and_then(Value::as_array))
        .ok_or_else(|| {
            ParseError::no_results(
                SourceFormat::Json,
                format!("no test catalogue under any of: {}", CATALOGUE_KEYS.join(", ")),
            )
        })?;

    let patient_id = composite_patient(root.get("patientIdentification"));
    let timestamp = string_field(&data, &["timeStamp", "timestamp"]);
    let lab_name = string_field(&data, &["laboratory", "labName"]);

    let mut records = Vec::new();

    for entry in catalogue {
        let test_name = string_field(entry, &["biomarkerName", "testName"]).unwrap_or_default();
        let vendor_code = string_field(entry, &["testCode"]).unwrap_or_default();

        if !profile.matches_entry(&test_name, &vendor_code) {
            tracing::debug!(test_name = %test_name, code = %vendor_code, "Skipping non-matching entry");
            continue;
        }

        let mut record = RawRecord::new(SourceFormat::Json);
        record.patient_id = patient_id.clone();
        record.test_code = coding_code(entry);
        record.test_name = (!test_name.is_empty()).then(|| test_name.clone());
        record.timestamp = timestamp.clone();
        record.lab_name = lab_name.clone();
        record.interpretation = string_field(entry, &["descriptor", "interpretation"]);

        if let Some(quantity) = entry.get("quantitativeValue") {
            record.result_value = raw_value(quantity.get("value"));
            record.unit = string_field(quantity, &["unit"]);
            record.reference_range = bounds_range(quantity);
        }

        records.push(record);
    }

    if records.is_empty() {
        return Err(ParseError::no_results(
            SourceFormat::Json,
            format!("no {} entries in test catalogue", profile.name),
        ));
    }

    tracing::info!(count = records.len(), analyte = %profile.name, "Parsed JSON entries");
    Ok(records)
}

/// Assembles `Last^First^dob` from the patient identification block,
/// filling missing parts with `UNK` (the block itself being absent means
/// no patient at all)
fn composite_patient(patient: Option<&Value>) -> Option<String> {
    let patient = patient?.as_object()?;
    let part = |key: &str| {
        patient
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("UNK")
            .to_string()
    };
    Some(format!(
        "{}^{}^{}",
        part("lastName"),
        part("firstName"),
        part("dob")
    ))
}

/// First LOINC code of the entry's `coding` array, if any
fn coding_code(entry: &Value) -> Option<String> {
    entry
        .get("coding")?
        .as_array()?
        .first()?
        .get("code")?
        .as_str()
        .map(str::to_string)
}

/// Formats `lowerBound-upperBound` when both bounds are present
fn bounds_range(quantity: &Value) -> Option<String> {
    let lower = quantity.get("lowerBound").and_then(Value::as_f64)?;
    let upper = quantity.get("upperBound").and_then(Value::as_f64)?;
    Some(format!("{lower}-{upper}"))
}

/// Converts a JSON value to a raw measurement, retaining non-numeric text
fn raw_value(value: Option<&Value>) -> Option<RawValue> {
    match value? {
        Value::Number(n) => n.as_f64().map(RawValue::Number),
        Value::String(s) => Some(RawValue::parse(s)),
        _ => None,
    }
}

/// First present non-empty string among the given keys
fn string_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        value
            .get(*key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}
