//! HL7 v2 ORU^R01 parser
//!
//! Splits the input into messages at `MSH` header boundaries, then walks
//! each message's segments in order, tracking context:
//!
//! - `PID` sets the active patient identifier (PID-3, first component)
//! - `OBR` sets the shared collection timestamp (OBR-7) for subsequent
//!   observations
//! - each `OBX` yields one [`RawRecord`] inheriting the current context
//!
//! Field positions are format-fixed; a missing field index is treated as
//! absent, never fatal. A malformed segment among good ones is logged and
//! skipped. Only two failures cover the whole input: no `MSH` headers at
//! all (`InvalidFormat`) and no `OBX` segments anywhere (`NoResultsFound`).

use crate::domain::errors::ParseError;
use crate::domain::raw::{RawRecord, RawValue, SourceFormat};

/// Parses HL7 v2 content into raw records, one per OBX segment
///
/// # Errors
///
/// - [`ParseError::InvalidFormat`] when the input contains no MSH headers
/// - [`ParseError::NoResultsFound`] when no message contains an OBX segment
pub fn parse_hl7(input: &str) -> Result<Vec<RawRecord>, ParseError> {
    let messages = split_messages(input)?;
    tracing::debug!(count = messages.len(), "Found HL7 messages");

    let mut records = Vec::new();

    for (index, message) in messages.iter().enumerate() {
        let mut patient_id: Option<String> = None;
        let mut timestamp: Option<String> = None;
        let mut lab_name: Option<String> = None;

        for line in message {
            let fields: Vec<&str> = line.split('|').collect();
            match fields[0] {
                "MSH" => {
                    // MSH-1 is the field separator itself, so the sending
                    // facility (MSH-4) sits at index 3
                    lab_name = component(&fields, 3, 0);
                }
                "PID" => {
                    if let Some(id) = component(&fields, 3, 0) {
                        patient_id = Some(id);
                    } else {
                        tracing::warn!(message = index + 1, "PID segment without identifier");
                    }
                }
                "OBR" => {
                    if let Some(ts) = component(&fields, 7, 0) {
                        timestamp = Some(ts);
                    }
                }
                "OBX" => {
                    match observation(&fields, &patient_id, &timestamp, &lab_name) {
                        Some(record) => records.push(record),
                        None => {
                            tracing::warn!(
                                message = index + 1,
                                segment = %line,
                                "Skipping malformed OBX segment"
                            );
                        }
                    }
                }
                _ => {} // NTE, ORC and friends carry nothing we extract
            }
        }
    }

    if records.is_empty() {
        return Err(ParseError::no_results(
            SourceFormat::Hl7,
            "no OBX observation segments in any message",
        ));
    }

    tracing::info!(count = records.len(), "Parsed HL7 observations");
    Ok(records)
}

/// Splits raw content into messages at MSH boundaries
fn split_messages(input: &str) -> Result<Vec<Vec<&str>>, ParseError> {
    let mut messages: Vec<Vec<&str>> = Vec::new();

    for line in input.lines() {
        let line = line.trim_end_matches('\r').trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("MSH") {
            messages.push(vec![line]);
        } else if let Some(current) = messages.last_mut() {
            current.push(line);
        } else {
            tracing::warn!(segment = %line, "Segment before first MSH header, skipping");
        }
    }

    if messages.is_empty() {
        return Err(ParseError::invalid_format(
            SourceFormat::Hl7,
            "no MSH message headers found",
        ));
    }

    Ok(messages)
}

/// Builds one raw record from an OBX segment, or `None` when the segment
/// carries neither an observation identifier nor a value
fn observation(
    fields: &[&str],
    patient_id: &Option<String>,
    timestamp: &Option<String>,
    lab_name: &Option<String>,
) -> Option<RawRecord> {
    let test_code = component(fields, 3, 0);
    let test_name = component(fields, 3, 1);
    let value = component(fields, 5, 0);
    let unit = component(fields, 6, 0);

    if test_code.is_none() && value.is_none() {
        return None;
    }

    let mut record = RawRecord::new(SourceFormat::Hl7);
    record.patient_id = patient_id.clone();
    record.test_code = test_code;
    record.test_name = test_name;
    record.result_value = value.map(|v| RawValue::parse(&v));
    record.unit = unit;
    record.timestamp = timestamp.clone();
    record.lab_name = lab_name.clone();
    record.reference_range = component(fields, 7, 0);
    record.interpretation = component(fields, 8, 0);
    Some(record)
}

/// Extracts one `^`-separated component of a `|`-separated field
///
/// Repetitions (`~`) collapse to the first occurrence. Returns `None`
/// when the field index is out of range or the component is empty.
fn component(fields: &[&str], field: usize, comp: usize) -> Option<String> {
    let raw = fields.get(field)?;
    let first_repetition = raw.split('~').next().unwrap_or("");
    let value = first_repetition.split('^').nth(comp)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
