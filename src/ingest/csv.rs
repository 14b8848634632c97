//! Vendor CSV parser
//!
//! Header-driven: each canonical field is resolved from an ordered alias
//! list ([`FieldAliases`]), so differing vendor column names are a data
//! change. Every data row yields exactly one record; a non-numeric value
//! in the result column defaults to `0.0` rather than dropping the row
//! (the validator decides the record's fate). Timestamps are never
//! fabricated here — an absent column stays absent.

use super::fields::{row_to_map, split_csv_line, FieldAliases};
use crate::domain::errors::ParseError;
use crate::domain::raw::{RawRecord, RawValue, SourceFormat};

const PATIENT_ID: FieldAliases = FieldAliases {
    canonical: "patient_id",
    aliases: &["Patient_ID", "MRN", "PATIENT_ID"],
};

const PATIENT_LAST: FieldAliases = FieldAliases {
    canonical: "patient_last",
    aliases: &["PATIENT_LAST", "Patient_Last"],
};

const PATIENT_FIRST: FieldAliases = FieldAliases {
    canonical: "patient_first",
    aliases: &["PATIENT_FIRST", "Patient_First"],
};

const TEST_CODE: FieldAliases = FieldAliases {
    canonical: "test_code",
    aliases: &["Test_LOINC_Code", "TEST_CODE", "Test_Code"],
};

const TEST_NAME: FieldAliases = FieldAliases {
    canonical: "test_name",
    aliases: &["TEST_NAME", "Test_Name"],
};

const RESULT_VALUE: FieldAliases = FieldAliases {
    canonical: "result_value",
    aliases: &["Result", "NUMERIC_RESULT", "Result_Value"],
};

const UNIT: FieldAliases = FieldAliases {
    canonical: "unit",
    aliases: &["Units", "RESULT_UNITS", "Unit"],
};

const TIMESTAMP: FieldAliases = FieldAliases {
    canonical: "timestamp",
    aliases: &["Result_Date", "COLLECTION_DATETIME", "Collection_Date"],
};

const REFERENCE_RANGE: FieldAliases = FieldAliases {
    canonical: "reference_range",
    aliases: &["REFERENCE_RANGE", "Reference_Range"],
};

const INTERPRETATION: FieldAliases = FieldAliases {
    canonical: "interpretation",
    aliases: &["ABNORMAL_FLAG", "Abnormal_Flag", "Interpretation"],
};

const LAB_NAME: FieldAliases = FieldAliases {
    canonical: "lab_name",
    aliases: &["LAB_NAME", "Lab_Name", "Performing_Lab"],
};

/// Parses vendor CSV content into raw records, one per data row
///
/// # Errors
///
/// Returns [`ParseError::NoResultsFound`] when the input has no data rows
pub fn parse_csv(input: &str) -> Result<Vec<RawRecord>, ParseError> {
    let mut lines = input.lines().filter(|l| !l.trim().is_empty());

    let headers: Vec<String> = match lines.next() {
        Some(line) => split_csv_line(line),
        None => {
            return Err(ParseError::no_results(
                SourceFormat::Csv,
                "input is empty",
            ))
        }
    };

    let mut records = Vec::new();

    for line in lines {
        let values = split_csv_line(line);
        let row = row_to_map(&headers, &values);

        let mut record = RawRecord::new(SourceFormat::Csv);
        record.patient_id = composite_patient(&row);
        record.test_code = TEST_CODE.resolve(&row).map(str::to_string);
        record.test_name = TEST_NAME.resolve(&row).map(str::to_string);
        record.result_value = Some(resolve_value(&row));
        record.unit = UNIT.resolve(&row).map(str::to_string);
        record.timestamp = TIMESTAMP.resolve(&row).map(str::to_string);
        record.reference_range = REFERENCE_RANGE.resolve(&row).map(str::to_string);
        record.interpretation = INTERPRETATION.resolve(&row).map(str::to_string);
        record.lab_name = LAB_NAME.resolve(&row).map(str::to_string);

        records.push(record);
    }

    if records.is_empty() {
        return Err(ParseError::no_results(
            SourceFormat::Csv,
            "no data rows after header",
        ));
    }

    tracing::info!(count = records.len(), "Parsed CSV rows");
    Ok(records)
}

/// Assembles the patient field, preferring a composite `Last^First^id`
/// name when the vendor ships separate name columns
fn composite_patient(row: &std::collections::HashMap<String, String>) -> Option<String> {
    let id = PATIENT_ID.resolve(row);
    let last = PATIENT_LAST.resolve(row);
    let first = PATIENT_FIRST.resolve(row);

    match (last, first) {
        (Some(last), Some(first)) => match id {
            Some(id) => Some(format!("{last}^{first}^{id}")),
            None => Some(format!("{last}^{first}")),
        },
        _ => id.map(str::to_string),
    }
}

/// Resolves the numeric result column
///
/// A present but non-numeric value defaults to `0.0` (the row is kept;
/// whether 0.0 survives validation depends on the analyte's floor), as
/// does a missing column.
fn resolve_value(row: &std::collections::HashMap<String, String>) -> RawValue {
    match RESULT_VALUE.resolve(row) {
        Some(text) => match text.parse::<f64>() {
            Ok(n) => RawValue::Number(n),
            Err(_) => {
                tracing::warn!(value = %text, "Non-numeric result value, defaulting to 0");
                RawValue::Number(0.0)
            }
        },
        None => RawValue::Number(0.0),
    }
}
