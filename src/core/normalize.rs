//! Canonical normalizer
//!
//! Maps a raw field map into the fixed canonical shape. This stage is
//! pure renaming and defaulting: no range, unit, or allow-list rule
//! lives here (that is the validator's job), and it is a total function —
//! every raw record yields a candidate, possibly one the validator will
//! reject.

use crate::config::AnalyteProfile;
use crate::domain::canonical::CanonicalCandidate;
use crate::domain::raw::RawRecord;

/// Sentinel for a patient identity the parser could not extract
///
/// The normalizer never fabricates a patient id: absence propagates as
/// this literal, which the validator then rejects.
pub const UNKNOWN_PATIENT: &str = "UNKNOWN";

/// Default result status when the vendor sent none
pub const DEFAULT_STATUS: &str = "final";

/// Normalizes a raw record into a canonical-shaped candidate
///
/// Absent optional fields receive format-independent defaults from the
/// analyte profile; the timestamp is left empty when absent (fabricating
/// one is a collaborator concern, not the core's).
pub fn normalize(raw: RawRecord, profile: &AnalyteProfile) -> CanonicalCandidate {
    CanonicalCandidate {
        source: raw.source,
        patient_id: raw
            .patient_id
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_PATIENT.to_string()),
        test_code: raw
            .test_code
            .unwrap_or_else(|| profile.default_code.clone()),
        test_name: raw.test_name.unwrap_or_else(|| profile.name.clone()),
        result_value: raw.result_value,
        unit: raw.unit.unwrap_or_else(|| profile.canonical_unit.clone()),
        reference_range: raw
            .reference_range
            .unwrap_or_else(|| profile.default_reference_range.clone()),
        timestamp: raw.timestamp.unwrap_or_default(),
        lab_name: raw.lab_name.unwrap_or_default(),
        status: DEFAULT_STATUS.to_string(),
        interpretation: raw.interpretation,
    }
}
