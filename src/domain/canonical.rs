//! Canonical result model
//!
//! The canonical representation is the vendor-agnostic shape every parsed
//! record is normalized into. [`CanonicalCandidate`] is the normalizer's
//! output before validation; [`CanonicalResult`] only exists once the
//! validator has accepted a candidate, so holding one is proof that all
//! domain invariants hold.

use super::raw::{RawValue, SourceFormat};
use serde::{Deserialize, Serialize};

/// A canonical-shaped record that has not been validated yet
///
/// Produced by the normalizer, which is a total function: absent fields
/// have been defaulted (including the literal `"UNKNOWN"` patient
/// sentinel for a missing patient id), but no range, unit, or code rule
/// has been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalCandidate {
    /// Source format of the originating record
    pub source: SourceFormat,

    /// Patient identifier; `"UNKNOWN"` when the parser extracted nothing
    pub patient_id: String,

    /// Test code, possibly vendor-local at this point
    pub test_code: String,

    /// Human-readable test label
    pub test_name: String,

    /// Measured value; still possibly text or out of range
    pub result_value: Option<RawValue>,

    /// Unit string, not yet canonicalized
    pub unit: String,

    /// Reference range display string
    pub reference_range: String,

    /// Timestamp as sent; empty when absent (collaborators default it)
    pub timestamp: String,

    /// Sending laboratory name; empty when unidentified
    pub lab_name: String,

    /// Result status
    pub status: String,

    /// Vendor interpretation/abnormal flag, when sent
    pub interpretation: Option<String>,
}

/// The validated canonical lab result
///
/// Every instance satisfies the domain invariants: non-empty,
/// non-sentinel patient id; allow-listed test code; numeric value within
/// the analyte's physiological range; unit in its single canonical
/// spelling. Clinical attributes (stage, risk, attention flag) are
/// recomputed from `result_value` on demand and never stored, so they
/// cannot diverge from the measured value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalResult {
    /// Patient identifier or composite `Last^First^id` name
    pub patient_id: String,

    /// Allow-listed LOINC code
    pub test_code: String,

    /// Human-readable test label
    pub test_name: String,

    /// Measured value within the analyte's plausible range
    pub result_value: f64,

    /// Canonical unit spelling
    pub unit: String,

    /// Reference range display string
    pub reference_range: String,

    /// ISO-8601 timestamp as sent; empty when the vendor sent none
    pub timestamp: String,

    /// Sending laboratory name; may be empty
    pub lab_name: String,

    /// Result status, normally `"final"`
    pub status: String,

    /// Vendor interpretation, when sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<String>,
}
