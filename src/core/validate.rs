//! Canonical validator
//!
//! Enforces the domain invariants on a canonical candidate. Rules apply
//! independently with collect-all semantics: a rejected record reports
//! every violated rule, and any single violation rejects the record.
//!
//! One documented asymmetry: an unrecognized `test_code` is *coerced* to
//! the analyte's default LOINC code instead of rejecting the record,
//! unlike the unit and value rules which reject.

use crate::config::AnalyteProfile;
use crate::domain::canonical::{CanonicalCandidate, CanonicalResult};
use crate::domain::errors::ValidationError;
use crate::domain::raw::RawValue;
use chrono::DateTime;

/// Validates a candidate against the analyte's domain rules
///
/// # Errors
///
/// Returns a [`ValidationError`] listing every violated rule. Rejection
/// of one record must never abort its siblings; callers accumulate the
/// error text into the batch summary.
pub fn validate(
    candidate: CanonicalCandidate,
    profile: &AnalyteProfile,
) -> Result<CanonicalResult, ValidationError> {
    let mut violations = ValidationError::new();

    let patient_id = candidate.patient_id.trim().to_string();
    if patient_id.is_empty() || patient_id == crate::core::normalize::UNKNOWN_PATIENT {
        violations.push("patient ID cannot be empty or unknown");
    }

    let result_value = match &candidate.result_value {
        Some(RawValue::Number(v)) => {
            if !profile.in_range(*v) {
                violations.push(format!(
                    "{} value {} outside expected range ({}-{})",
                    profile.name, v, profile.min_value, profile.max_value
                ));
            }
            *v
        }
        Some(RawValue::Text(text)) => {
            violations.push(format!("result value '{text}' is not numeric"));
            f64::NAN
        }
        None => {
            violations.push("result value is missing");
            f64::NAN
        }
    };

    let unit = match profile.match_unit(&candidate.unit) {
        Some(canonical) => canonical,
        None => {
            violations.push(format!(
                "invalid {} unit: '{}'",
                profile.name, candidate.unit
            ));
            candidate.unit.clone()
        }
    };

    // Unknown codes auto-correct to the default rather than rejecting
    let test_code = if profile.is_allowed_code(&candidate.test_code) {
        candidate.test_code.clone()
    } else {
        tracing::debug!(
            code = %candidate.test_code,
            default = %profile.default_code,
            "Coercing unrecognized test code to default"
        );
        profile.default_code.clone()
    };

    // Timestamps are a collaborator concern; an unparseable one is worth
    // a warning but never a rejection
    if !candidate.timestamp.is_empty()
        && DateTime::parse_from_rfc3339(&candidate.timestamp).is_err()
    {
        tracing::warn!(
            timestamp = %candidate.timestamp,
            source = %candidate.source,
            "Timestamp is not RFC 3339, passing through as-is"
        );
    }

    violations.into_result(CanonicalResult {
        patient_id,
        test_code,
        test_name: candidate.test_name,
        result_value,
        unit,
        reference_range: candidate.reference_range,
        timestamp: candidate.timestamp,
        lab_name: candidate.lab_name,
        status: candidate.status,
        interpretation: candidate.interpretation,
    })
}
