//! Output resource builder
//!
//! Deterministic construction of the linked Observation +
//! DiagnosticReport pair from a validated canonical result. Two fresh
//! identifiers per call; the report's `result` reference always points at
//! this call's observation. This stage never fails on a validated input —
//! the validator has already excluded anything malformed.

use super::resources::{
    CodeableConcept, Coding, DiagnosticReport, Observation, Quantity, Reference, ResourcePair,
    LOINC_SYSTEM, UCUM_SYSTEM,
};
use crate::config::AnalyteProfile;
use crate::domain::canonical::CanonicalResult;
use crate::domain::ids::ResourceId;

/// Builds the Observation + DiagnosticReport pair for one result
pub fn build_resource_pair(result: &CanonicalResult, profile: &AnalyteProfile) -> ResourcePair {
    let observation_id = ResourceId::generate();
    let report_id = ResourceId::generate();

    let code = CodeableConcept {
        coding: vec![Coding {
            system: LOINC_SYSTEM.to_string(),
            code: result.test_code.clone(),
            display: Some(result.test_name.clone()),
        }],
        text: Some(result.test_name.clone()),
    };

    let subject = Reference {
        reference: format!("Patient/{}", result.patient_id),
    };

    let effective_date_time =
        (!result.timestamp.is_empty()).then(|| result.timestamp.clone());

    let observation = Observation {
        resource_type: "Observation".to_string(),
        id: observation_id.clone(),
        status: result.status.clone(),
        category: vec![CodeableConcept::laboratory()],
        code: code.clone(),
        subject: subject.clone(),
        effective_date_time: effective_date_time.clone(),
        value_quantity: Quantity {
            value: result.result_value,
            unit: result.unit.clone(),
            system: UCUM_SYSTEM.to_string(),
            code: profile.ucum_code.clone(),
        },
    };

    let report = DiagnosticReport {
        resource_type: "DiagnosticReport".to_string(),
        id: report_id,
        status: result.status.clone(),
        category: vec![CodeableConcept::laboratory()],
        code,
        subject,
        effective_date_time,
        result: vec![Reference {
            reference: format!("Observation/{observation_id}"),
        }],
    };

    ResourcePair {
        observation,
        report,
    }
}
