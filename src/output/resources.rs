//! FHIR-shaped output resource types
//!
//! A small subset of the FHIR R4 Observation and DiagnosticReport
//! resources, just the fields this pipeline emits. Wire field names
//! (`resourceType`, `valueQuantity`, `effectiveDateTime`,
//! `subject.reference`, coding `system`/`code`) are a de facto contract
//! with downstream receivers and are preserved exactly via serde renames.

use crate::domain::ids::ResourceId;
use serde::{Deserialize, Serialize};

/// LOINC coding system URI
pub const LOINC_SYSTEM: &str = "http://loinc.org";

/// UCUM unit coding system URI
pub const UCUM_SYSTEM: &str = "http://unitsofmeasure.org";

/// FHIR observation category system URI
pub const CATEGORY_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/observation-category";

/// A coded value within a coding system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coding {
    pub system: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

/// A concept expressed as one or more codings plus optional text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeableConcept {
    pub coding: Vec<Coding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CodeableConcept {
    /// The fixed laboratory category carried by every emitted resource
    pub fn laboratory() -> Self {
        Self {
            coding: vec![Coding {
                system: CATEGORY_SYSTEM.to_string(),
                code: "laboratory".to_string(),
                display: Some("Laboratory".to_string()),
            }],
            text: None,
        }
    }
}

/// A measured quantity with both a display unit and a coded UCUM unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
    pub system: String,
    pub code: String,
}

/// A reference to another resource by type-qualified id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub reference: String,
}

/// Observation resource: carries the measured value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(rename = "resourceType")]
    pub resource_type: String,
    pub id: ResourceId,
    pub status: String,
    pub category: Vec<CodeableConcept>,
    pub code: CodeableConcept,
    pub subject: Reference,
    #[serde(
        rename = "effectiveDateTime",
        skip_serializing_if = "Option::is_none"
    )]
    pub effective_date_time: Option<String>,
    #[serde(rename = "valueQuantity")]
    pub value_quantity: Quantity,
}

/// DiagnosticReport resource: references the observation carrying the value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    #[serde(rename = "resourceType")]
    pub resource_type: String,
    pub id: ResourceId,
    pub status: String,
    pub category: Vec<CodeableConcept>,
    pub code: CodeableConcept,
    pub subject: Reference,
    #[serde(
        rename = "effectiveDateTime",
        skip_serializing_if = "Option::is_none"
    )]
    pub effective_date_time: Option<String>,
    pub result: Vec<Reference>,
}

/// The two linked resources emitted per canonical result
///
/// Invariant: the report's first `result` reference resolves to the
/// observation's identifier within the same pair. Pairs are immutable
/// after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourcePair {
    pub observation: Observation,
    pub report: DiagnosticReport,
}
