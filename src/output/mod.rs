//! Output resource construction
//!
//! Builds the paired FHIR-shaped Observation and DiagnosticReport
//! resources emitted per validated result.

pub mod builder;
pub mod resources;

pub use builder::build_resource_pair;
pub use resources::{
    CodeableConcept, Coding, DiagnosticReport, Observation, Quantity, Reference, ResourcePair,
};
