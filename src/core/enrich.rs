//! Clinical enrichment
//!
//! Pure, deterministic functions of the measured value. Enriched
//! attributes are recomputed on demand and never stored independently,
//! so they cannot diverge from `result_value`.
//!
//! Threshold convention: boundary values belong to the *higher* (better)
//! bucket, i.e. `>=` comparisons in descending threshold order — an eGFR
//! of exactly 90.0 is "Normal or high", 89.9 is "Mildly decreased".

use crate::domain::canonical::CanonicalResult;
use serde::Serialize;
use std::fmt;

/// CKD G-stage classification of an eGFR value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClinicalStage {
    /// eGFR >= 90
    G1,
    /// eGFR 60-89
    G2,
    /// eGFR 45-59
    G3a,
    /// eGFR 30-44
    G3b,
    /// eGFR 15-29
    G4,
    /// eGFR < 15
    G5,
}

impl fmt::Display for ClinicalStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::G1 => "G1 - Normal or high",
            Self::G2 => "G2 - Mildly decreased",
            Self::G3a => "G3a - Mild to moderately decreased",
            Self::G3b => "G3b - Moderately to severely decreased",
            Self::G4 => "G4 - Severely decreased",
            Self::G5 => "G5 - Kidney failure",
        };
        write!(f, "{label}")
    }
}

/// Clinical risk tier keyed to the same thresholds, coarser buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    /// eGFR >= 90
    Low,
    /// eGFR 60-89
    LowModerate,
    /// eGFR 30-59
    ModerateHigh,
    /// eGFR < 30
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "Low",
            Self::LowModerate => "Low-Moderate",
            Self::ModerateHigh => "Moderate-High",
            Self::High => "High",
        };
        write!(f, "{label}")
    }
}

/// Six-bucket CKD stage of a result value
pub fn clinical_stage(value: f64) -> ClinicalStage {
    if value >= 90.0 {
        ClinicalStage::G1
    } else if value >= 60.0 {
        ClinicalStage::G2
    } else if value >= 45.0 {
        ClinicalStage::G3a
    } else if value >= 30.0 {
        ClinicalStage::G3b
    } else if value >= 15.0 {
        ClinicalStage::G4
    } else {
        ClinicalStage::G5
    }
}

/// Four-bucket risk tier of a result value
pub fn risk_level(value: f64) -> RiskLevel {
    if value >= 90.0 {
        RiskLevel::Low
    } else if value >= 60.0 {
        RiskLevel::LowModerate
    } else if value >= 30.0 {
        RiskLevel::ModerateHigh
    } else {
        RiskLevel::High
    }
}

/// True iff the value indicates need for clinical follow-up (< 60,
/// CKD stage 3 or worse)
pub fn needs_attention(value: f64) -> bool {
    value < 60.0
}

impl CanonicalResult {
    /// CKD stage, recomputed from the measured value
    pub fn clinical_stage(&self) -> ClinicalStage {
        clinical_stage(self.result_value)
    }

    /// Risk tier, recomputed from the measured value
    pub fn risk_level(&self) -> RiskLevel {
        risk_level(self.result_value)
    }

    /// Follow-up flag, recomputed from the measured value
    pub fn needs_attention(&self) -> bool {
        needs_attention(self.result_value)
    }
}
