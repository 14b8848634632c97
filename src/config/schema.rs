//! Configuration schema types
//!
//! This module defines the configuration structure for RelayDX. The
//! analyte profile is configuration rather than code: the shipped
//! defaults describe eGFR, and supporting another analyte is a data
//! change (new ranges, unit spellings, codes) rather than a code change.

use serde::{Deserialize, Serialize};

/// Main RelayDX configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section has defaults, so an absent file yields a working
/// eGFR pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RelayConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Target analyte profile (defaults to eGFR)
    #[serde(default)]
    pub analyte: AnalyteProfile,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RelayConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.analyte.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name used in log output
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    /// Validates application settings
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("application.name cannot be empty".to_string());
        }
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(format!(
                "application.log_level '{other}' is invalid, expected one of: trace, debug, info, warn, error"
            )),
        }
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

/// Profile of the target analyte
///
/// Drives parsing (JSON entry matching), normalization defaults, and
/// validation (value range, unit family, LOINC allow-list). The default
/// profile is eGFR (CKD-EPI).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyteProfile {
    /// Human-readable test name, used as the default `test_name`
    #[serde(default = "default_test_name")]
    pub name: String,

    /// LOINC code unrecognized codes are coerced to
    #[serde(default = "default_loinc_code")]
    pub default_code: String,

    /// LOINC codes accepted without coercion
    #[serde(default = "default_code_allow_list")]
    pub code_allow_list: Vec<String>,

    /// Vendor-local codes that identify this analyte in vendor payloads
    #[serde(default = "default_vendor_codes")]
    pub vendor_codes: Vec<String>,

    /// Uppercase keywords matched against vendor test names
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,

    /// The single canonical unit spelling
    #[serde(default = "default_canonical_unit")]
    pub canonical_unit: String,

    /// Accepted unit spellings, normalized to `canonical_unit`
    #[serde(default = "default_unit_variants")]
    pub unit_variants: Vec<String>,

    /// Fragments that must all appear (case/space-insensitively) in an
    /// otherwise unrecognized unit string for it to normalize
    #[serde(default = "default_unit_fragments")]
    pub unit_fragments: Vec<String>,

    /// UCUM code reported alongside the canonical unit in output resources
    #[serde(default = "default_ucum_code")]
    pub ucum_code: String,

    /// Inclusive lower bound of the physiologically plausible range
    #[serde(default = "default_min_value")]
    pub min_value: f64,

    /// Inclusive upper bound of the physiologically plausible range
    #[serde(default = "default_max_value")]
    pub max_value: f64,

    /// Default reference range display string
    #[serde(default = "default_reference_range")]
    pub default_reference_range: String,
}

impl AnalyteProfile {
    /// Validates the profile
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("analyte.name cannot be empty".to_string());
        }
        if self.default_code.trim().is_empty() {
            return Err("analyte.default_code cannot be empty".to_string());
        }
        if self.canonical_unit.trim().is_empty() {
            return Err("analyte.canonical_unit cannot be empty".to_string());
        }
        if self.min_value >= self.max_value {
            return Err(format!(
                "analyte value range is empty: min {} >= max {}",
                self.min_value, self.max_value
            ));
        }
        Ok(())
    }

    /// Returns true if the code is on the LOINC allow-list
    pub fn is_allowed_code(&self, code: &str) -> bool {
        self.code_allow_list.iter().any(|c| c == code)
    }

    /// Returns true if a vendor entry with this name/code is the target analyte
    ///
    /// Matching is the parsers' selection predicate: a keyword substring
    /// match against the (uppercased) test name, or an exact match against
    /// a vendor-local or allow-listed code.
    pub fn matches_entry(&self, test_name: &str, test_code: &str) -> bool {
        let name_upper = test_name.to_uppercase();
        self.keywords.iter().any(|k| name_upper.contains(k))
            || self.vendor_codes.iter().any(|c| c == test_code)
            || (!test_code.is_empty() && self.is_allowed_code(test_code))
    }

    /// Attempts to normalize a unit string to the canonical spelling
    ///
    /// Matching is case- and whitespace-insensitive against the canonical
    /// unit and the accepted variants; failing that, a string containing
    /// every configured fragment also normalizes. Returns `None` when the
    /// unit is not part of the analyte's unit family.
    pub fn match_unit(&self, unit: &str) -> Option<String> {
        let folded = fold_unit(unit);
        if folded.is_empty() {
            return None;
        }
        if folded == fold_unit(&self.canonical_unit)
            || self.unit_variants.iter().any(|v| fold_unit(v) == folded)
        {
            return Some(self.canonical_unit.clone());
        }
        if !self.unit_fragments.is_empty()
            && self
                .unit_fragments
                .iter()
                .all(|f| folded.contains(&fold_unit(f)))
        {
            return Some(self.canonical_unit.clone());
        }
        None
    }

    /// Returns true if the value lies within the plausible range (inclusive)
    pub fn in_range(&self, value: f64) -> bool {
        value >= self.min_value && value <= self.max_value
    }
}

impl Default for AnalyteProfile {
    fn default() -> Self {
        Self {
            name: default_test_name(),
            default_code: default_loinc_code(),
            code_allow_list: default_code_allow_list(),
            vendor_codes: default_vendor_codes(),
            keywords: default_keywords(),
            canonical_unit: default_canonical_unit(),
            unit_variants: default_unit_variants(),
            unit_fragments: default_unit_fragments(),
            ucum_code: default_ucum_code(),
            min_value: default_min_value(),
            max_value: default_max_value(),
            default_reference_range: default_reference_range(),
        }
    }
}

/// Case-fold and strip whitespace for unit comparison
fn fold_unit(unit: &str) -> String {
    unit.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Log file rotation (daily, hourly)
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    /// Validates logging settings
    pub fn validate(&self) -> Result<(), String> {
        match self.local_rotation.as_str() {
            "daily" | "hourly" => Ok(()),
            other => Err(format!(
                "logging.local_rotation '{other}' is invalid, expected 'daily' or 'hourly'"
            )),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

fn default_app_name() -> String {
    "relaydx".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_test_name() -> String {
    "eGFR (CKD-EPI)".to_string()
}

fn default_loinc_code() -> String {
    "98979-8".to_string()
}

fn default_code_allow_list() -> Vec<String> {
    vec![
        "98979-8".to_string(),
        "33914-3".to_string(),
        "62238-1".to_string(),
    ]
}

fn default_vendor_codes() -> Vec<String> {
    vec!["EGFR001".to_string(), "EGFR".to_string()]
}

fn default_keywords() -> Vec<String> {
    vec!["EGFR".to_string(), "GLOMERULAR".to_string()]
}

fn default_canonical_unit() -> String {
    "mL/min/1.73m2".to_string()
}

fn default_unit_variants() -> Vec<String> {
    vec![
        "mL/min/1.73 m²".to_string(),
        "ml/min/1.73m2".to_string(),
    ]
}

fn default_unit_fragments() -> Vec<String> {
    vec!["ml/min".to_string(), "1.73".to_string()]
}

fn default_ucum_code() -> String {
    "mL/min/{1.73_m2}".to_string()
}

fn default_min_value() -> f64 {
    0.0
}

fn default_max_value() -> f64 {
    200.0
}

fn default_reference_range() -> String {
    ">=90".to_string()
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}
