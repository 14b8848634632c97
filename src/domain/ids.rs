//! Domain identifier types
//!
//! This module provides the newtype wrapper used for output resource
//! identifiers. Each generated FHIR resource gets a fresh identifier;
//! the newtype keeps resource ids from being mixed up with patient ids
//! or other plain strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Output resource identifier newtype wrapper
///
/// Represents the unique identifier assigned to one generated output
/// resource (Observation or DiagnosticReport). Freshly generated as a
/// UUID v4 for every resource; never reused across resources.
///
/// # Examples
///
/// ```
/// use relaydx::domain::ids::ResourceId;
///
/// let id = ResourceId::generate();
/// let other = ResourceId::generate();
/// assert_ne!(id, other);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId(String);

impl ResourceId {
    /// Generates a fresh unique resource identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Creates a ResourceId from an existing string
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Resource ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the resource ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResourceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        let a = ResourceId::generate();
        let b = ResourceId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_generate_is_uuid() {
        let id = ResourceId::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(ResourceId::new("").is_err());
        assert!(ResourceId::new("   ").is_err());
    }

    #[test]
    fn test_from_str_and_display() {
        let id = ResourceId::from_str("obs-123").unwrap();
        assert_eq!(id.to_string(), "obs-123");
        assert_eq!(id.as_str(), "obs-123");
    }
}
