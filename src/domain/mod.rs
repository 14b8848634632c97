//! Domain models and types for RelayDX
//!
//! This module contains the core domain models, types, and business rules.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Raw extraction types** ([`RawRecord`], [`RawValue`], [`SourceFormat`])
//! - **Canonical result model** ([`CanonicalCandidate`], [`CanonicalResult`])
//! - **Resource identifiers** ([`ResourceId`])
//! - **Error types** ([`RelayError`], [`ParseError`], [`ValidationError`])
//! - **Result type alias** ([`Result`])
//!
//! # Lifecycle
//!
//! A [`RawRecord`] is transient: produced by one parser and consumed by
//! the normalizer within a single pipeline pass. A [`CanonicalResult`]
//! only exists after validation and carries no persistent identity —
//! collaborators that persist it assign their own surrogate keys.
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, RelayError>`]:
//!
//! ```
//! use relaydx::domain::Result;
//!
//! fn example() -> Result<()> {
//!     // Errors are converted automatically with the ? operator
//!     let _value: serde_json::Value = serde_json::from_str("{}")?;
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod canonical;
pub mod errors;
pub mod ids;
pub mod raw;
pub mod result;

// Re-export commonly used types for convenience
pub use canonical::{CanonicalCandidate, CanonicalResult};
pub use errors::{ParseError, RelayError, ValidationError};
pub use ids::ResourceId;
pub use raw::{RawRecord, RawValue, SourceFormat};
pub use result::Result;
