//! Result type alias for RelayDX
//!
//! This module provides a convenient Result type alias that uses RelayError
//! as the error type.

use super::errors::RelayError;

/// Result type alias for RelayDX operations
///
/// This is a convenience type alias that uses `RelayError` as the error type.
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use relaydx::domain::result::Result;
/// use relaydx::domain::errors::RelayError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(RelayError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, RelayError>;
