//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::RelayConfig;
use crate::domain::errors::RelayError;
use crate::domain::result::Result;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`RelayConfig`]
/// 4. Applies environment variable overrides (`RELAYDX_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, TOML parsing fails, a
/// referenced environment variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use relaydx::config::load_config;
///
/// let config = load_config("relaydx.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RelayConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RelayError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RelayError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: RelayConfig = toml::from_str(&contents)
        .map_err(|e| RelayError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config
        .validate()
        .map_err(|e| RelayError::Configuration(format!("Configuration validation failed: {e}")))?;

    Ok(config)
}

/// Loads configuration from a file when it exists, otherwise returns the
/// built-in eGFR defaults
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<RelayConfig> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(
            path = %path.display(),
            "Configuration file not found, using built-in defaults"
        );
        let mut config = RelayConfig::default();
        apply_env_overrides(&mut config)?;
        Ok(config)
    }
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let mut result = String::with_capacity(input.len());
    let mut missing_vars = Vec::new();
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) if is_var_name(&after[..end]) => {
                let name = &after[..end];
                match std::env::var(name) {
                    Ok(value) => result.push_str(&value),
                    Err(_) => missing_vars.push(name.to_string()),
                }
                rest = &after[end + 1..];
            }
            _ => {
                // not a ${VAR} placeholder, keep the literal text
                result.push_str("${");
                rest = after;
            }
        }
    }
    result.push_str(rest);

    if !missing_vars.is_empty() {
        return Err(RelayError::Configuration(format!(
            "Missing environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn is_var_name(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        && !s.starts_with(|c: char| c.is_ascii_digit())
}

/// Applies `RELAYDX_*` environment variable overrides
///
/// Supported overrides:
/// - `RELAYDX_APPLICATION_LOG_LEVEL`
/// - `RELAYDX_ANALYTE_MIN_VALUE`
/// - `RELAYDX_ANALYTE_MAX_VALUE`
fn apply_env_overrides(config: &mut RelayConfig) -> Result<()> {
    if let Ok(level) = std::env::var("RELAYDX_APPLICATION_LOG_LEVEL") {
        config.application.log_level = level;
    }

    if let Ok(min) = std::env::var("RELAYDX_ANALYTE_MIN_VALUE") {
        config.analyte.min_value = min.parse().map_err(|_| {
            RelayError::Configuration(format!(
                "RELAYDX_ANALYTE_MIN_VALUE '{min}' is not a number"
            ))
        })?;
    }

    if let Ok(max) = std::env::var("RELAYDX_ANALYTE_MAX_VALUE") {
        config.analyte.max_value = max.parse().map_err(|_| {
            RelayError::Configuration(format!(
                "RELAYDX_ANALYTE_MAX_VALUE '{max}' is not a number"
            ))
        })?;
    }

    Ok(())
}
