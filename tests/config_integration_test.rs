//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables are serialized through a
//! mutex to avoid interference between tests.

use relaydx::config::{load_config, load_config_or_default};
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    std::env::remove_var("RELAYDX_APPLICATION_LOG_LEVEL");
    std::env::remove_var("RELAYDX_ANALYTE_MIN_VALUE");
    std::env::remove_var("RELAYDX_ANALYTE_MAX_VALUE");
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[application]
name = "relaydx"
log_level = "debug"

[analyte]
name = "eGFR (CKD-EPI)"
default_code = "98979-8"
code_allow_list = ["98979-8", "33914-3", "62238-1"]
canonical_unit = "mL/min/1.73m2"
min_value = 0.0
max_value = 200.0

[logging]
local_enabled = true
local_path = "logs"
local_rotation = "daily"
"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(toml_content.as_bytes()).unwrap();

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.analyte.default_code, "98979-8");
    assert!(config.logging.local_enabled);
}

#[test]
fn test_partial_config_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[application]\nlog_level = \"warn\"\n")
        .unwrap();

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.log_level, "warn");
    // analyte section absent: built-in eGFR profile
    assert_eq!(config.analyte.name, "eGFR (CKD-EPI)");
    assert_eq!(config.analyte.max_value, 200.0);
}

#[test]
fn test_invalid_log_level_fails_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[application]\nlog_level = \"shouty\"\n")
        .unwrap();

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("log_level"));
}

#[test]
fn test_env_override_applies() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    std::env::set_var("RELAYDX_ANALYTE_MAX_VALUE", "150");

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[application]\nlog_level = \"info\"\n")
        .unwrap();

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.analyte.max_value, 150.0);

    cleanup_env_vars();
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let config = load_config_or_default("/nonexistent/relaydx.toml").unwrap();
    assert_eq!(config.analyte.default_code, "98979-8");
    assert!(config.validate().is_ok());
}

#[test]
fn test_env_substitution_in_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    std::env::set_var("RELAYDX_TEST_IT_LEVEL", "error");
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[application]\nlog_level = \"${RELAYDX_TEST_IT_LEVEL}\"\n")
        .unwrap();

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.log_level, "error");

    std::env::remove_var("RELAYDX_TEST_IT_LEVEL");
}
