//! Configuration management
//!
//! TOML-backed configuration with environment variable substitution and
//! `RELAYDX_*` overrides. All sections default sensibly, so the pipeline
//! runs with no configuration file at all (built-in eGFR profile).

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_or_default};
pub use schema::{AnalyteProfile, ApplicationConfig, LoggingConfig, RelayConfig};
