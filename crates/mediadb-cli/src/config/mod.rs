//! Application configuration module.
//!
//! Manages the TOML config file holding per-provider API keys and base URL
//! overrides.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, ProviderConfig};
pub use paths::resolve_config_path;
