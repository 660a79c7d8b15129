//! Configuration module for the bookmark exporter.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - CLI argument parsing and merging
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::{default_config_path, AccountConfig, Config, OptionsConfig, DEFAULT_CALLBACK_URL};
pub use validation::{validate_config, validate_login_config};
