//! Controller configuration loading with validation.
//!
//! Parses `ControllerConfig` from TOML and checks parameter bounds before
//! anything is instantiated. A missing file is an error; an empty file yields
//! the defaults.

use std::path::Path;

use tracing::debug;

use crossing_common::config::{ConfigError, ConfigLoader, ControllerConfig};

// ─── Loading Functions ──────────────────────────────────────────────

/// Load and validate the controller configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ControllerConfig, ConfigError> {
    let config = ControllerConfig::load(path)?;
    config.validate()?;
    debug!(path = %path.display(), ?config, "configuration loaded");
    Ok(config)
}

/// Parse and validate the controller configuration from a TOML string.
pub fn load_config_from_str(content: &str) -> Result<ControllerConfig, ConfigError> {
    let config = ControllerConfig::parse(content)?;
    config.validate()?;
    Ok(config)
}

// ─── Tests ──────────────────────────────────────────────────────────
