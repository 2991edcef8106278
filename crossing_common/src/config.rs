//! Configuration loading traits and types.
//!
//! Provides the `ConfigLoader` trait used to read TOML files across the
//! workspace, plus the controller configuration and its bounds checks.
//!
//! # Usage
//!
//! ```rust,no_run
//! use crossing_common::config::{ConfigError, ConfigLoader, ControllerConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = ControllerConfig::load(Path::new("config/controller.toml"))?;
//!     config.validate()?;
//!     println!("Crossings: {}", config.crossing_count);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::consts::{
    BARRIER_SETTLE_MASK, BARRIER_SETTLE_VALUE, COUNTDOWN_START, CYCLE_TIME_US, CYCLE_TIME_US_MAX,
    CYCLE_TIME_US_MIN, MAX_CROSSINGS, NUM_CROSSINGS, SPEED_CONSTANT, WARNING_EXIT_NIBBLE,
};

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Common configuration fields shared by every binary in the workspace.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "crossing-line-7"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Controller instance identifier.
    pub service_name: String,
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            service_name: "crossing-controller".to_string(),
        }
    }
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
///
/// Semantic validation is left to the caller.
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation: any serde-deserializable struct can be loaded.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

// ─── Controller Config ──────────────────────────────────────────────

/// Phase thresholds applied to the free-running cycle counter.
///
/// All thresholds are bit-mask comparisons against the same counter; changing
/// them moves the dwell windows but never introduces per-phase timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// High nibble of the counter that ends WARNING (0..=15).
    pub warning_exit_nibble: u8,
    /// Low three bits of the counter that end the barrier settle delay (0..=7).
    pub barrier_settle_value: u8,
    /// Countdown register value loaded while IDLE (1..=15).
    pub countdown_start: u8,
    /// Numerator of the inverse-time speed proxy.
    pub speed_constant: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            warning_exit_nibble: WARNING_EXIT_NIBBLE,
            barrier_settle_value: BARRIER_SETTLE_VALUE,
            countdown_start: COUNTDOWN_START,
            speed_constant: SPEED_CONSTANT,
        }
    }
}

impl TimingConfig {
    /// Validate threshold widths.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.warning_exit_nibble > 0x0F {
            return Err(ConfigError::ValidationError(format!(
                "warning_exit_nibble {} does not fit in 4 bits",
                self.warning_exit_nibble
            )));
        }
        if self.barrier_settle_value > BARRIER_SETTLE_MASK {
            return Err(ConfigError::ValidationError(format!(
                "barrier_settle_value {} does not fit in 3 bits",
                self.barrier_settle_value
            )));
        }
        if self.countdown_start == 0 || self.countdown_start > 0x0F {
            return Err(ConfigError::ValidationError(format!(
                "countdown_start {} out of range [1, 15]",
                self.countdown_start
            )));
        }
        if self.speed_constant == 0 {
            return Err(ConfigError::ValidationError(
                "speed_constant must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Top-level controller configuration.
///
/// # TOML Example
///
/// ```toml
/// crossing_count = 4
/// cycle_time_us = 1000
///
/// [shared]
/// service_name = "crossing-line-7"
///
/// [timing]
/// warning_exit_nibble = 3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControllerConfig {
    #[serde(default)]
    pub shared: SharedConfig,

    /// Number of active crossings (default: 4).
    #[serde(default = "default_crossing_count")]
    pub crossing_count: usize,

    /// Tick period when the runner is paced [µs] (default: 1000).
    #[serde(default = "default_cycle_time_us")]
    pub cycle_time_us: u32,

    #[serde(default)]
    pub timing: TimingConfig,
}

fn default_crossing_count() -> usize {
    NUM_CROSSINGS
}
fn default_cycle_time_us() -> u32 {
    CYCLE_TIME_US
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            shared: SharedConfig::default(),
            crossing_count: NUM_CROSSINGS,
            cycle_time_us: CYCLE_TIME_US,
            timing: TimingConfig::default(),
        }
    }
}

impl ControllerConfig {
    /// Validate parameter bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        if self.crossing_count == 0 || self.crossing_count > MAX_CROSSINGS {
            return Err(ConfigError::ValidationError(format!(
                "crossing_count {} out of range [1, {}]",
                self.crossing_count, MAX_CROSSINGS
            )));
        }
        if self.cycle_time_us < CYCLE_TIME_US_MIN || self.cycle_time_us > CYCLE_TIME_US_MAX {
            return Err(ConfigError::ValidationError(format!(
                "cycle_time_us {} out of range [{}, {}]",
                self.cycle_time_us, CYCLE_TIME_US_MIN, CYCLE_TIME_US_MAX
            )));
        }
        self.timing.validate()
    }
}
