//! Prelude module for common re-exports.
//!
//! ```rust
//! use crossing_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{
    ConfigError, ConfigLoader, ControllerConfig, LogLevel, SharedConfig, TimingConfig,
};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{MAX_CROSSINGS, NUM_CROSSINGS};

// ─── Signals ────────────────────────────────────────────────────────
pub use crate::actuator::Actuators;
pub use crate::io::{CrossingMask, GlobalInputs, SensorInputs, TickInputs};
pub use crate::state::{CrossingState, WeatherMode};

