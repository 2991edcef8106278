//! Crossing Common Library
//!
//! Shared constants, state enums, input vectors, actuator flags and
//! configuration loading for every crate in the level-crossing workspace.
//!
//! # Module Structure
//!
//! - [`consts`] - Crossing counts, timer masks and default thresholds
//! - [`state`] - `CrossingState` and `WeatherMode`
//! - [`io`] - Per-tick input vectors (`CrossingMask`, `TickInputs`)
//! - [`actuator`] - Per-crossing actuator flags
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use crossing_common::prelude::*;
//!
//! let inputs = TickInputs::with_presence(CrossingMask::single(0));
//! assert!(inputs.sensors.ir.get(0));
//! ```

pub mod actuator;
pub mod config;
pub mod consts;
pub mod io;
pub mod prelude;
pub mod state;
