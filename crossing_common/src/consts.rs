//! System-wide constants for the crossing workspace.
//!
//! Single source of truth for crossing counts, timer widths and default
//! thresholds. Imported by every crate in the workspace.

use static_assertions::const_assert;

/// Default number of protected crossings.
pub const NUM_CROSSINGS: usize = 4;

/// Maximum number of crossings a single controller instance can drive.
pub const MAX_CROSSINGS: usize = 8;

/// Width of one encoded crossing state in the status word.
pub const STATE_CODE_BITS: u32 = 3;

// Per-crossing vectors are carried as `u8` bit masks.
const_assert!(MAX_CROSSINGS <= 8);
// The concatenated status word is a `u32`.
const_assert!(MAX_CROSSINGS as u32 * STATE_CODE_BITS <= 32);
const_assert!(NUM_CROSSINGS <= MAX_CROSSINGS);

/// Value loaded into the countdown register whenever a crossing is idle.
pub const COUNTDOWN_START: u8 = 10;

/// High nibble of the cycle counter that ends the warning phase.
pub const WARNING_EXIT_NIBBLE: u8 = 3;

/// Low-three-bit value of the cycle counter that ends the barrier settle delay.
pub const BARRIER_SETTLE_VALUE: u8 = 4;

/// Cycle counter mask selecting the 32-tick countdown window.
pub const COUNTDOWN_WINDOW_MASK: u8 = 0x1F;

/// Cycle counter mask selecting the barrier settle bits.
pub const BARRIER_SETTLE_MASK: u8 = 0x07;

/// Counter bit that pulses the alarm while warning.
pub const WARNING_ALARM_BIT: u8 = 3;

/// Counter bit that pulses the alarm during the countdown.
pub const COUNTDOWN_ALARM_BIT: u8 = 1;

/// Counter bit that blinks the yellow light in emergency.
pub const EMERGENCY_YELLOW_BIT: u8 = 2;

/// Numerator of the inverse-time speed proxy.
pub const SPEED_CONSTANT: u32 = 1_000_000;

/// Safety violations per point of efficiency penalty.
pub const SAFETY_PENALTY_DIVISOR: u32 = 50;

/// Delay cycles per point of efficiency penalty.
pub const DELAY_PENALTY_DIVISOR: u32 = 200;

/// Upper bound of the efficiency score.
pub const EFFICIENCY_MAX: u8 = 100;

/// Default tick period in microseconds when the runner is paced.
pub const CYCLE_TIME_US: u32 = 1000;

/// Lower bound for a paced tick period [µs].
pub const CYCLE_TIME_US_MIN: u32 = 100;

/// Upper bound for a paced tick period [µs].
pub const CYCLE_TIME_US_MAX: u32 = 1_000_000;
