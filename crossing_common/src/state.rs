//! State enums shared by the controller and its observers.
//!
//! `CrossingState` uses `#[repr(u8)]` so the discriminant is the 3-bit code
//! exposed in the concatenated status word.

use serde::{Deserialize, Serialize};

/// Per-crossing controller state.
///
/// Exactly one state is active per crossing per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum CrossingState {
    /// No train present, road open.
    #[default]
    Idle = 0,
    /// Train detected, yellow light and pulsed alarm.
    Warning = 1,
    /// Red light, counting down to barrier closure.
    Countdown = 2,
    /// Barrier lowered, waiting for the settle delay.
    BarrierDown = 3,
    /// Barrier lowered, train on the crossing.
    TrainPass = 4,
    /// Global emergency override.
    Emergency = 5,
    /// Crossing withdrawn from service.
    Maintenance = 6,
}

impl CrossingState {
    /// All states in code order.
    pub const ALL: [Self; 7] = [
        Self::Idle,
        Self::Warning,
        Self::Countdown,
        Self::BarrierDown,
        Self::TrainPass,
        Self::Emergency,
        Self::Maintenance,
    ];

    /// Convert from a raw 3-bit code. Returns `None` for unrecognized codes.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Idle),
            1 => Some(Self::Warning),
            2 => Some(Self::Countdown),
            3 => Some(Self::BarrierDown),
            4 => Some(Self::TrainPass),
            5 => Some(Self::Emergency),
            6 => Some(Self::Maintenance),
            _ => None,
        }
    }

    /// Encoded state code.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Upper-case name used in logs and traces.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Warning => "WARNING",
            Self::Countdown => "COUNTDOWN",
            Self::BarrierDown => "BARRIER_DOWN",
            Self::TrainPass => "TRAIN_PASS",
            Self::Emergency => "EMERGENCY",
            Self::Maintenance => "MAINTENANCE",
        }
    }
}

impl std::fmt::Display for CrossingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weather mode input (2-bit enumerant).
///
/// Accepted every tick but does not alter any timing threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum WeatherMode {
    #[default]
    Clear = 0,
    Rain = 1,
    Storm = 2,
    Reserved = 3,
}

impl WeatherMode {
    /// Decode the low two bits of a raw input. Total: upper bits are ignored.
    #[inline]
    pub const fn from_bits(value: u8) -> Self {
        match value & 0b11 {
            0 => Self::Clear,
            1 => Self::Rain,
            2 => Self::Storm,
            _ => Self::Reserved,
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
