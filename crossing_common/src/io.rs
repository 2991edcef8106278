//! Per-tick input vectors.
//!
//! Per-crossing signals are carried as bit vectors, bit `i` belonging to
//! crossing `i`, the same way the sensor buses are wired. Global signals are
//! shared by every crossing in the same tick.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_CROSSINGS;
use crate::state::WeatherMode;

// ─── Crossing Bit Vector ────────────────────────────────────────────

/// One boolean per crossing, packed into a byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CrossingMask(u8);

impl CrossingMask {
    /// No crossing set.
    pub const EMPTY: Self = Self(0);

    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Mask with the low `count` crossings set.
    #[inline]
    pub const fn all(count: usize) -> Self {
        if count >= MAX_CROSSINGS {
            Self(u8::MAX)
        } else {
            Self(((1u16 << count) - 1) as u8)
        }
    }

    /// Mask with a single crossing set. Out-of-range indices give `EMPTY`.
    #[inline]
    pub const fn single(index: usize) -> Self {
        if index < MAX_CROSSINGS {
            Self(1 << index)
        } else {
            Self::EMPTY
        }
    }

    /// Read crossing `index`. Out-of-range indices read as `false`.
    #[inline]
    pub const fn get(self, index: usize) -> bool {
        index < MAX_CROSSINGS && (self.0 >> index) & 1 == 1
    }

    /// Write crossing `index`. Out-of-range indices are ignored.
    #[inline]
    pub fn set(&mut self, index: usize, value: bool) {
        if index >= MAX_CROSSINGS {
            return;
        }
        if value {
            self.0 |= 1 << index;
        } else {
            self.0 &= !(1 << index);
        }
    }

    /// Builder form of [`set`](Self::set).
    #[inline]
    pub fn with(mut self, index: usize, value: bool) -> Self {
        self.set(index, value);
        self
    }

    #[inline]
    pub const fn and(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[inline]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Bits set in `self` but not in `other`.
    #[inline]
    pub const fn and_not(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }
}

impl From<[bool; MAX_CROSSINGS]> for CrossingMask {
    fn from(values: [bool; MAX_CROSSINGS]) -> Self {
        values
            .iter()
            .enumerate()
            .fold(Self::EMPTY, |mask, (i, &v)| mask.with(i, v))
    }
}

// ─── Inputs ─────────────────────────────────────────────────────────

/// Raw redundant presence sensor lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SensorInputs {
    /// Infrared beam sensors.
    pub ir: CrossingMask,
    /// Track vibration sensors.
    pub vib: CrossingMask,
    /// RFID tag reader "valid tag" lines.
    pub rfid: CrossingMask,
}

impl SensorInputs {
    /// All three sensor lines asserted for the crossings in `mask`.
    pub const fn all_present(mask: CrossingMask) -> Self {
        Self {
            ir: mask,
            vib: mask,
            rfid: mask,
        }
    }
}

/// Signals shared by every crossing in a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GlobalInputs {
    /// Emergency override for all crossings.
    pub emergency: bool,
    /// Weather mode (inert).
    pub weather: WeatherMode,
    /// Synchronous reset of every component.
    pub reset: bool,
}

/// Complete input vector for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickInputs {
    pub sensors: SensorInputs,
    /// Per-crossing maintenance requests.
    #[serde(default)]
    pub maintenance: CrossingMask,
    pub global: GlobalInputs,
}

impl TickInputs {
    /// Inputs with every sensor asserted for the crossings in `mask`.
    pub const fn with_presence(mask: CrossingMask) -> Self {
        Self {
            sensors: SensorInputs::all_present(mask),
            maintenance: CrossingMask::EMPTY,
            global: GlobalInputs {
                emergency: false,
                weather: WeatherMode::Clear,
                reset: false,
            },
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
