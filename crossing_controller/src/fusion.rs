//! Redundant presence sensor fusion.
//!
//! Reduces the three raw sensor lines of each crossing to one trusted
//! presence bit by 2-out-of-3 majority vote, and derives the exit pulse from
//! the falling edge of that bit.
//!
//! The vote is combinational: it depends only on the current tick's inputs.
//! The exit pulse is sequential: it compares against the presence bit stored
//! at the previous tick boundary.

use crossing_common::io::{CrossingMask, SensorInputs};

/// Fused per-crossing signals for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FusedSignal {
    /// Majority-voted presence.
    pub detected: CrossingMask,
    /// One-tick pulse on the tick presence first reads false after being true.
    pub exited: CrossingMask,
    /// Sensor health. Always reports every active crossing healthy.
    pub health: CrossingMask,
}

/// Bitwise 2-out-of-3 vote across all crossings at once.
#[inline]
pub const fn majority(ir: CrossingMask, vib: CrossingMask, rfid: CrossingMask) -> CrossingMask {
    ir.and(vib).or(vib.and(rfid)).or(ir.and(rfid))
}

/// Majority voter with exit-edge memory.
#[derive(Debug, Clone)]
pub struct SensorFusionVoter {
    /// Crossings wired to this voter.
    active: CrossingMask,
    /// Presence stored at the previous tick boundary.
    previous: CrossingMask,
}

impl SensorFusionVoter {
    pub const fn new(crossing_count: usize) -> Self {
        Self {
            active: CrossingMask::all(crossing_count),
            previous: CrossingMask::EMPTY,
        }
    }

    /// Vote this tick's inputs and advance the edge detector.
    pub fn sample(&mut self, sensors: &SensorInputs) -> FusedSignal {
        let detected = majority(sensors.ir, sensors.vib, sensors.rfid).and(self.active);
        let exited = self.previous.and_not(detected);
        self.previous = detected;

        FusedSignal {
            detected,
            exited,
            health: self.active,
        }
    }

    /// Health mask reported with every sample.
    #[inline]
    pub const fn health(&self) -> CrossingMask {
        self.active
    }

    /// Presence stored at the last tick boundary.
    #[inline]
    pub const fn previous(&self) -> CrossingMask {
        self.previous
    }

    /// Clear the edge detector.
    pub fn reset(&mut self) {
        self.previous = CrossingMask::EMPTY;
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
