//! Transit-time speed estimator.
//!
//! Counts how many ticks each crossing reports presence and, on the exit
//! pulse, emits `speed_constant / transit_ticks` as an inverse-time speed
//! proxy. Purely observational: nothing here feeds back into the controller.

use tracing::debug;

use crossing_common::consts::MAX_CROSSINGS;
use crossing_common::io::CrossingMask;

use crate::fusion::FusedSignal;

/// `constant / ticks`, or zero for an empty transit.
#[inline]
pub const fn speed_proxy(constant: u32, ticks: u32) -> u32 {
    if ticks == 0 { 0 } else { constant / ticks }
}

#[derive(Debug, Clone)]
pub struct SpeedEstimator {
    timers: [u32; MAX_CROSSINGS],
    values: [u32; MAX_CROSSINGS],
    valid: CrossingMask,
    crossing_count: usize,
    constant: u32,
}

impl SpeedEstimator {
    pub const fn new(crossing_count: usize, constant: u32) -> Self {
        Self {
            timers: [0; MAX_CROSSINGS],
            values: [0; MAX_CROSSINGS],
            valid: CrossingMask::EMPTY,
            crossing_count,
            constant,
        }
    }

    /// Advance one tick.
    pub fn update(&mut self, fused: &FusedSignal) {
        let mut valid = CrossingMask::EMPTY;

        for i in 0..self.crossing_count.min(MAX_CROSSINGS) {
            if fused.exited.get(i) {
                let ticks = self.timers[i];
                let value = speed_proxy(self.constant, ticks);
                debug!(crossing = i, ticks, value, "transit timed");
                self.values[i] = value;
                self.timers[i] = 0;
                valid.set(i, true);
            } else if fused.detected.get(i) {
                self.timers[i] = self.timers[i].saturating_add(1);
            } else {
                self.timers[i] = 0;
            }
        }

        self.valid = valid;
    }

    /// Crossings that emitted a new speed value this tick.
    #[inline]
    pub const fn valid(&self) -> CrossingMask {
        self.valid
    }

    /// Last speed value of every crossing (held between exits).
    #[inline]
    pub const fn values(&self) -> &[u32; MAX_CROSSINGS] {
        &self.values
    }

    /// Last speed value of crossing `index`.
    pub fn last_speed(&self, index: usize) -> Option<u32> {
        self.values[..self.crossing_count.min(MAX_CROSSINGS)]
            .get(index)
            .copied()
    }

    /// Ticks of presence accumulated so far for crossing `index`.
    pub fn timer(&self, index: usize) -> Option<u32> {
        self.timers[..self.crossing_count.min(MAX_CROSSINGS)]
            .get(index)
            .copied()
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.crossing_count, self.constant);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
