//! Safety and efficiency statistics.
//!
//! Two run-wide counters are accumulated every tick:
//!
//! - **safety violations**: one per crossing per tick with presence detected
//!   while the barrier is up,
//! - **delay cycles**: one per crossing per tick with the barrier down, no
//!   presence and no global emergency.
//!
//! The efficiency score is derived from both, safety weighted 4× harder:
//! `score = 100 - (violations / 50 + delay / 200)`, floored at 0.
//!
//! Alongside, per-crossing operation counters (completed transits, emergency
//! entries) are kept. They never feed the score.

use serde::Serialize;
use tracing::warn;

use crossing_common::consts::{
    DELAY_PENALTY_DIVISOR, EFFICIENCY_MAX, MAX_CROSSINGS, SAFETY_PENALTY_DIVISOR,
};
use crossing_common::io::CrossingMask;
use crossing_common::state::CrossingState;

use crate::state::controller::CrossingEvent;

/// Efficiency score in `[0, 100]`.
pub const fn efficiency_score(safety_violations: u32, delay_cycles: u32) -> u8 {
    let penalty = safety_violations / SAFETY_PENALTY_DIVISOR + delay_cycles / DELAY_PENALTY_DIVISOR;
    if penalty >= EFFICIENCY_MAX as u32 {
        0
    } else {
        EFFICIENCY_MAX - penalty as u8
    }
}

/// Snapshot of the counters, as exported to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatisticsSnapshot {
    pub safety_violation_count: u32,
    pub delay_cycle_count: u32,
    pub efficiency_score: u8,
}

#[derive(Debug, Clone)]
pub struct StatisticsEngine {
    safety_violation_count: u32,
    delay_cycle_count: u32,
    /// Crossings exposed on the previous tick, for onset logging.
    exposed: CrossingMask,
    completed_transits: [u32; MAX_CROSSINGS],
    emergency_entries: [u32; MAX_CROSSINGS],
    crossing_count: usize,
}

impl StatisticsEngine {
    pub const fn new(crossing_count: usize) -> Self {
        Self {
            safety_violation_count: 0,
            delay_cycle_count: 0,
            exposed: CrossingMask::EMPTY,
            completed_transits: [0; MAX_CROSSINGS],
            emergency_entries: [0; MAX_CROSSINGS],
            crossing_count,
        }
    }

    /// Accumulate one tick.
    ///
    /// `barrier_down` is the barrier line registered at the previous tick
    /// boundary.
    pub fn update(&mut self, detected: CrossingMask, barrier_down: CrossingMask, emergency: bool) {
        let active = CrossingMask::all(self.crossing_count);
        let detected = detected.and(active);
        let barrier_down = barrier_down.and(active);

        let exposed = detected.and_not(barrier_down);
        self.safety_violation_count = self.safety_violation_count.saturating_add(exposed.count());

        for i in 0..self.crossing_count.min(MAX_CROSSINGS) {
            if exposed.get(i) && !self.exposed.get(i) {
                warn!(crossing = i, "presence detected with barrier up");
            }
        }
        self.exposed = exposed;

        if !emergency {
            let idle_closures = barrier_down.and_not(detected);
            self.delay_cycle_count = self.delay_cycle_count.saturating_add(idle_closures.count());
        }
    }

    /// Fold this tick's state changes into the operation counters.
    pub fn record_events(&mut self, events: &[CrossingEvent]) {
        for event in events {
            let i = event.crossing as usize;
            if i >= MAX_CROSSINGS {
                continue;
            }
            match (event.from, event.to) {
                (CrossingState::TrainPass, CrossingState::Idle) => {
                    self.completed_transits[i] = self.completed_transits[i].saturating_add(1);
                }
                (_, CrossingState::Emergency) => {
                    self.emergency_entries[i] = self.emergency_entries[i].saturating_add(1);
                }
                _ => {}
            }
        }
    }

    #[inline]
    pub const fn safety_violation_count(&self) -> u32 {
        self.safety_violation_count
    }

    #[inline]
    pub const fn delay_cycle_count(&self) -> u32 {
        self.delay_cycle_count
    }

    #[inline]
    pub const fn efficiency_score(&self) -> u8 {
        efficiency_score(self.safety_violation_count, self.delay_cycle_count)
    }

    pub fn completed_transits(&self, index: usize) -> Option<u32> {
        self.completed_transits[..self.crossing_count.min(MAX_CROSSINGS)]
            .get(index)
            .copied()
    }

    pub fn emergency_entries(&self, index: usize) -> Option<u32> {
        self.emergency_entries[..self.crossing_count.min(MAX_CROSSINGS)]
            .get(index)
            .copied()
    }

    /// Sum of completed transits over every crossing.
    pub fn total_transits(&self) -> u32 {
        self.completed_transits.iter().sum()
    }

    pub const fn snapshot(&self) -> StatisticsSnapshot {
        StatisticsSnapshot {
            safety_violation_count: self.safety_violation_count,
            delay_cycle_count: self.delay_cycle_count,
            efficiency_score: self.efficiency_score(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.crossing_count);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
