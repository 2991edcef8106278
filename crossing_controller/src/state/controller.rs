//! The fixed array of crossing machines.
//!
//! Every machine is advanced once per tick by the same call. The emergency
//! flag is read once and handed to every machine, so all crossings enter and
//! leave EMERGENCY on the same tick.

use heapless::Vec;
use serde::Serialize;
use tracing::{debug, info, warn};

use crossing_common::actuator::Actuators;
use crossing_common::config::TimingConfig;
use crossing_common::consts::{MAX_CROSSINGS, STATE_CODE_BITS};
use crossing_common::io::CrossingMask;
use crossing_common::state::CrossingState;

use super::fsm::{CrossingFsm, Guards};
use super::outputs::actuators_for;
use crate::fusion::FusedSignal;

/// A state change of one crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CrossingEvent {
    /// Tick on which the change was committed.
    pub tick: u64,
    pub crossing: u8,
    pub from: CrossingState,
    pub to: CrossingState,
}

/// At most one event per crossing per tick.
pub type TickEvents = Vec<CrossingEvent, MAX_CROSSINGS>;

/// Controller for all crossings.
#[derive(Debug, Clone)]
pub struct CrossingController {
    machines: [CrossingFsm; MAX_CROSSINGS],
    crossing_count: usize,
    timing: TimingConfig,
}

impl CrossingController {
    pub fn new(crossing_count: usize, timing: TimingConfig) -> Self {
        Self {
            machines: [CrossingFsm::new(timing.countdown_start); MAX_CROSSINGS],
            crossing_count: crossing_count.min(MAX_CROSSINGS),
            timing,
        }
    }

    #[inline]
    pub const fn crossing_count(&self) -> usize {
        self.crossing_count
    }

    /// Machine of crossing `index`, if active.
    pub fn machine(&self, index: usize) -> Option<&CrossingFsm> {
        self.machines[..self.crossing_count].get(index)
    }

    /// State of crossing `index`. Inactive crossings read as IDLE.
    pub fn state(&self, index: usize) -> CrossingState {
        self.machine(index).map_or(CrossingState::Idle, CrossingFsm::state)
    }

    /// Actuators currently driven by crossing `index`.
    pub fn actuators(&self, index: usize) -> Actuators {
        self.machine(index)
            .map_or(Actuators::empty(), |m| actuators_for(m.state(), m.cycle_counter()))
    }

    /// One output line across every crossing.
    pub fn output_mask(&self, flag: Actuators) -> CrossingMask {
        (0..self.crossing_count).fold(CrossingMask::EMPTY, |mask, i| {
            mask.with(i, self.actuators(i).contains(flag))
        })
    }

    /// Concatenated 3-bit state codes, crossing 0 in the low bits.
    pub fn status_word(&self) -> u32 {
        self.machines[..self.crossing_count]
            .iter()
            .enumerate()
            .fold(0u32, |word, (i, m)| {
                word | (u32::from(m.state().code()) << (i as u32 * STATE_CODE_BITS))
            })
    }

    /// Advance every crossing by one tick.
    pub fn step(
        &mut self,
        fused: &FusedSignal,
        maintenance: CrossingMask,
        emergency: bool,
        tick: u64,
    ) -> TickEvents {
        let mut events = TickEvents::new();

        for (i, machine) in self.machines[..self.crossing_count].iter_mut().enumerate() {
            let guards = Guards {
                emergency,
                detected: fused.detected.get(i),
                exited: fused.exited.get(i),
                maintenance: maintenance.get(i),
                ..Guards::default()
            };

            if let Some((from, to)) = machine.tick(guards, &self.timing) {
                log_transition(i, from, to);
                let pushed = events.push(CrossingEvent {
                    tick,
                    crossing: i as u8,
                    from,
                    to,
                });
                debug_assert!(pushed.is_ok(), "one event slot per crossing");
            }
        }

        events
    }

    /// Return every crossing to its power-on state.
    pub fn reset(&mut self) {
        for machine in self.machines.iter_mut() {
            machine.reset(self.timing.countdown_start);
        }
    }
}

fn log_transition(crossing: usize, from: CrossingState, to: CrossingState) {
    use CrossingState::*;

    match (from, to) {
        (_, Emergency) => warn!(crossing, %from, "emergency override engaged"),
        (Emergency, Idle) => info!(crossing, "emergency cleared"),
        (_, Warning) => info!(crossing, "train approaching"),
        (_, Countdown) => info!(crossing, "countdown started"),
        (_, BarrierDown) => info!(crossing, "barrier lowering"),
        (_, TrainPass) => info!(crossing, "train passing"),
        (TrainPass, Idle) => info!(crossing, "crossing cleared"),
        (_, Maintenance) => info!(crossing, "maintenance mode entered"),
        (Maintenance, Idle) => info!(crossing, "maintenance complete"),
        _ => debug!(crossing, %from, %to, "state change"),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
