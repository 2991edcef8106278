//! Lock-step tick: fuse → control / estimate → account.
//!
//! `CrossingSystem::step` consumes one tick of inputs and returns one full
//! output vector. Every component reads the state stored at the previous
//! tick boundary and the whole system commits together, like registers on a
//! clock edge:
//!
//! 1. The voter fuses this tick's sensor lines (combinational) and derives
//!    the exit pulse from last tick's presence.
//! 2. The statistics engine reads fused presence against the barrier line
//!    registered at the previous tick.
//! 3. The controller advances every crossing with the shared emergency flag.
//! 4. The speed estimator times presence and emits on exit.
//!
//! The step never fails and always yields a defined output vector.

use serde::Serialize;
use tracing::{info, trace};

use crossing_common::actuator::Actuators;
use crossing_common::config::{ControllerConfig, TimingConfig};
use crossing_common::consts::MAX_CROSSINGS;
use crossing_common::io::{CrossingMask, TickInputs};
use crossing_common::state::{CrossingState, WeatherMode};

use crate::fusion::{FusedSignal, SensorFusionVoter};
use crate::speed::SpeedEstimator;
use crate::state::controller::{CrossingController, TickEvents};
use crate::statistics::StatisticsEngine;

// ─── Outputs ────────────────────────────────────────────────────────

/// Everything observable after one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickOutputs {
    /// Index of the tick that produced these outputs, 0-based since the last
    /// reset. A reset tick reports 0 and so does the tick after it; `reset`
    /// tells the two apart.
    pub tick: u64,
    /// Set only on the tick that applied a global reset.
    pub reset: bool,

    // ── Fused sensing ──
    pub detected: CrossingMask,
    pub exited: CrossingMask,
    pub health: CrossingMask,

    // ── Actuators ──
    pub barrier_down: CrossingMask,
    pub red_light: CrossingMask,
    pub yellow_light: CrossingMask,
    pub alarm_sound: CrossingMask,

    /// Concatenated 3-bit state codes, crossing 0 in the low bits.
    pub crossing_states: u32,

    // ── Speed ──
    pub speed_valid: CrossingMask,
    pub speed_value: [u32; MAX_CROSSINGS],

    // ── Statistics ──
    pub safety_violation_count: u32,
    pub delay_cycle_count: u32,
    pub efficiency_score: u8,

    /// Coarse monitor word: `detected << 4 | efficiency_score >> 4`.
    pub diagnostic: u16,

    /// State changes committed on this tick.
    pub events: TickEvents,
}

impl TickOutputs {
    /// Decoded state of crossing `index` from the status word.
    pub fn state(&self, index: usize) -> Option<CrossingState> {
        if index >= MAX_CROSSINGS {
            return None;
        }
        CrossingState::from_u8(((self.crossing_states >> (index * 3)) & 0b111) as u8)
    }
}

/// Coarse monitor word combining presence bits and the top score bits.
#[inline]
pub const fn diagnostic_word(detected: CrossingMask, efficiency_score: u8) -> u16 {
    ((detected.bits() as u16) << 4) | (efficiency_score >> 4) as u16
}

// ─── System ─────────────────────────────────────────────────────────

/// The four components of one controller instance.
///
/// Independent instances share nothing, so several runs can coexist.
#[derive(Debug, Clone)]
pub struct CrossingSystem {
    voter: SensorFusionVoter,
    controller: CrossingController,
    speed: SpeedEstimator,
    statistics: StatisticsEngine,
    crossing_count: usize,
    /// Ticks since the last reset.
    tick: u64,
    weather: WeatherMode,
}

impl CrossingSystem {
    /// Build a system from a validated configuration.
    pub fn new(config: &ControllerConfig) -> Self {
        Self::with_timing(config.crossing_count, config.timing)
    }

    /// Build a system with `crossing_count` crossings and default timing.
    pub fn with_crossings(crossing_count: usize) -> Self {
        Self::with_timing(crossing_count, TimingConfig::default())
    }

    pub fn with_timing(crossing_count: usize, timing: TimingConfig) -> Self {
        let crossing_count = crossing_count.clamp(1, MAX_CROSSINGS);
        info!(crossing_count, "crossing system initialized");
        Self {
            voter: SensorFusionVoter::new(crossing_count),
            controller: CrossingController::new(crossing_count, timing),
            speed: SpeedEstimator::new(crossing_count, timing.speed_constant),
            statistics: StatisticsEngine::new(crossing_count),
            crossing_count,
            tick: 0,
            weather: WeatherMode::Clear,
        }
    }

    #[inline]
    pub const fn crossing_count(&self) -> usize {
        self.crossing_count
    }

    /// Number of ticks stepped since the last reset.
    #[inline]
    pub const fn ticks(&self) -> u64 {
        self.tick
    }

    #[inline]
    pub const fn weather(&self) -> WeatherMode {
        self.weather
    }

    pub const fn controller(&self) -> &CrossingController {
        &self.controller
    }

    pub const fn speed(&self) -> &SpeedEstimator {
        &self.speed
    }

    pub const fn statistics(&self) -> &StatisticsEngine {
        &self.statistics
    }

    /// Advance the whole system by one tick.
    pub fn step(&mut self, inputs: &TickInputs) -> TickOutputs {
        if inputs.global.reset {
            self.reset();
            let idle = FusedSignal {
                health: self.voter.health(),
                ..FusedSignal::default()
            };
            return self.outputs(&idle, true, TickEvents::new());
        }

        let weather = inputs.global.weather;
        if weather != self.weather {
            info!(from = ?self.weather, to = ?weather, "weather mode changed (timing unaffected)");
            self.weather = weather;
        }

        let emergency = inputs.global.emergency;
        let fused = self.voter.sample(&inputs.sensors);

        // Registered barrier line from the previous tick.
        let barrier_prev = self.controller.output_mask(Actuators::BARRIER_DOWN);
        self.statistics.update(fused.detected, barrier_prev, emergency);

        let events = self
            .controller
            .step(&fused, inputs.maintenance, emergency, self.tick);
        self.speed.update(&fused);
        self.statistics.record_events(&events);

        trace!(
            tick = self.tick,
            detected = fused.detected.bits(),
            states = self.controller.status_word(),
            "tick"
        );

        let outputs = self.outputs(&fused, false, events);
        self.tick += 1;
        outputs
    }

    /// Reinitialize every component.
    pub fn reset(&mut self) {
        info!(ticks = self.tick, "system reset");
        self.voter.reset();
        self.controller.reset();
        self.speed.reset();
        self.statistics.reset();
        self.tick = 0;
    }

    fn outputs(&self, fused: &FusedSignal, reset: bool, events: TickEvents) -> TickOutputs {
        let stats = self.statistics.snapshot();
        TickOutputs {
            tick: self.tick,
            reset,
            detected: fused.detected,
            exited: fused.exited,
            health: fused.health,
            barrier_down: self.controller.output_mask(Actuators::BARRIER_DOWN),
            red_light: self.controller.output_mask(Actuators::RED_LIGHT),
            yellow_light: self.controller.output_mask(Actuators::YELLOW_LIGHT),
            alarm_sound: self.controller.output_mask(Actuators::ALARM),
            crossing_states: self.controller.status_word(),
            speed_valid: self.speed.valid(),
            speed_value: *self.speed.values(),
            safety_violation_count: stats.safety_violation_count,
            delay_cycle_count: stats.delay_cycle_count,
            efficiency_score: stats.efficiency_score,
            diagnostic: diagnostic_word(fused.detected, stats.efficiency_score),
            events,
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
