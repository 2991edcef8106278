//! Per-crossing state machine.
//!
//! IDLE → WARNING → COUNTDOWN → BARRIER_DOWN → TRAIN_PASS → IDLE, with a
//! global EMERGENCY override and an optional MAINTENANCE excursion from IDLE.
//!
//! Dwell times are not separate timers. A single free-running 8-bit cycle
//! counter increments every tick and its bit fields are compared against the
//! configured thresholds:
//!
//! | Phase         | Guard                                          |
//! |---------------|------------------------------------------------|
//! | WARNING       | `counter >> 4 == warning_exit_nibble`          |
//! | COUNTDOWN     | `countdown == 0` (decrements on `counter & 0x1F == 0x1F`) |
//! | BARRIER_DOWN  | `counter & 0x07 == barrier_settle_value`       |

use crossing_common::config::TimingConfig;
use crossing_common::consts::{BARRIER_SETTLE_MASK, COUNTDOWN_WINDOW_MASK};
use crossing_common::state::CrossingState;

/// Guard values sampled for one crossing in one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Guards {
    /// Global emergency (same value for every crossing).
    pub emergency: bool,
    /// Fused presence.
    pub detected: bool,
    /// Exit pulse.
    pub exited: bool,
    /// Maintenance requested for this crossing.
    pub maintenance: bool,
    /// Cycle counter stored at the previous tick boundary.
    pub cycle_counter: u8,
    /// Countdown register stored at the previous tick boundary.
    pub countdown: u8,
}

/// Next-state function.
///
/// Total over every `(state, guards)` pair. Emergency pre-empts every other
/// transition. In IDLE, presence wins over a maintenance request.
pub fn next_state(state: CrossingState, g: &Guards, timing: &TimingConfig) -> CrossingState {
    use CrossingState::*;

    if g.emergency {
        return Emergency;
    }

    match state {
        Idle if g.detected => Warning,
        Idle if g.maintenance => Maintenance,
        Idle => Idle,

        Warning if g.cycle_counter >> 4 == timing.warning_exit_nibble => Countdown,
        Warning => Warning,

        Countdown if g.countdown == 0 => BarrierDown,
        Countdown => Countdown,

        BarrierDown if g.cycle_counter & BARRIER_SETTLE_MASK == timing.barrier_settle_value => {
            TrainPass
        }
        BarrierDown => BarrierDown,

        TrainPass if g.exited => Idle,
        TrainPass => TrainPass,

        // Emergency de-asserted.
        Emergency => Idle,

        Maintenance if g.maintenance => Maintenance,
        Maintenance => Idle,
    }
}

/// Next value of the countdown register.
///
/// Reloaded while IDLE, decremented once per 32-tick window while in
/// COUNTDOWN, floor-clamped at zero, held otherwise.
#[inline]
pub fn next_countdown(
    state: CrossingState,
    cycle_counter: u8,
    countdown: u8,
    timing: &TimingConfig,
) -> u8 {
    let window_end = cycle_counter & COUNTDOWN_WINDOW_MASK == COUNTDOWN_WINDOW_MASK;
    match state {
        CrossingState::Idle => timing.countdown_start,
        CrossingState::Countdown if window_end => countdown.saturating_sub(1),
        _ => countdown,
    }
}

/// Registered state of one crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossingFsm {
    state: CrossingState,
    cycle_counter: u8,
    countdown: u8,
}

impl CrossingFsm {
    /// Power-on state: IDLE, counter zero, countdown loaded.
    pub const fn new(countdown_start: u8) -> Self {
        Self {
            state: CrossingState::Idle,
            cycle_counter: 0,
            countdown: countdown_start,
        }
    }

    #[inline]
    pub const fn state(&self) -> CrossingState {
        self.state
    }

    #[inline]
    pub const fn cycle_counter(&self) -> u8 {
        self.cycle_counter
    }

    #[inline]
    pub const fn countdown(&self) -> u8 {
        self.countdown
    }

    /// Advance one tick. Every register update reads the values stored at the
    /// previous boundary. Returns `Some((from, to))` when the state changed.
    pub fn tick(
        &mut self,
        mut guards: Guards,
        timing: &TimingConfig,
    ) -> Option<(CrossingState, CrossingState)> {
        guards.cycle_counter = self.cycle_counter;
        guards.countdown = self.countdown;

        let from = self.state;
        let to = next_state(from, &guards, timing);

        self.countdown = next_countdown(from, self.cycle_counter, self.countdown, timing);
        self.cycle_counter = self.cycle_counter.wrapping_add(1);
        self.state = to;

        (from != to).then_some((from, to))
    }

    /// Return to the power-on state.
    pub fn reset(&mut self, countdown_start: u8) {
        *self = Self::new(countdown_start);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
