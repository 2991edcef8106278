//! State → actuator mapping.
//!
//! Pure function of the encoded state and the cycle counter. Two states use a
//! single counter bit to blink a light or pulse the alarm. Any code without a
//! mapping drives every actuator off.
//!
//! EMERGENCY keeps the barrier up so nobody is trapped between closed booms.

use crossing_common::actuator::Actuators;
use crossing_common::consts::{COUNTDOWN_ALARM_BIT, EMERGENCY_YELLOW_BIT, WARNING_ALARM_BIT};
use crossing_common::state::CrossingState;

#[inline]
const fn counter_bit(cycle_counter: u8, bit: u8) -> bool {
    (cycle_counter >> bit) & 1 == 1
}

/// Pulsed flag: `flag` when the counter bit is set, empty otherwise.
#[inline]
const fn pulse(flag: Actuators, cycle_counter: u8, bit: u8) -> Actuators {
    if counter_bit(cycle_counter, bit) {
        flag
    } else {
        Actuators::empty()
    }
}

/// Actuators for a raw 3-bit state code.
pub const fn actuators_for_code(code: u8, cycle_counter: u8) -> Actuators {
    match CrossingState::from_u8(code) {
        Some(state) => actuators_for(state, cycle_counter),
        None => Actuators::empty(),
    }
}

/// Actuators for a decoded state.
pub const fn actuators_for(state: CrossingState, cycle_counter: u8) -> Actuators {
    match state {
        CrossingState::Idle => Actuators::empty(),
        CrossingState::Warning => Actuators::YELLOW_LIGHT
            .union(pulse(Actuators::ALARM, cycle_counter, WARNING_ALARM_BIT)),
        CrossingState::Countdown => Actuators::RED_LIGHT
            .union(pulse(Actuators::ALARM, cycle_counter, COUNTDOWN_ALARM_BIT)),
        CrossingState::BarrierDown => Actuators::BARRIER_DOWN
            .union(Actuators::RED_LIGHT)
            .union(Actuators::ALARM),
        CrossingState::TrainPass => Actuators::BARRIER_DOWN.union(Actuators::RED_LIGHT),
        CrossingState::Emergency => Actuators::RED_LIGHT
            .union(Actuators::ALARM)
            .union(pulse(Actuators::YELLOW_LIGHT, cycle_counter, EMERGENCY_YELLOW_BIT)),
        CrossingState::Maintenance => Actuators::empty(),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
