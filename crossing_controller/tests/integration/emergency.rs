//! Global emergency pre-empts every crossing regardless of phase.

use crossing_common::prelude::*;
use crossing_controller::cycle::CrossingSystem;
use crossing_controller::scenario::Scenario;

use super::run;

#[test]
fn drill_forces_every_crossing_into_emergency() {
    let (system, outputs) = run(&Scenario::emergency_drill());

    // Mixed phases when the line is raised at tick 200.
    let entered: Vec<(u8, CrossingState)> = outputs[200]
        .events
        .iter()
        .map(|e| {
            assert_eq!(e.to, CrossingState::Emergency);
            (e.crossing, e.from)
        })
        .collect();
    assert_eq!(
        entered,
        vec![
            (0, CrossingState::Countdown),
            (1, CrossingState::Countdown),
            (2, CrossingState::Warning),
            (3, CrossingState::Warning),
        ]
    );

    for out in &outputs[200..300] {
        for i in 0..4 {
            assert_eq!(out.state(i), Some(CrossingState::Emergency));
        }
        assert!(out.barrier_down.is_empty());
        assert_eq!(out.red_light.count(), 4);
        assert_eq!(out.alarm_sound.count(), 4);
    }

    for i in 0..4 {
        assert_eq!(outputs[300].state(i), Some(CrossingState::Idle));
        assert_eq!(system.statistics().emergency_entries(i), Some(1));
    }
}

#[test]
fn trains_still_present_restart_and_complete() {
    let (system, outputs) = run(&Scenario::emergency_drill());

    for i in 0..4 {
        assert_eq!(outputs[301].state(i), Some(CrossingState::Warning));
    }
    assert_eq!(system.statistics().total_transits(), 4);

    let last = outputs.last().unwrap();
    for i in 0..4 {
        assert_eq!(last.state(i), Some(CrossingState::Idle));
    }
}

#[test]
fn emergency_reaches_idle_crossings() {
    let mut system = CrossingSystem::with_crossings(3);
    let mut inputs = TickInputs::default();
    inputs.global.emergency = true;

    let out = system.step(&inputs);
    assert_eq!(out.events.len(), 3);
    for i in 0..3 {
        assert_eq!(out.state(i), Some(CrossingState::Emergency));
    }
    // Inactive slots stay encoded as IDLE.
    assert_eq!(out.state(3), Some(CrossingState::Idle));

    let out = system.step(&TickInputs::default());
    assert!(out.events.iter().all(|e| e.to == CrossingState::Idle));
    assert_eq!(out.crossing_states, 0);
}
