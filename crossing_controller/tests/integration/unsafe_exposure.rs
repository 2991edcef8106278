//! Presence under a raised barrier accrues one violation per tick.

use crossing_common::prelude::*;
use crossing_controller::cycle::CrossingSystem;

fn close_under_train(system: &mut CrossingSystem, present: &TickInputs) {
    for _ in 0..1_000 {
        if system.step(present).state(0) == Some(CrossingState::TrainPass) {
            return;
        }
    }
    panic!("crossing never reached TRAIN_PASS");
}

#[test]
fn emergency_exposure_counts_every_tick() {
    const N: u32 = 37;

    let mut system = CrossingSystem::with_crossings(1);
    let present = TickInputs::with_presence(CrossingMask::single(0));
    close_under_train(&mut system, &present);

    let mut emergency = present;
    emergency.global.emergency = true;

    // First emergency tick still sees the barrier registered down.
    let before = system.statistics().safety_violation_count();
    let out = system.step(&emergency);
    assert_eq!(out.state(0), Some(CrossingState::Emergency));
    assert!(!out.barrier_down.get(0));
    assert_eq!(out.safety_violation_count, before);

    let mut score = out.efficiency_score;
    for _ in 0..N {
        let out = system.step(&emergency);
        assert!(out.efficiency_score <= score);
        score = out.efficiency_score;
    }
    assert_eq!(system.statistics().safety_violation_count(), before + N);
}

#[test]
fn emergency_suppresses_delay_counting() {
    let mut system = CrossingSystem::with_crossings(1);
    let present = TickInputs::with_presence(CrossingMask::single(0));
    close_under_train(&mut system, &present);

    // Train leaves while the emergency line is up on the same tick.
    let mut gone = TickInputs::default();
    gone.global.emergency = true;
    let before = system.statistics().delay_cycle_count();
    system.step(&gone);
    assert_eq!(system.statistics().delay_cycle_count(), before);
}

#[test]
fn counters_never_decrease() {
    let mut system = CrossingSystem::with_crossings(2);
    let mut prev = (0, 0);
    for t in 0..2_000u64 {
        let mut inputs = TickInputs::with_presence(if t % 700 < 500 {
            CrossingMask::all(2)
        } else {
            CrossingMask::EMPTY
        });
        inputs.global.emergency = (900..950).contains(&t);
        let out = system.step(&inputs);
        assert!(out.safety_violation_count >= prev.0);
        assert!(out.delay_cycle_count >= prev.1);
        assert!(out.efficiency_score <= 100);
        prev = (out.safety_violation_count, out.delay_cycle_count);
    }
}
