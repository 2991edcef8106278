//! Two trains cross two different crossings on healthy sensors.

use crossing_common::config::TimingConfig;
use crossing_common::io::CrossingMask;
use crossing_common::state::CrossingState;
use crossing_controller::cycle::CrossingSystem;
use crossing_controller::scenario::{Scenario, TrainPass};
use crossing_controller::speed::speed_proxy;
use crossing_controller::statistics::efficiency_score;

use super::{drive, recount_violations, run};

#[test]
fn both_trains_complete_a_full_cycle() {
    let (system, outputs) = run(&Scenario::nominal());

    assert_eq!(system.statistics().completed_transits(0), Some(1));
    assert_eq!(system.statistics().completed_transits(1), Some(1));
    assert_eq!(system.statistics().total_transits(), 2);

    let last = outputs.last().unwrap();
    for i in 0..4 {
        assert_eq!(last.state(i), Some(CrossingState::Idle), "crossing {i}");
    }
    assert!(last.barrier_down.is_empty());
}

#[test]
fn sequence_follows_the_nominal_order() {
    let (_, outputs) = run(&Scenario::nominal());

    let path: Vec<(CrossingState, CrossingState)> = outputs
        .iter()
        .flat_map(|o| o.events.iter())
        .filter(|e| e.crossing == 0)
        .map(|e| (e.from, e.to))
        .collect();

    use CrossingState::*;
    assert_eq!(
        path,
        vec![
            (Idle, Warning),
            (Warning, Countdown),
            (Countdown, BarrierDown),
            (BarrierDown, TrainPass),
            (TrainPass, Idle),
        ]
    );
}

#[test]
fn exposure_only_before_the_barrier_closes() {
    let scenario = Scenario::nominal();
    let (system, outputs) = run(&scenario);
    let stats = system.statistics();

    assert_eq!(stats.safety_violation_count(), recount_violations(&outputs, 4));

    // Once a barrier is registered down, its train never sees it up again.
    for i in 0..2 {
        let mut closed = false;
        for (t, out) in outputs.iter().enumerate().skip(1) {
            let barrier_prev = outputs[t - 1].barrier_down.get(i);
            closed |= barrier_prev && out.detected.get(i);
            if closed && out.detected.get(i) {
                assert!(barrier_prev, "crossing {i} reopened under a train at tick {t}");
            }
        }
        assert!(closed, "crossing {i} never closed");
    }

    // No exposure accrues while crossing 0's train runs under a closed barrier.
    assert_eq!(
        outputs[400].safety_violation_count,
        outputs[899].safety_violation_count
    );

    // The only unnecessary closure is the tick each train leaves.
    assert_eq!(stats.delay_cycle_count(), 2);
    assert_eq!(
        stats.efficiency_score(),
        efficiency_score(stats.safety_violation_count(), stats.delay_cycle_count())
    );
}

#[test]
fn short_approach_keeps_efficiency_high() {
    let timing = TimingConfig {
        countdown_start: 1,
        ..TimingConfig::default()
    };
    let scenario = Scenario {
        trains: vec![
            TrainPass {
                crossing: 0,
                arrive: 40,
                occupy: 200,
            },
            TrainPass {
                crossing: 1,
                arrive: 300,
                occupy: 200,
            },
        ],
        ..Scenario::default()
    };

    let mut system = CrossingSystem::with_timing(2, timing);
    let outputs = drive(&mut system, &scenario, 700);
    let last = outputs.last().unwrap();

    assert_eq!(system.statistics().total_transits(), 2);
    assert!(last.safety_violation_count < 50);
    assert!(last.efficiency_score >= 90, "score {}", last.efficiency_score);
}

#[test]
fn speed_reported_on_exit() {
    let (_, outputs) = run(&Scenario::nominal());

    // Crossing 0 is occupied for ticks 10..810.
    let exit = &outputs[810];
    assert_eq!(exit.exited, CrossingMask::single(0));
    assert_eq!(exit.speed_valid, CrossingMask::single(0));
    assert_eq!(exit.speed_value[0], speed_proxy(1_000_000, 800));

    // The value holds after the one-tick valid pulse.
    assert!(outputs[811].speed_valid.is_empty());
    assert_eq!(outputs[811].speed_value[0], 1_250);
}
