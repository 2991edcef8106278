//! Global reset, maintenance requests and weather input.

use crossing_common::io::{CrossingMask, TickInputs};
use crossing_common::state::{CrossingState, WeatherMode};
use crossing_controller::cycle::CrossingSystem;
use crossing_controller::scenario::{MaintenanceWindow, Scenario, TrainPass, WeatherChange, Window};

use super::{drive, run};

#[test]
fn reset_clears_everything_mid_transit() {
    let scenario = Scenario {
        resets: vec![500],
        ..Scenario::nominal()
    };
    let mut system = CrossingSystem::with_crossings(4);
    let outputs = drive(&mut system, &scenario, 501);

    assert!(outputs[499].safety_violation_count > 0);
    assert!(outputs[499].barrier_down.get(0));

    let reset = &outputs[500];
    assert!(reset.reset);
    assert_eq!(reset.tick, 0);
    assert_eq!(reset.crossing_states, 0);
    assert!(reset.barrier_down.is_empty());
    assert!(reset.detected.is_empty());
    assert_eq!(reset.safety_violation_count, 0);
    assert_eq!(reset.delay_cycle_count, 0);
    assert_eq!(reset.efficiency_score, 100);
    assert_eq!(system.ticks(), 0);

    // The train is still there: the crossing starts over from IDLE.
    let out = system.step(&scenario.inputs_at(501));
    assert_eq!(out.tick, 0);
    assert!(!out.reset);
    assert_eq!(out.state(0), Some(CrossingState::Warning));
    assert_eq!(out.safety_violation_count, 1);
}

#[test]
fn maintenance_window_parks_the_crossing() {
    let scenario = Scenario {
        maintenance: vec![MaintenanceWindow {
            crossing: 2,
            window: Window::new(10, 100),
        }],
        trains: vec![TrainPass {
            crossing: 2,
            arrive: 50,
            occupy: 20,
        }],
        ..Scenario::default()
    };
    let mut system = CrossingSystem::with_crossings(4);
    let outputs = drive(&mut system, &scenario, 120);

    assert_eq!(outputs[9].state(2), Some(CrossingState::Idle));
    for out in &outputs[10..100] {
        assert_eq!(out.state(2), Some(CrossingState::Maintenance));
        assert!(out.barrier_down.is_empty());
        assert!(out.red_light.is_empty());
    }
    assert_eq!(outputs[100].state(2), Some(CrossingState::Idle));

    // Other crossings are unaffected.
    assert!(outputs.iter().all(|o| o.state(0) == Some(CrossingState::Idle)));
}

#[test]
fn presence_beats_maintenance_in_idle() {
    let mut system = CrossingSystem::with_crossings(1);
    let mut inputs = TickInputs::with_presence(CrossingMask::single(0));
    inputs.maintenance = CrossingMask::single(0);

    let out = system.step(&inputs);
    assert_eq!(out.state(0), Some(CrossingState::Warning));
}

#[test]
fn emergency_overrides_maintenance() {
    let mut system = CrossingSystem::with_crossings(1);
    let mut inputs = TickInputs {
        maintenance: CrossingMask::single(0),
        ..TickInputs::default()
    };
    assert_eq!(system.step(&inputs).state(0), Some(CrossingState::Maintenance));

    inputs.global.emergency = true;
    assert_eq!(system.step(&inputs).state(0), Some(CrossingState::Emergency));
}

#[test]
fn weather_is_recorded_but_does_not_change_timing() {
    let clear = Scenario::nominal();
    let stormy = Scenario {
        weather: vec![
            WeatherChange {
                at: 0,
                mode: WeatherMode::Rain,
            },
            WeatherChange {
                at: 600,
                mode: WeatherMode::Storm,
            },
        ],
        ..clear.clone()
    };

    let (_, clear_out) = run(&clear);
    let (stormy_system, stormy_out) = run(&stormy);

    assert_eq!(clear_out, stormy_out);
    assert_eq!(stormy_system.weather(), WeatherMode::Storm);
}
