//! Overlapping trains on three crossings do not interfere.

use crossing_common::state::CrossingState;
use crossing_controller::scenario::Scenario;
use crossing_controller::state::controller::CrossingEvent;

use super::run;

fn events_for(outputs: &[crossing_controller::cycle::TickOutputs], crossing: u8) -> Vec<CrossingEvent> {
    outputs
        .iter()
        .flat_map(|o| o.events.iter().copied())
        .filter(|e| e.crossing == crossing)
        .collect()
}

#[test]
fn every_crossing_passes_and_returns_to_idle() {
    let (system, outputs) = run(&Scenario::concurrent());

    for i in 0..3u8 {
        let events = events_for(&outputs, i);
        assert!(
            events.iter().any(|e| e.to == CrossingState::TrainPass),
            "crossing {i} never reached TRAIN_PASS"
        );
        assert_eq!(events.last().map(|e| e.to), Some(CrossingState::Idle));
        assert_eq!(system.statistics().completed_transits(i as usize), Some(1));
    }

    let last = outputs.last().unwrap();
    for i in 0..4 {
        assert_eq!(last.state(i), Some(CrossingState::Idle));
    }
}

#[test]
fn each_crossing_matches_its_solo_run() {
    let scenario = Scenario::concurrent();
    let (_, together) = run(&scenario);

    for (i, train) in scenario.trains.iter().enumerate() {
        let solo = Scenario {
            trains: vec![*train],
            ..scenario.clone()
        };
        let (_, alone) = run(&solo);
        assert_eq!(
            events_for(&together, i as u8),
            events_for(&alone, i as u8),
            "crossing {i}"
        );
    }
}

#[test]
fn overlap_is_real() {
    let (_, outputs) = run(&Scenario::concurrent());
    assert!(outputs.iter().any(|o| o.detected.count() == 3));
}
