//! Shared scenario drivers for the integration tests.

mod concurrent;
mod config_files;
mod emergency;
mod nominal;
mod reset_and_maintenance;
mod unsafe_exposure;

use crossing_controller::cycle::{CrossingSystem, TickOutputs};
use crossing_controller::scenario::Scenario;

/// Step `system` through `ticks` ticks of `scenario`, keeping every output.
pub fn drive(system: &mut CrossingSystem, scenario: &Scenario, ticks: u64) -> Vec<TickOutputs> {
    (0..ticks).map(|t| system.step(&scenario.inputs_at(t))).collect()
}

/// Run `scenario` on a fresh four-crossing system for its full length.
pub fn run(scenario: &Scenario) -> (CrossingSystem, Vec<TickOutputs>) {
    let mut system = CrossingSystem::with_crossings(4);
    let ticks = scenario.ticks.unwrap_or_else(|| scenario.horizon());
    let outputs = drive(&mut system, scenario, ticks);
    (system, outputs)
}

/// Recount exposure from the output stream: presence on a tick whose
/// previous tick left the barrier up.
pub fn recount_violations(outputs: &[TickOutputs], crossings: usize) -> u32 {
    let mut total = 0;
    for (t, out) in outputs.iter().enumerate() {
        for i in 0..crossings {
            let barrier_prev = t > 0 && outputs[t - 1].barrier_down.get(i);
            if out.detected.get(i) && !barrier_prev {
                total += 1;
            }
        }
    }
    total
}
