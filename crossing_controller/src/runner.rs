//! Scenario runner: feeds a scenario into the step function, optionally
//! paced to the configured tick period.
//!
//! ## Cycle Loop
//! Unpaced runs step as fast as possible (tests, offline traces). Paced runs
//! sleep out the remainder of each tick period and count overruns; an overrun
//! is logged but never stops the loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, warn};

use crossing_common::config::ControllerConfig;
use crossing_common::consts::MAX_CROSSINGS;
use crossing_common::state::CrossingState;

use crate::cycle::{CrossingSystem, TickOutputs};
use crate::scenario::{Scenario, ScenarioError};

// ─── Cycle Statistics ───────────────────────────────────────────────

/// O(1) per-tick timing statistics.
#[derive(Debug, Clone, Serialize)]
pub struct CycleStats {
    /// Total ticks executed.
    pub cycle_count: u64,
    /// Last step duration [ns].
    pub last_cycle_ns: u64,
    /// Minimum step duration [ns].
    pub min_cycle_ns: u64,
    /// Maximum step duration [ns].
    pub max_cycle_ns: u64,
    /// Running sum for average computation.
    pub sum_cycle_ns: u64,
    /// Number of ticks that exceeded the period.
    pub overruns: u64,
}

impl CycleStats {
    pub const fn new() -> Self {
        Self {
            cycle_count: 0,
            last_cycle_ns: 0,
            min_cycle_ns: u64::MAX,
            max_cycle_ns: 0,
            sum_cycle_ns: 0,
            overruns: 0,
        }
    }

    /// Record a step duration. O(1), no allocation.
    #[inline]
    pub fn record(&mut self, duration_ns: u64) {
        self.cycle_count += 1;
        self.last_cycle_ns = duration_ns;
        self.min_cycle_ns = self.min_cycle_ns.min(duration_ns);
        self.max_cycle_ns = self.max_cycle_ns.max(duration_ns);
        self.sum_cycle_ns = self.sum_cycle_ns.saturating_add(duration_ns);
    }

    /// Average step time [ns] (0 if no ticks).
    #[inline]
    pub fn avg_cycle_ns(&self) -> u64 {
        if self.cycle_count == 0 {
            0
        } else {
            self.sum_cycle_ns / self.cycle_count
        }
    }
}

impl Default for CycleStats {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Run Summary ────────────────────────────────────────────────────

/// End-of-run summary.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub scenario: String,
    pub ticks: u64,
    pub safety_violation_count: u32,
    pub delay_cycle_count: u32,
    pub efficiency_score: u8,
    pub completed_transits: u32,
    pub final_states: Vec<CrossingState>,
    pub timing: CycleStats,
}

// ─── Cycle Runner ───────────────────────────────────────────────────

pub struct CycleRunner {
    system: CrossingSystem,
    scenario: Scenario,
    cycle_time: Duration,
    paced: bool,
    stats: CycleStats,
}

impl CycleRunner {
    /// Create a runner for `scenario` on a freshly reset system.
    pub fn new(config: &ControllerConfig, scenario: Scenario) -> Result<Self, ScenarioError> {
        scenario.validate(config.crossing_count)?;
        info!(
            scenario = %scenario.name,
            crossings = config.crossing_count,
            "scenario loaded"
        );
        Ok(Self {
            system: CrossingSystem::new(config),
            scenario,
            cycle_time: Duration::from_micros(u64::from(config.cycle_time_us)),
            paced: false,
            stats: CycleStats::new(),
        })
    }

    /// Sleep out each tick period.
    pub fn paced(mut self, paced: bool) -> Self {
        self.paced = paced;
        self
    }

    pub const fn system(&self) -> &CrossingSystem {
        &self.system
    }

    pub const fn stats(&self) -> &CycleStats {
        &self.stats
    }

    /// Default run length: the scenario's own, else its horizon plus slack.
    pub fn default_ticks(&self) -> u64 {
        self.scenario
            .ticks
            .unwrap_or_else(|| self.scenario.horizon().saturating_add(1_000))
    }

    /// Step `ticks` times, or until `running` is cleared.
    pub fn run<F>(&mut self, ticks: u64, running: &AtomicBool, mut on_tick: F) -> RunSummary
    where
        F: FnMut(&TickOutputs),
    {
        let mut executed = 0;

        while executed < ticks && running.load(Ordering::SeqCst) {
            let start = Instant::now();

            let inputs = self.scenario.inputs_at(executed);
            let outputs = self.system.step(&inputs);
            on_tick(&outputs);

            let elapsed = start.elapsed();
            self.stats.record(elapsed.as_nanos() as u64);
            executed += 1;

            if self.paced {
                match self.cycle_time.checked_sub(elapsed) {
                    Some(remaining) => std::thread::sleep(remaining),
                    None => {
                        self.stats.overruns += 1;
                        debug!(tick = executed, ?elapsed, "tick overran its period");
                    }
                }
            }
        }

        if executed < ticks {
            warn!(executed, requested = ticks, "run interrupted");
        }

        self.summary(executed)
    }

    fn summary(&self, ticks: u64) -> RunSummary {
        let count = self.system.crossing_count().min(MAX_CROSSINGS);
        let stats = self.system.statistics();
        RunSummary {
            scenario: self.scenario.name.clone(),
            ticks,
            safety_violation_count: stats.safety_violation_count(),
            delay_cycle_count: stats.delay_cycle_count(),
            efficiency_score: stats.efficiency_score(),
            completed_transits: stats.total_transits(),
            final_states: (0..count).map(|i| self.system.controller().state(i)).collect(),
            timing: self.stats.clone(),
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
