//! Declarative stimulus for driving the controller.
//!
//! A scenario lists trains, stuck sensors, emergency and maintenance windows
//! and weather changes; [`Scenario::inputs_at`] turns that into the input
//! vector for a given tick. It makes no decisions of its own.
//!
//! # TOML Example
//!
//! ```toml
//! name = "sensor-fault"
//! ticks = 2000
//!
//! [[train]]
//! crossing = 1
//! arrive = 20
//! occupy = 800
//!
//! [[fault]]
//! crossing = 1
//! sensor = "ir"
//! stuck = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crossing_common::config::{ConfigError, ConfigLoader};
use crossing_common::io::{CrossingMask, TickInputs};
use crossing_common::state::WeatherMode;

/// Scenario loading or validation error.
#[derive(Debug, Clone, Error)]
pub enum ScenarioError {
    #[error("scenario file: {0}")]
    Load(#[from] ConfigError),

    #[error("{kind} references crossing {crossing}, but only {count} crossings are configured")]
    CrossingOutOfRange {
        kind: &'static str,
        crossing: usize,
        count: usize,
    },

    #[error("{kind} window starting at tick {from} is empty")]
    EmptyWindow { kind: &'static str, from: u64 },
}

/// Half-open tick window `[from, until)`. Open-ended when `until` is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    #[serde(default)]
    pub from: u64,
    #[serde(default)]
    pub until: Option<u64>,
}

impl Window {
    pub const fn always() -> Self {
        Self {
            from: 0,
            until: None,
        }
    }

    pub const fn new(from: u64, until: u64) -> Self {
        Self {
            from,
            until: Some(until),
        }
    }

    #[inline]
    pub const fn contains(&self, tick: u64) -> bool {
        tick >= self.from
            && match self.until {
                Some(until) => tick < until,
                None => true,
            }
    }

    const fn is_empty(&self) -> bool {
        matches!(self.until, Some(until) if until <= self.from)
    }
}

/// One train occupying a crossing for `occupy` ticks from `arrive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainPass {
    pub crossing: usize,
    pub arrive: u64,
    pub occupy: u64,
}

impl TrainPass {
    #[inline]
    pub const fn present_at(&self, tick: u64) -> bool {
        tick >= self.arrive && tick - self.arrive < self.occupy
    }
}

/// Which redundant sensor line a fault applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorLine {
    Ir,
    Vib,
    Rfid,
}

/// Sensor line held at a fixed value regardless of traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorFault {
    pub crossing: usize,
    pub sensor: SensorLine,
    /// Value the line is stuck at.
    #[serde(default)]
    pub stuck: bool,
    #[serde(flatten)]
    pub window: Window,
}

/// Maintenance request on one crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceWindow {
    pub crossing: usize,
    #[serde(flatten)]
    pub window: Window,
}

/// Weather input change taking effect at `at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherChange {
    pub at: u64,
    pub mode: WeatherMode,
}

/// Complete stimulus description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    /// Suggested run length in ticks.
    #[serde(default)]
    pub ticks: Option<u64>,
    #[serde(default, rename = "train")]
    pub trains: Vec<TrainPass>,
    #[serde(default, rename = "fault")]
    pub faults: Vec<SensorFault>,
    #[serde(default, rename = "emergency")]
    pub emergencies: Vec<Window>,
    #[serde(default)]
    pub maintenance: Vec<MaintenanceWindow>,
    #[serde(default)]
    pub weather: Vec<WeatherChange>,
    /// Ticks on which a global reset is asserted.
    #[serde(default)]
    pub resets: Vec<u64>,
}

impl Scenario {
    /// Load a scenario from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        Ok(<Self as ConfigLoader>::load(path)?)
    }

    /// Parse a scenario from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ScenarioError> {
        Ok(<Self as ConfigLoader>::parse(content)?)
    }

    /// Check that every referenced crossing exists and no window is empty.
    pub fn validate(&self, crossing_count: usize) -> Result<(), ScenarioError> {
        let check = |kind: &'static str, crossing: usize| {
            if crossing >= crossing_count {
                Err(ScenarioError::CrossingOutOfRange {
                    kind,
                    crossing,
                    count: crossing_count,
                })
            } else {
                Ok(())
            }
        };

        for train in &self.trains {
            check("train", train.crossing)?;
            if train.occupy == 0 {
                return Err(ScenarioError::EmptyWindow {
                    kind: "train",
                    from: train.arrive,
                });
            }
        }
        for fault in &self.faults {
            check("fault", fault.crossing)?;
            if fault.window.is_empty() {
                return Err(ScenarioError::EmptyWindow {
                    kind: "fault",
                    from: fault.window.from,
                });
            }
        }
        for m in &self.maintenance {
            check("maintenance", m.crossing)?;
            if m.window.is_empty() {
                return Err(ScenarioError::EmptyWindow {
                    kind: "maintenance",
                    from: m.window.from,
                });
            }
        }
        for w in &self.emergencies {
            if w.is_empty() {
                return Err(ScenarioError::EmptyWindow {
                    kind: "emergency",
                    from: w.from,
                });
            }
        }
        Ok(())
    }

    /// Last tick any stimulus is active, plus one. Saturates at `u64::MAX`.
    pub fn horizon(&self) -> u64 {
        let trains = self.trains.iter().map(|t| t.arrive.saturating_add(t.occupy));
        let windows = self
            .emergencies
            .iter()
            .chain(self.faults.iter().map(|f| &f.window))
            .chain(self.maintenance.iter().map(|m| &m.window))
            .map(|w| w.until.unwrap_or(w.from.saturating_add(1)));
        let points = self
            .weather
            .iter()
            .map(|w| w.at.saturating_add(1))
            .chain(self.resets.iter().map(|&r| r.saturating_add(1)));
        trains.chain(windows).chain(points).max().unwrap_or(0)
    }

    /// Input vector for `tick`.
    pub fn inputs_at(&self, tick: u64) -> TickInputs {
        let present = self
            .trains
            .iter()
            .filter(|t| t.present_at(tick))
            .fold(CrossingMask::EMPTY, |m, t| m.with(t.crossing, true));

        let mut inputs = TickInputs::with_presence(present);

        for fault in self.faults.iter().filter(|f| f.window.contains(tick)) {
            let line = match fault.sensor {
                SensorLine::Ir => &mut inputs.sensors.ir,
                SensorLine::Vib => &mut inputs.sensors.vib,
                SensorLine::Rfid => &mut inputs.sensors.rfid,
            };
            line.set(fault.crossing, fault.stuck);
        }

        inputs.maintenance = self
            .maintenance
            .iter()
            .filter(|m| m.window.contains(tick))
            .fold(CrossingMask::EMPTY, |mask, m| mask.with(m.crossing, true));

        inputs.global.emergency = self.emergencies.iter().any(|w| w.contains(tick));
        inputs.global.weather = self
            .weather
            .iter()
            .filter(|w| w.at <= tick)
            .max_by_key(|w| w.at)
            .map_or(WeatherMode::Clear, |w| w.mode);
        inputs.global.reset = self.resets.contains(&tick);

        inputs
    }

    // ─── Built-in scenarios ─────────────────────────────────────────

    /// Two trains cross two different crossings one after the other.
    ///
    /// Exposure is counted per tick, so each train accrues violations while
    /// its crossing is in WARNING and COUNTDOWN with the barrier still up.
    /// Under default timing this run ends with a score in the mid 80s; a
    /// shorter `countdown_start` closes the barrier sooner and scores higher.
    pub fn nominal() -> Self {
        Self {
            name: "nominal".to_string(),
            ticks: Some(2_000),
            trains: vec![
                TrainPass {
                    crossing: 0,
                    arrive: 10,
                    occupy: 800,
                },
                TrainPass {
                    crossing: 1,
                    arrive: 900,
                    occupy: 800,
                },
            ],
            ..Self::default()
        }
    }

    /// One train on crossing 1 with its infrared sensor dead for the whole run.
    pub fn sensor_fault() -> Self {
        Self {
            name: "sensor-fault".to_string(),
            ticks: Some(1_200),
            trains: vec![TrainPass {
                crossing: 1,
                arrive: 20,
                occupy: 800,
            }],
            faults: vec![SensorFault {
                crossing: 1,
                sensor: SensorLine::Ir,
                stuck: false,
                window: Window::always(),
            }],
            ..Self::default()
        }
    }

    /// Three crossings with overlapping, staggered trains.
    pub fn concurrent() -> Self {
        Self {
            name: "concurrent".to_string(),
            ticks: Some(1_600),
            trains: (0..3)
                .map(|i| TrainPass {
                    crossing: i,
                    arrive: 10 + 150 * i as u64,
                    occupy: 900,
                })
                .collect(),
            ..Self::default()
        }
    }

    /// A train on every crossing, interrupted by an emergency drill.
    pub fn emergency_drill() -> Self {
        Self {
            name: "emergency-drill".to_string(),
            ticks: Some(1_500),
            trains: (0..4)
                .map(|i| TrainPass {
                    crossing: i,
                    arrive: 10 + 40 * i as u64,
                    occupy: 900,
                })
                .collect(),
            emergencies: vec![Window::new(200, 300)],
            ..Self::default()
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
