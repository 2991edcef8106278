//! # Level-Crossing Controller
//!
//! Runs the lock-step crossing controller against a scenario and logs a run
//! summary. Scenarios come from a TOML file (`--scenario`) or one of the
//! built-in drills (`--builtin`). With `--trace` every tick's output vector is
//! written to stdout as one JSON line.

use clap::{Parser, ValueEnum};
use crossing_common::config::ControllerConfig;
use crossing_controller::config::load_config;
use crossing_controller::runner::CycleRunner;
use crossing_controller::scenario::Scenario;
use std::io::Write;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Built-in scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Builtin {
    /// Two trains on healthy sensors.
    Nominal,
    /// One stuck infrared line; the other two still vote.
    SensorFault,
    /// Four overlapping trains.
    Concurrent,
    /// Trains in flight when the global emergency line is raised.
    EmergencyDrill,
}

impl Builtin {
    fn scenario(self) -> Scenario {
        match self {
            Self::Nominal => Scenario::nominal(),
            Self::SensorFault => Scenario::sensor_fault(),
            Self::Concurrent => Scenario::concurrent(),
            Self::EmergencyDrill => Scenario::emergency_drill(),
        }
    }
}

/// Railway level-crossing controller
#[derive(Parser, Debug)]
#[command(name = "crossing_controller")]
#[command(version)]
#[command(about = "Lock-step level-crossing controller with sensor voting and safety statistics")]
struct Args {
    /// Path to the controller configuration TOML. Defaults apply when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Path to a scenario TOML. Overrides --builtin.
    #[arg(short, long, value_name = "FILE")]
    scenario: Option<PathBuf>,

    /// Built-in scenario to run when no scenario file is given.
    #[arg(long, value_enum, default_value_t = Builtin::Nominal)]
    builtin: Builtin,

    /// Number of ticks to run (default: scenario length).
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Sleep out each tick period instead of running flat out.
    #[arg(long)]
    paced: bool,

    /// Print every tick's output vector as a JSON line on stdout.
    #[arg(long)]
    trace: bool,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    let config = match args.config.as_deref().map(load_config).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            setup_tracing(&args, Level::INFO);
            error!("FATAL: {e}");
            process::exit(1);
        }
    };

    setup_tracing(&args, config.shared.log_level.into());

    info!(
        "Crossing controller v{} starting ({})",
        env!("CARGO_PKG_VERSION"),
        config.shared.service_name
    );

    if let Err(e) = run(&args, &config) {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("Crossing controller shutdown complete");
}

fn run(args: &Args, config: &ControllerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = match args.scenario {
        Some(ref path) => {
            info!("Loading scenario from {}", path.display());
            Scenario::load(path)?
        }
        None => args.builtin.scenario(),
    };

    info!(
        "Config OK: crossings={}, cycle_time={}µs",
        config.crossing_count, config.cycle_time_us
    );

    let mut runner = CycleRunner::new(config, scenario)?.paced(args.paced);
    let ticks = args.ticks.unwrap_or_else(|| runner.default_ticks());

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    })?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut write_failed = false;

    let summary = runner.run(ticks, &running, |tick| {
        if !args.trace || write_failed {
            return;
        }
        let line = serde_json::to_string(tick).map_err(std::io::Error::other);
        if let Err(e) = line.and_then(|l| writeln!(out, "{l}")) {
            warn!("trace output stopped: {e}");
            write_failed = true;
        }
    });

    info!(
        scenario = %summary.scenario,
        ticks = summary.ticks,
        safety_violations = summary.safety_violation_count,
        delay_cycles = summary.delay_cycle_count,
        efficiency = summary.efficiency_score,
        transits = summary.completed_transits,
        "run complete"
    );
    info!(
        "Cycle timing: avg={}ns min={}ns max={}ns overruns={}",
        summary.timing.avg_cycle_ns(),
        summary.timing.min_cycle_ns,
        summary.timing.max_cycle_ns,
        summary.timing.overruns
    );
    for (index, state) in summary.final_states.iter().enumerate() {
        info!(crossing = index, state = %state, "final state");
    }

    Ok(())
}

fn setup_tracing(args: &Args, configured: Level) {
    let level = if args.verbose { Level::DEBUG } else { configured };

    // Logs go to stderr so `--trace` output stays machine-readable.
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}
