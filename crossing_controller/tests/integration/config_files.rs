//! Configuration and scenario files on disk.

use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use crossing_common::config::ConfigError;
use crossing_common::state::CrossingState;
use crossing_controller::config::load_config;
use crossing_controller::runner::CycleRunner;
use crossing_controller::scenario::{Scenario, ScenarioError};
use tempfile::NamedTempFile;

fn repo_file(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join(relative)
}

#[test]
fn shipped_configuration_is_valid() {
    let config = load_config(&repo_file("config/controller.toml")).unwrap();
    assert_eq!(config.crossing_count, 4);
}

#[test]
fn shipped_scenarios_run_to_completion() {
    let config = load_config(&repo_file("config/controller.toml")).unwrap();
    for name in ["nominal", "emergency_drill"] {
        let path = repo_file(&format!("config/scenarios/{name}.toml"));
        let scenario = Scenario::load(&path).unwrap();
        let mut runner = CycleRunner::new(&config, scenario).unwrap();
        let ticks = runner.default_ticks();
        let summary = runner.run(ticks, &AtomicBool::new(true), |_| {});

        assert_eq!(summary.ticks, ticks, "{name}");
        assert!(summary.completed_transits > 0, "{name}");
        assert!(
            summary.final_states.iter().all(|s| *s == CrossingState::Idle),
            "{name}"
        );
    }
}

#[test]
fn custom_config_from_tempfile() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"crossing_count = 2

[shared]
service_name = "branch-line"

[timing]
countdown_start = 2
"#
    )
    .unwrap();
    file.flush().unwrap();

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.crossing_count, 2);
    assert_eq!(config.timing.countdown_start, 2);

    // Nominal uses crossings 0 and 1 only.
    let mut runner = CycleRunner::new(&config, Scenario::nominal()).unwrap();
    let summary = runner.run(2_000, &AtomicBool::new(true), |_| {});
    assert_eq!(summary.completed_transits, 2);
    assert_eq!(summary.final_states.len(), 2);
}

#[test]
fn invalid_config_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "crossing_count = 12").unwrap();
    file.flush().unwrap();

    assert!(matches!(
        load_config(file.path()),
        Err(ConfigError::ValidationError(_))
    ));
}

#[test]
fn scenario_for_missing_crossing_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"name = "bad"

[[train]]
crossing = 6
arrive = 0
occupy = 10
"#
    )
    .unwrap();
    file.flush().unwrap();

    let scenario = Scenario::load(file.path()).unwrap();
    let config = load_config(&repo_file("config/controller.toml")).unwrap();
    assert!(matches!(
        CycleRunner::new(&config, scenario),
        Err(ScenarioError::CrossingOutOfRange { crossing: 6, .. })
    ));
}

#[test]
fn missing_scenario_file() {
    assert!(matches!(
        Scenario::load(&repo_file("config/scenarios/does_not_exist.toml")),
        Err(ScenarioError::Load(ConfigError::FileNotFound))
    ));
}
