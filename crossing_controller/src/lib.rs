//! # Level-Crossing Controller
//!
//! Lock-step controller for a bank of railway level crossings. Every tick the
//! system samples three redundant presence sensors per crossing, votes them,
//! advances one state machine per crossing, drives the barrier, lights and
//! alarm, estimates train speed from occupancy time and keeps running safety
//! and delay statistics.
//!
//! ## Tick Pipeline
//!
//! 1. **SensorFusionVoter**: 2-of-3 majority, exit edge, health
//! 2. **CrossingController**: per-crossing state machines and actuators
//! 3. **SpeedEstimator**: occupancy timers and inverse-time speed proxy
//! 4. **StatisticsEngine**: exposure and delay counters, efficiency score
//!
//! [`cycle::CrossingSystem::step`] runs the four in that order and returns a
//! [`cycle::TickOutputs`] snapshot. [`runner::CycleRunner`] drives the step
//! function from a [`scenario::Scenario`].
//!
//! ## Zero-Allocation Step
//!
//! All per-crossing state lives in fixed arrays sized for the maximum crossing
//! count. A step performs no heap allocation.

pub mod config;
pub mod cycle;
pub mod fusion;
pub mod runner;
pub mod scenario;
pub mod speed;
pub mod state;
pub mod statistics;
