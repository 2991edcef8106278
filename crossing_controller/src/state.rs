//! Crossing controller module root.
//!
//! - [`fsm`]: one finite-state machine per crossing
//! - [`outputs`]: state → actuator mapping
//! - [`controller`]: the fixed array of machines advanced together each tick

pub mod controller;
pub mod fsm;
pub mod outputs;
