//! # MLFQ Scheduler Module
//!
//! A multi-level feedback queue scheduler for schedsim.
//!
//! ## Features
//! - Three priority levels by default, with growing time slices
//! - Demotion once a job uses up its slice at a level
//! - Round-robin rotation within a level
//! - Jobs on I/O are skipped without losing their queue position
//! - Periodic priority boost against starvation
//!
//! ## Usage
//!
//! The registry builds one fresh [`MlfqScheduler`] per simulation run via
//! [`create_scheduler`].

#![deny(unsafe_code)]

mod config;
pub mod queue;
mod scheduler;

pub use config::MlfqConfig;
pub use queue::{Charge, Job, MultilevelQueue};
pub use scheduler::MlfqScheduler;

use schedsim_execution::{ExecResult, SimConfig};

// =============================================================================
// Module Entry Point
// =============================================================================

/// Create a scheduler with default levels, ticking at the simulation's rate
pub fn create_scheduler(sim: &SimConfig) -> ExecResult<MlfqScheduler> {
    MlfqScheduler::new(MlfqConfig::for_simulation(sim))
}

/// Create a scheduler with custom config
pub fn create_scheduler_with_config(config: MlfqConfig) -> ExecResult<MlfqScheduler> {
    MlfqScheduler::new(config)
}
