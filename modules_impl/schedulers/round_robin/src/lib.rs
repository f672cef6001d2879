//! # Round-Robin Scheduler Module
//!
//! A simple, fair round-robin scheduler for schedsim.
//!
//! ## Features
//! - Fixed time slice per turn
//! - Turns rotate in PID order, wrapping around
//! - A process leaving for I/O gives up the rest of its slice
//!
//! ## Usage
//!
//! The registry builds one fresh [`RoundRobinScheduler`] per simulation run
//! via [`create_scheduler`].

#![deny(unsafe_code)]

mod config;
mod scheduler;

pub use config::RoundRobinConfig;
pub use scheduler::RoundRobinScheduler;

use schedsim_execution::ExecResult;

// =============================================================================
// Module Entry Point
// =============================================================================

/// Create a scheduler with the default 50ms slice
pub fn create_scheduler() -> ExecResult<RoundRobinScheduler> {
    RoundRobinScheduler::new(RoundRobinConfig::default())
}

/// Create a scheduler with custom config
pub fn create_scheduler_with_config(config: RoundRobinConfig) -> ExecResult<RoundRobinScheduler> {
    RoundRobinScheduler::new(config)
}
