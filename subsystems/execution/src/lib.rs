//! # schedsim Execution Subsystem
//!
//! The execution subsystem manages:
//! - Process definitions and their per-run execution state
//! - The scheduling policy interface
//! - The tick-driven simulation engine
//! - I/O completion selection
//! - Run results and scheduler metrics
//!
//! ## Key Principle
//!
//! This subsystem provides the FRAMEWORK, not the policies.
//! Every scheduling algorithm lives in its own crate and is plugged into
//! the [`engine::Engine`] through the [`scheduler::Scheduler`] trait.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod engine;
pub mod io;
pub mod process;
pub mod results;
pub mod scheduler;

use core::fmt;

pub use config::{SimConfig, SimFlags};
pub use engine::{Engine, TickObserver, TickRecord};
pub use process::{Phase, ProcessDefinition, ProcessExecution, ProcessState};
pub use results::{ProcessResult, SimulationResult, Summary};
pub use scheduler::{ProcessSnapshot, Scheduler};

/// Process identifier
///
/// A PID is the 0-based position of the process definition in the loaded
/// list. "No process" is expressed as `Option<Pid>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pid(usize);

impl Pid {
    /// Create a PID from a definition index
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the definition index
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Execution result type
pub type ExecResult<T> = Result<T, ExecError>;

/// Execution errors
///
/// Every variant is a contract violation: the run is aborted and the error
/// is handed back to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    /// A process definition is malformed
    InvalidDefinition(String),
    /// A policy returned a PID that is neither active nor running
    InvalidNextPid {
        /// Offending PID
        pid: Pid,
        /// Simulated time of the decision
        tick: u64,
    },
    /// A policy idled while a runnable process was available
    IdleWithRunnable {
        /// Simulated time of the decision
        tick: u64,
    },
    /// A policy queried its private state for a PID it does not hold
    UnknownPid(Pid),
    /// A process attempted a lifecycle transition that is not allowed
    InvalidTransition {
        /// Process
        pid: Pid,
        /// State before
        from: ProcessState,
        /// Attempted state
        to: ProcessState,
    },
    /// Configuration rejected
    InvalidConfig(String),
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecError::InvalidDefinition(msg) => write!(f, "invalid process definition: {}", msg),
            ExecError::InvalidNextPid { pid, tick } => {
                write!(f, "invalid next pid {} at t={}ms", pid, tick)
            }
            ExecError::IdleWithRunnable { tick } => {
                write!(f, "policy idled at t={}ms while a process was runnable", tick)
            }
            ExecError::UnknownPid(pid) => write!(f, "pid {} is not tracked by the policy", pid),
            ExecError::InvalidTransition { pid, from, to } => {
                write!(f, "pid {}: invalid transition {:?} -> {:?}", pid, from, to)
            }
            ExecError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ExecError {}
