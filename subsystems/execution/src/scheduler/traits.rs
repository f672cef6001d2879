//! # Scheduler Traits
//!
//! Defines the trait that policy implementations must implement and the
//! snapshot they observe.

use crate::process::{ProcessExecution, ProcessState};
use crate::{ExecResult, Pid};
use core::fmt;

/// Process information for scheduling
///
/// Rebuilt by the engine every tick. Only arrived, not-yet-ended processes
/// are included, in ascending PID order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessSnapshot {
    /// Process ID
    pub pid: Pid,
    /// Is the process inside an I/O burst?
    pub on_io: bool,
    /// Cumulative progress (ms)
    pub executed_time: u64,
    /// Arrival time (ms)
    pub arrival_time: u64,
    /// Total CPU + I/O duration (ms)
    pub total_duration: u64,
}

impl ProcessSnapshot {
    /// Create a snapshot of a runnable process
    pub fn new(pid: Pid, arrival_time: u64, total_duration: u64) -> Self {
        Self {
            pid,
            on_io: false,
            executed_time: 0,
            arrival_time,
            total_duration,
        }
    }

    /// Mark as inside an I/O burst
    pub fn on_io(mut self) -> Self {
        self.on_io = true;
        self
    }

    /// Set the progress
    pub fn with_executed(mut self, executed_time: u64) -> Self {
        self.executed_time = executed_time;
        self
    }

    /// Time left until completion
    pub fn remaining(&self) -> u64 {
        self.total_duration.saturating_sub(self.executed_time)
    }

    /// Snapshot an active process, `None` otherwise
    pub fn capture(process: &ProcessExecution) -> Option<Self> {
        if !process.state().is_active() {
            return None;
        }
        let definition = process.definition();
        Some(Self {
            pid: process.pid(),
            on_io: process.state() == ProcessState::OnIo,
            executed_time: process.executed_time(),
            arrival_time: definition.arrival_time(),
            total_duration: definition.total_duration(),
        })
    }
}

/// The core scheduler trait
///
/// All policy implementations must implement this trait. `decide` is
/// invoked once per tick while at least one process is active.
///
/// The returned PID must be `running` or the PID of an entry in `active`.
/// `Ok(None)` idles the CPU for one tick and is only legal when every active
/// process is on I/O. Policies may keep private state, but it must evolve
/// deterministically from the sequence of calls.
pub trait Scheduler: fmt::Debug {
    /// Get the policy name
    fn name(&self) -> &'static str;

    /// Pick the process that holds the CPU for the next tick
    fn decide(
        &mut self,
        active: &[ProcessSnapshot],
        now: u64,
        running: Option<Pid>,
    ) -> ExecResult<Option<Pid>>;
}

/// Is `pid` present and runnable in the snapshot?
pub fn is_runnable(active: &[ProcessSnapshot], pid: Pid) -> bool {
    active.iter().any(|p| p.pid == pid && !p.on_io)
}

/// Is `pid` present in the snapshot?
pub fn is_active(active: &[ProcessSnapshot], pid: Pid) -> bool {
    active.iter().any(|p| p.pid == pid)
}
