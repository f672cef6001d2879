//! # FIFO Scheduler

use schedsim_execution::{ExecResult, Pid, ProcessSnapshot, Scheduler};

/// First come, first served
///
/// Always picks the earliest-arrived active process, lowest PID on ties.
/// A process keeps the CPU until it ends, including while it waits on I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct FifoScheduler;

impl FifoScheduler {
    /// Create a new scheduler
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for FifoScheduler {
    fn name(&self) -> &'static str {
        "fifo"
    }

    fn decide(
        &mut self,
        active: &[ProcessSnapshot],
        _now: u64,
        _running: Option<Pid>,
    ) -> ExecResult<Option<Pid>> {
        Ok(active
            .iter()
            .min_by_key(|p| (p.arrival_time, p.pid))
            .map(|p| p.pid))
    }
}
