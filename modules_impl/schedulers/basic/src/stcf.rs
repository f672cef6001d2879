//! # STCF Scheduler

use schedsim_execution::scheduler::is_runnable;
use schedsim_execution::{ExecResult, Pid, ProcessSnapshot, Scheduler};

/// Shortest time-to-completion first, preemptive
///
/// Re-evaluated every tick: the active process with the least remaining
/// CPU + I/O time wins, lowest PID on ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct StcfScheduler;

impl StcfScheduler {
    /// Create a new scheduler
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for StcfScheduler {
    fn name(&self) -> &'static str {
        "stcf"
    }

    fn decide(
        &mut self,
        active: &[ProcessSnapshot],
        now: u64,
        running: Option<Pid>,
    ) -> ExecResult<Option<Pid>> {
        let next = active
            .iter()
            .min_by_key(|p| (p.remaining(), p.pid))
            .map(|p| p.pid);
        if let (Some(current), Some(pid)) = (running, next) {
            if current != pid && is_runnable(active, current) {
                log::debug!("[stcf] t={}ms: pid {} preempts pid {}", now, pid, current);
            }
        }
        Ok(next)
    }
}
