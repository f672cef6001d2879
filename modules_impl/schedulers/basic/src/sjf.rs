//! # SJF Scheduler

use schedsim_execution::scheduler::is_active;
use schedsim_execution::{ExecResult, Pid, ProcessSnapshot, Scheduler};

/// Shortest job first, non-preemptive
///
/// The running process keeps the CPU while it is active. Otherwise the
/// active process with the smallest total CPU + I/O duration is chosen,
/// lowest PID on ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct SjfScheduler;

impl SjfScheduler {
    /// Create a new scheduler
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for SjfScheduler {
    fn name(&self) -> &'static str {
        "sjf"
    }

    fn decide(
        &mut self,
        active: &[ProcessSnapshot],
        now: u64,
        running: Option<Pid>,
    ) -> ExecResult<Option<Pid>> {
        if let Some(current) = running {
            if is_active(active, current) {
                return Ok(Some(current));
            }
        }

        let next = active
            .iter()
            .min_by_key(|p| (p.total_duration, p.pid))
            .map(|p| p.pid);
        if let Some(pid) = next {
            log::debug!("[sjf] t={}ms: pid {} takes the CPU", now, pid);
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn test_keeps_running_process() {
        let mut s = SjfScheduler::new();
        let active = [
            ProcessSnapshot::new(Pid::new(0), 0, 100),
            ProcessSnapshot::new(Pid::new(1), 0, 10),
        ];
        assert_eq!(s.decide(&active, 0, Some(Pid::new(0))).unwrap(), Some(Pid::new(0)));
        assert_eq!(s.decide(&active, 0, None).unwrap(), Some(Pid::new(1)));
    }

    #[test]
    fn test_ties_go_to_lowest_pid() {
        let mut s = SjfScheduler::new();
        let active = [
            ProcessSnapshot::new(Pid::new(2), 0, 30),
            ProcessSnapshot::new(Pid::new(4), 0, 30),
        ];
        assert_eq!(s.decide(&active, 0, None).unwrap(), Some(Pid::new(2)));
    }

    #[test]
    fn test_shortest_first_to_completion() {
        let (result, cpu) = testing::run(&[(0, 100), (0, 20), (0, 50)], Box::new(SjfScheduler::new()));

        let mut expected = vec![Some(1); 2];
        expected.extend(vec![Some(2); 5]);
        expected.extend(vec![Some(0); 10]);
        assert_eq!(cpu, expected);
        assert_eq!(result.process(Pid::new(0)).unwrap().response_time, 70);
        assert_eq!(result.metrics.preemptions(), 0);
    }
}
