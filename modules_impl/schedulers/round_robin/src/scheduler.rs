//! # Round-Robin Scheduler Implementation

use crate::RoundRobinConfig;
use schedsim_execution::scheduler::is_runnable;
use schedsim_execution::{ExecResult, Pid, ProcessSnapshot, Scheduler};

/// Round-Robin Scheduler
///
/// The running process keeps the CPU until its slice is used up or it
/// leaves the CPU for I/O. The turn then passes to the next runnable PID
/// after the last one served, wrapping around.
#[derive(Debug, Clone)]
pub struct RoundRobinScheduler {
    /// Configuration
    config: RoundRobinConfig,
    /// Last PID given a turn
    cursor: Option<Pid>,
    /// When that turn started (ms)
    slice_start: u64,
}

impl RoundRobinScheduler {
    /// Create a new scheduler
    pub fn new(config: RoundRobinConfig) -> ExecResult<Self> {
        config.validate()?;
        log::info!("[round-robin] time slice {}ms", config.time_slice_ms);

        Ok(Self {
            config,
            cursor: None,
            slice_start: 0,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &RoundRobinConfig {
        &self.config
    }

    /// Next runnable PID after the cursor, wrapping
    fn next_turn(&self, active: &[ProcessSnapshot]) -> Option<Pid> {
        let mut runnable = active.iter().filter(|p| !p.on_io).map(|p| p.pid);
        match self.cursor {
            None => runnable.next(),
            Some(cursor) => {
                let mut first = None;
                for pid in runnable {
                    if pid > cursor {
                        return Some(pid);
                    }
                    first.get_or_insert(pid);
                }
                first
            }
        }
    }
}

impl Scheduler for RoundRobinScheduler {
    fn name(&self) -> &'static str {
        "rr"
    }

    fn decide(
        &mut self,
        active: &[ProcessSnapshot],
        now: u64,
        running: Option<Pid>,
    ) -> ExecResult<Option<Pid>> {
        if let Some(current) = running {
            let in_slice = now.saturating_sub(self.slice_start) < self.config.time_slice_ms;
            if in_slice && is_runnable(active, current) {
                return Ok(Some(current));
            }
        }

        let next = self.next_turn(active);
        if let Some(pid) = next {
            if running.is_some() && running != next {
                log::debug!("[round-robin] t={}ms: turn passes to pid {}", now, pid);
            }
            self.cursor = Some(pid);
            self.slice_start = now;
        }
        Ok(next)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use schedsim_execution::io::FirstIoSelector;
    use schedsim_execution::{
        Engine, ProcessDefinition, SimConfig, SimFlags, TickObserver, TickRecord,
    };
    use std::cell::RefCell;
    use std::rc::Rc;

    fn pid(n: usize) -> Pid {
        Pid::new(n)
    }

    fn runnable(n: usize) -> ProcessSnapshot {
        ProcessSnapshot::new(pid(n), 0, 300)
    }

    fn scheduler() -> RoundRobinScheduler {
        RoundRobinScheduler::new(RoundRobinConfig::new()).unwrap()
    }

    #[derive(Debug, Clone, Default)]
    struct CpuTrace(Rc<RefCell<Vec<Option<Pid>>>>);

    impl TickObserver for CpuTrace {
        fn on_tick(&mut self, record: &TickRecord<'_>) {
            self.0.borrow_mut().push(record.cpu);
        }
    }

    #[test]
    fn test_zero_slice_rejected() {
        assert!(RoundRobinScheduler::new(RoundRobinConfig::with_time_slice(0)).is_err());
    }

    #[test]
    fn test_keeps_running_within_slice() {
        let mut s = scheduler();
        let active = [runnable(0), runnable(1)];

        assert_eq!(s.decide(&active, 0, None).unwrap(), Some(pid(0)));
        for now in [10, 20, 30, 40] {
            assert_eq!(s.decide(&active, now, Some(pid(0))).unwrap(), Some(pid(0)));
        }
        assert_eq!(s.decide(&active, 50, Some(pid(0))).unwrap(), Some(pid(1)));
    }

    #[test]
    fn test_wraps_around() {
        let mut s = scheduler();
        let active = [runnable(0), runnable(1)];

        s.decide(&active, 0, None).unwrap();
        assert_eq!(s.decide(&active, 50, Some(pid(0))).unwrap(), Some(pid(1)));
        assert_eq!(s.decide(&active, 100, Some(pid(1))).unwrap(), Some(pid(0)));
    }

    #[test]
    fn test_leaving_for_io_passes_turn() {
        let mut s = scheduler();
        s.decide(&[runnable(0), runnable(1)], 0, None).unwrap();

        let active = [runnable(0).on_io(), runnable(1)];
        assert_eq!(s.decide(&active, 10, Some(pid(0))).unwrap(), Some(pid(1)));
    }

    #[test]
    fn test_skips_io_when_rotating() {
        let mut s = scheduler();
        s.decide(&[runnable(0), runnable(1), runnable(2)], 0, None).unwrap();

        let active = [runnable(0), runnable(1).on_io(), runnable(2)];
        assert_eq!(s.decide(&active, 50, Some(pid(0))).unwrap(), Some(pid(2)));
    }

    #[test]
    fn test_single_process_gets_new_slice() {
        let mut s = scheduler();
        let active = [runnable(3)];

        s.decide(&active, 0, None).unwrap();
        assert_eq!(s.decide(&active, 50, Some(pid(3))).unwrap(), Some(pid(3)));
        assert_eq!(s.decide(&active, 60, Some(pid(3))).unwrap(), Some(pid(3)));
    }

    #[test]
    fn test_idle_when_everything_on_io() {
        let mut s = scheduler();
        let active = [runnable(0).on_io()];
        assert_eq!(s.decide(&active, 0, None).unwrap(), None);
    }

    #[test]
    fn test_cycles_equal_jobs_at_slice_boundaries() {
        let trace = CpuTrace::default();
        let definitions = (0..3)
            .map(|_| ProcessDefinition::new(0, vec![150]).unwrap())
            .collect();
        let mut engine = Engine::new(
            definitions,
            Box::new(scheduler()),
            SimConfig::new().with_flags(SimFlags::GRAPH),
        )
        .unwrap()
        .with_io_selector(Box::new(FirstIoSelector))
        .with_observer(Box::new(trace.clone()));

        engine.run().unwrap();

        let cpu = trace.0.borrow();
        assert_eq!(cpu.len(), 45);
        for (tick, pid_on_cpu) in cpu.iter().enumerate() {
            let turn = tick / 5;
            assert_eq!(*pid_on_cpu, Some(pid(turn % 3)), "tick {}", tick);
        }
    }
}
