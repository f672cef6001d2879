//! # MLFQ Scheduler Implementation

use crate::queue::{Charge, MultilevelQueue};
use crate::MlfqConfig;
use schedsim_execution::{ExecResult, Pid, ProcessSnapshot, Scheduler};

/// Multi-level feedback queue scheduler
///
/// Every decision first mirrors the active set into the queue, applies a
/// priority boost when the boost interval has elapsed, then runs the first
/// job not on I/O and charges it one tick.
#[derive(Debug, Clone)]
pub struct MlfqScheduler {
    /// Configuration
    config: MlfqConfig,
    /// Priority levels
    queue: MultilevelQueue,
    /// Time of the last boost (ms)
    last_boost: u64,
}

impl MlfqScheduler {
    /// Create a new scheduler
    pub fn new(config: MlfqConfig) -> ExecResult<Self> {
        config.validate()?;
        log::info!(
            "[mlfq] {} levels, quanta {:?}ms, boost every {}ms",
            config.levels(),
            config.quanta_ms,
            config.boost_interval_ms
        );

        Ok(Self {
            queue: MultilevelQueue::new(config.quanta_ms.clone()),
            config,
            last_boost: 0,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &MlfqConfig {
        &self.config
    }

    /// Inspect the priority levels
    pub fn queue(&self) -> &MultilevelQueue {
        &self.queue
    }

    fn boost_due(&self, now: u64) -> bool {
        now.saturating_sub(self.last_boost) >= self.config.boost_interval_ms
    }
}

impl Scheduler for MlfqScheduler {
    fn name(&self) -> &'static str {
        "mlfq"
    }

    fn decide(
        &mut self,
        active: &[ProcessSnapshot],
        now: u64,
        _running: Option<Pid>,
    ) -> ExecResult<Option<Pid>> {
        self.queue.sync(active);

        if self.boost_due(now) {
            let boosted = self.queue.boost();
            self.last_boost = now;
            log::debug!("[mlfq] t={}ms: boosted {} jobs to level 0", now, boosted);
        }

        let on_io = |pid: Pid| active.iter().any(|p| p.pid == pid && p.on_io);
        let Some(pid) = self.queue.select(on_io) else {
            return Ok(None);
        };

        if let Charge::Demoted { from, to } = self.queue.charge(pid, self.config.tick_ms)? {
            log::debug!("[mlfq] t={}ms: pid {} demoted {} -> {}", now, pid, from, to);
        }

        Ok(Some(pid))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use schedsim_execution::io::FirstIoSelector;
    use schedsim_execution::{Engine, ProcessDefinition, SimConfig};

    fn pid(n: usize) -> Pid {
        Pid::new(n)
    }

    fn runnable(n: usize) -> ProcessSnapshot {
        ProcessSnapshot::new(pid(n), 0, 500)
    }

    fn scheduler() -> MlfqScheduler {
        MlfqScheduler::new(MlfqConfig::new()).unwrap()
    }

    fn assert_unique(scheduler: &MlfqScheduler, active: &[ProcessSnapshot]) {
        for p in active {
            let holders = (0..scheduler.queue().num_levels())
                .filter(|&l| scheduler.queue().level(l).unwrap().iter().any(|j| j.pid == p.pid))
                .count();
            assert_eq!(holders, 1, "pid {} held by {} levels", p.pid, holders);
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = MlfqConfig::new();
        config.quanta_ms = vec![100, 20];
        assert!(MlfqScheduler::new(config).is_err());
    }

    #[test]
    fn test_admission_and_uniqueness() {
        let mut s = scheduler();
        let active = [runnable(0), runnable(1), runnable(2)];

        for tick in 0..50 {
            s.decide(&active, tick * 10, None).unwrap();
            assert_unique(&s, &active);
            assert_eq!(s.queue().len(), 3);
        }
    }

    #[test]
    fn test_eviction_of_departed_pid() {
        let mut s = scheduler();
        s.decide(&[runnable(0), runnable(1)], 0, None).unwrap();
        s.decide(&[runnable(1)], 10, Some(pid(0))).unwrap();

        assert!(!s.queue().contains(pid(0)));
        assert!(s.queue().contains(pid(1)));
    }

    #[test]
    fn test_round_robin_within_level() {
        let mut s = scheduler();
        let active = [runnable(0), runnable(1)];

        assert_eq!(s.decide(&active, 0, None).unwrap(), Some(pid(0)));
        assert_eq!(s.decide(&active, 10, Some(pid(0))).unwrap(), Some(pid(1)));
        assert_eq!(s.decide(&active, 20, Some(pid(1))).unwrap(), Some(pid(0)));
    }

    #[test]
    fn test_demotion_after_quantum() {
        let mut s = scheduler();
        let active = [runnable(0)];

        s.decide(&active, 0, None).unwrap();
        assert_eq!(s.queue().level_of(pid(0)), Some(0));
        assert_eq!(s.queue().job(pid(0)).unwrap().elapsed, 10);

        s.decide(&active, 10, Some(pid(0))).unwrap();
        assert_eq!(s.queue().level_of(pid(0)), Some(1));
        assert_eq!(s.queue().job(pid(0)).unwrap().elapsed, 0);

        // 60ms at level 1
        for tick in 2..8 {
            s.decide(&active, tick * 10, Some(pid(0))).unwrap();
        }
        assert_eq!(s.queue().level_of(pid(0)), Some(2));
    }

    #[test]
    fn test_io_job_keeps_position() {
        let mut s = scheduler();
        let active = [runnable(0), runnable(1).on_io(), runnable(2)];

        assert_eq!(s.decide(&active, 0, None).unwrap(), Some(pid(0)));
        assert_eq!(s.decide(&active, 10, Some(pid(0))).unwrap(), Some(pid(2)));

        let order: Vec<usize> = s.queue().level(0).unwrap().iter().map(|j| j.pid.index()).collect();
        assert_eq!(order, vec![1, 0, 2]);

        // back from I/O: pid 1 is at the head again
        let active = [runnable(0), runnable(1), runnable(2)];
        assert_eq!(s.decide(&active, 20, Some(pid(2))).unwrap(), Some(pid(1)));
    }

    #[test]
    fn test_idle_when_everything_on_io() {
        let mut s = scheduler();
        let active = [runnable(0).on_io(), runnable(1).on_io()];
        assert_eq!(s.decide(&active, 0, None).unwrap(), None);
        assert_eq!(s.queue().len(), 2);
    }

    #[test]
    fn test_boost_after_interval() {
        let mut s = scheduler();
        let active = [runnable(0), runnable(1)];

        for tick in 0..19 {
            s.decide(&active, tick * 10, None).unwrap();
        }
        assert_eq!(s.queue().level(0).unwrap().len(), 0);

        s.decide(&active, 190, None).unwrap();
        s.decide(&active, 200, None).unwrap();
        assert_eq!(s.queue().level(0).unwrap().len(), 2);
        assert!(s.queue().level(1).unwrap().is_empty());
        assert!(s.queue().level(2).unwrap().is_empty());
    }

    #[test]
    fn test_full_run_terminates() {
        let definitions = vec![
            ProcessDefinition::new(0, vec![300]).unwrap(),
            ProcessDefinition::new(0, vec![20, 40, 20, 40, 20]).unwrap(),
            ProcessDefinition::new(50, vec![60, 10, 60]).unwrap(),
        ];
        let config = SimConfig::new().with_seed(1);
        let mut engine = Engine::new(
            definitions,
            Box::new(MlfqScheduler::new(MlfqConfig::for_simulation(&config)).unwrap()),
            config,
        )
        .unwrap()
        .with_io_selector(Box::new(FirstIoSelector));

        let result = engine.run().unwrap();
        assert_eq!(result.processes.len(), 3);
        assert_eq!(result.policy, "mlfq");
        assert!(engine.is_finished());
    }
}
