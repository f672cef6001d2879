//! # Simulation Engine
//!
//! Owns the timeline and every [`ProcessExecution`], and drives a
//! [`Scheduler`] once per timer tick:
//!
//! 1. Promote arrived processes to `Runnable`
//! 2. Snapshot the active processes (ascending PID)
//! 3. Ask the policy for the next PID and validate it
//! 4. Advance the chosen process if it is `Runnable`
//! 5. Service one process on I/O, chosen by the [`IoSelector`]
//! 6. Advance the clock
//!
//! The loop ends once every process has ended.

use crate::config::SimConfig;
use crate::io::{IoSelector, RandomIoSelector};
use crate::process::{ProcessDefinition, ProcessExecution, ProcessState};
use crate::results::{ProcessResult, SimulationResult};
use crate::scheduler::{is_active, ProcessSnapshot, Scheduler, SchedulerMetrics};
use crate::{ExecError, ExecResult, Pid};
use core::fmt;

/// What happened during one tick
#[derive(Debug, Clone, Copy)]
pub struct TickRecord<'a> {
    /// Simulated time at the start of the tick (ms)
    pub time: u64,
    /// Process that made CPU progress
    pub cpu: Option<Pid>,
    /// Process whose I/O was serviced
    pub io: Option<Pid>,
    /// All processes after the tick, ascending PID
    pub processes: &'a [ProcessExecution],
}

/// Receives a [`TickRecord`] after every tick when `SimFlags::GRAPH` is set
pub trait TickObserver: fmt::Debug {
    /// Called once per tick
    fn on_tick(&mut self, record: &TickRecord<'_>);
}

/// Tick-driven simulation engine
#[derive(Debug)]
pub struct Engine {
    /// Execution state, indexed by PID
    processes: Vec<ProcessExecution>,
    /// Active policy
    scheduler: Box<dyn Scheduler>,
    /// I/O completion driver
    io: Box<dyn IoSelector>,
    /// Per-tick trace sink
    observer: Option<Box<dyn TickObserver>>,
    /// Run configuration
    config: SimConfig,
    /// Simulated clock (ms)
    now: u64,
    /// Process currently assigned the CPU
    running: Option<Pid>,
    /// Number of ended processes
    ended: usize,
    /// Counters
    metrics: SchedulerMetrics,
}

impl Engine {
    /// Create an engine over `definitions`; PIDs follow the list order
    pub fn new(
        definitions: Vec<ProcessDefinition>,
        scheduler: Box<dyn Scheduler>,
        config: SimConfig,
    ) -> ExecResult<Self> {
        config.validate()?;

        let processes = definitions
            .into_iter()
            .enumerate()
            .map(|(index, definition)| ProcessExecution::new(Pid::new(index), definition))
            .collect();

        Ok(Self {
            processes,
            scheduler,
            io: Box::new(RandomIoSelector::from_seed(config.seed)),
            observer: None,
            config,
            now: 0,
            running: None,
            ended: 0,
            metrics: SchedulerMetrics::new(),
        })
    }

    /// Replace the I/O completion driver
    pub fn with_io_selector(mut self, io: Box<dyn IoSelector>) -> Self {
        self.io = io;
        self
    }

    /// Attach a per-tick trace sink
    pub fn with_observer(mut self, observer: Box<dyn TickObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Simulated clock (ms)
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Process currently assigned the CPU
    pub fn running(&self) -> Option<Pid> {
        self.running
    }

    /// Execution state of every process, ascending PID
    pub fn processes(&self) -> &[ProcessExecution] {
        &self.processes
    }

    /// Counters collected so far
    pub fn metrics(&self) -> &SchedulerMetrics {
        &self.metrics
    }

    /// Have all processes ended?
    pub fn is_finished(&self) -> bool {
        self.ended == self.processes.len()
    }

    /// Run until every process has ended
    pub fn run(&mut self) -> ExecResult<SimulationResult> {
        log::info!(
            "Starting simulation: {} processes, policy {}, tick {}ms",
            self.processes.len(),
            self.scheduler.name(),
            self.config.tick_ms
        );

        while !self.is_finished() {
            self.step()?;
        }

        let processes: Vec<ProcessResult> = self
            .processes
            .iter()
            .filter_map(ProcessResult::from_execution)
            .collect();

        log::info!(
            "Simulation finished at t={}ms after {} ticks ({}% CPU)",
            self.now,
            self.metrics.ticks(),
            self.metrics.cpu_utilization()
        );

        Ok(SimulationResult::new(
            self.scheduler.name(),
            processes,
            self.now,
            self.metrics,
        ))
    }

    /// Execute one timer tick
    pub fn step(&mut self) -> ExecResult<()> {
        let now = self.now;

        for process in &mut self.processes {
            if process.arrive(now)? {
                log::debug!("t={}ms: pid {} arrived", now, process.pid());
            }
        }

        let active: Vec<ProcessSnapshot> = self
            .processes
            .iter()
            .filter_map(ProcessSnapshot::capture)
            .collect();

        let cpu = if active.is_empty() {
            None
        } else {
            self.dispatch(&active)?
        };

        if cpu.is_some() {
            self.metrics.record_busy();
        } else {
            self.metrics.record_idle();
        }

        // Includes a process the CPU step just moved into an I/O burst
        let waiting: Vec<Pid> = self
            .processes
            .iter()
            .filter(|p| p.state() == ProcessState::OnIo)
            .map(ProcessExecution::pid)
            .collect();
        let io = self.io.choose(&waiting);
        if let Some(pid) = io {
            self.advance(pid)?;
            self.metrics.record_io();
        }

        log::trace!("t={}ms: cpu={:?} io={:?}", now, cpu, io);

        if self.config.graph() {
            if let Some(observer) = self.observer.as_mut() {
                observer.on_tick(&TickRecord {
                    time: now,
                    cpu,
                    io,
                    processes: &self.processes,
                });
            }
        }

        if self.config.real_time() {
            std::thread::sleep(self.config.pacing);
        }

        self.now += self.config.tick_ms;
        self.metrics.record_tick();
        Ok(())
    }

    /// Query the policy, validate its answer and run the chosen process
    ///
    /// Returns the PID that made CPU progress.
    fn dispatch(&mut self, active: &[ProcessSnapshot]) -> ExecResult<Option<Pid>> {
        let now = self.now;
        let previous = self.running;
        let next = self.scheduler.decide(active, now, previous)?;

        match next {
            Some(pid) if Some(pid) != previous && !is_active(active, pid) => {
                log::error!("{} returned invalid pid {} at t={}ms", self.scheduler.name(), pid, now);
                return Err(ExecError::InvalidNextPid { pid, tick: now });
            }
            None if active.iter().any(|p| !p.on_io) => {
                return Err(ExecError::IdleWithRunnable { tick: now });
            }
            _ => {}
        }

        if let (Some(pid), Some(prev)) = (next, previous) {
            if pid != prev && active.iter().any(|p| p.pid == prev && !p.on_io) {
                log::debug!("t={}ms: pid {} preempted by pid {}", now, prev, pid);
                self.metrics.record_preemption();
            }
        }
        if next.is_some() && next != previous {
            self.metrics.record_context_switch();
        }
        self.running = next;

        match next {
            Some(pid) if self.processes[pid.index()].state() == ProcessState::Runnable => {
                self.advance(pid)?;
                Ok(Some(pid))
            }
            _ => Ok(None),
        }
    }

    /// Advance one process by a tick and account for its end
    fn advance(&mut self, pid: Pid) -> ExecResult<()> {
        let state = self.processes[pid.index()].advance(self.now, self.config.tick_ms)?;

        if state == ProcessState::Ended {
            self.ended += 1;
            if self.running == Some(pid) {
                self.running = None;
            }
            log::debug!("t={}ms: pid {} ended ({}/{})", self.now, pid, self.ended, self.processes.len());
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
