//! # Process Model
//!
//! Immutable process definitions and the per-run execution state the
//! engine derives from them.

use crate::{ExecError, ExecResult, Pid};

/// Immutable description of one synthetic process
///
/// Bursts alternate CPU, I/O, CPU, ... and always start and end with a CPU
/// burst, so the burst count is odd.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessDefinition {
    /// Arrival time (ms)
    arrival_time: u64,
    /// Burst durations (ms)
    bursts: Vec<u64>,
}

impl ProcessDefinition {
    /// Create a new definition
    pub fn new(arrival_time: u64, bursts: Vec<u64>) -> ExecResult<Self> {
        if bursts.is_empty() {
            return Err(ExecError::InvalidDefinition("no bursts".into()));
        }
        if bursts.len() % 2 == 0 {
            return Err(ExecError::InvalidDefinition(format!(
                "{} bursts given, the last burst must be a CPU burst",
                bursts.len()
            )));
        }
        if let Some(index) = bursts.iter().position(|&b| b == 0) {
            return Err(ExecError::InvalidDefinition(format!(
                "burst {} has zero length",
                index
            )));
        }

        Ok(Self { arrival_time, bursts })
    }

    /// Get the arrival time
    pub fn arrival_time(&self) -> u64 {
        self.arrival_time
    }

    /// Get the burst sequence
    pub fn bursts(&self) -> &[u64] {
        &self.bursts
    }

    /// Total CPU + I/O duration
    pub fn total_duration(&self) -> u64 {
        self.bursts.iter().sum()
    }

    /// Total CPU time
    pub fn cpu_time(&self) -> u64 {
        self.bursts.iter().step_by(2).sum()
    }

    /// Total I/O time
    pub fn io_time(&self) -> u64 {
        self.bursts.iter().skip(1).step_by(2).sum()
    }

    /// Phase the process is in after `executed` ms of progress
    pub fn phase_at(&self, executed: u64) -> Phase {
        let mut end = 0;
        for (index, burst) in self.bursts.iter().enumerate() {
            end += burst;
            if executed < end {
                return if index % 2 == 0 { Phase::Cpu } else { Phase::Io };
            }
        }
        Phase::Done
    }
}

/// Burst kind at a given progress point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Inside a CPU burst
    Cpu,
    /// Inside an I/O burst
    Io,
    /// Past the last burst
    Done,
}

/// Process lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessState {
    /// Arrival time not reached yet
    #[default]
    NotArrived,
    /// Waiting for or holding the CPU
    Runnable,
    /// Inside an I/O burst
    OnIo,
    /// All bursts consumed
    Ended,
}

impl ProcessState {
    /// Check if the process has arrived and not ended
    pub fn is_active(&self) -> bool {
        matches!(self, ProcessState::Runnable | ProcessState::OnIo)
    }

    /// Valid transitions from this state
    pub fn valid_transitions(&self) -> &[ProcessState] {
        match self {
            ProcessState::NotArrived => &[ProcessState::Runnable],
            ProcessState::Runnable => &[ProcessState::OnIo, ProcessState::Ended],
            ProcessState::OnIo => &[ProcessState::Runnable, ProcessState::Ended],
            ProcessState::Ended => &[],
        }
    }

    /// Check if moving to `next` is allowed
    pub fn can_transition_to(&self, next: ProcessState) -> bool {
        self.valid_transitions().contains(&next)
    }

    fn from_phase(phase: Phase) -> Self {
        match phase {
            Phase::Cpu => ProcessState::Runnable,
            Phase::Io => ProcessState::OnIo,
            Phase::Done => ProcessState::Ended,
        }
    }
}

/// Execution state of one process during a run
///
/// Owned and mutated by the engine only. The lifecycle state is always the
/// phase of `executed_time` within the burst sequence once arrived.
#[derive(Debug, Clone)]
pub struct ProcessExecution {
    pid: Pid,
    definition: ProcessDefinition,
    executed_time: u64,
    state: ProcessState,
    response_time: Option<u64>,
    turnaround_time: Option<u64>,
}

impl ProcessExecution {
    /// Create the execution state for a definition
    pub fn new(pid: Pid, definition: ProcessDefinition) -> Self {
        Self {
            pid,
            definition,
            executed_time: 0,
            state: ProcessState::NotArrived,
            response_time: None,
            turnaround_time: None,
        }
    }

    /// Get the PID
    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// Get the definition
    pub fn definition(&self) -> &ProcessDefinition {
        &self.definition
    }

    /// Cumulative progress (ms)
    pub fn executed_time(&self) -> u64 {
        self.executed_time
    }

    /// Current lifecycle state
    pub fn state(&self) -> ProcessState {
        self.state
    }

    /// Time from arrival to first CPU allocation, once known
    pub fn response_time(&self) -> Option<u64> {
        self.response_time
    }

    /// Time from arrival to end, once ended
    pub fn turnaround_time(&self) -> Option<u64> {
        self.turnaround_time
    }

    /// Remaining CPU + I/O time
    pub fn remaining(&self) -> u64 {
        self.definition.total_duration().saturating_sub(self.executed_time)
    }

    /// Promote to `Runnable` once `now` reaches the arrival time
    ///
    /// Returns `true` when the process arrived on this call.
    pub fn arrive(&mut self, now: u64) -> ExecResult<bool> {
        if self.state != ProcessState::NotArrived || now < self.definition.arrival_time {
            return Ok(false);
        }
        self.transition(ProcessState::Runnable)?;
        Ok(true)
    }

    /// Advance the process by one tick of progress
    ///
    /// Latches the response time on the first advance, measured from the
    /// start of the tick. The turnaround time is latched on the `Ended`
    /// transition, measured at the end of the tick. Returns the new state.
    pub fn advance(&mut self, now: u64, tick: u64) -> ExecResult<ProcessState> {
        if !self.state.is_active() {
            return Err(ExecError::InvalidTransition {
                pid: self.pid,
                from: self.state,
                to: self.state,
            });
        }

        let since_arrival = now.saturating_sub(self.definition.arrival_time);
        if self.executed_time == 0 && self.response_time.is_none() {
            self.response_time = Some(since_arrival);
        }

        self.executed_time += tick;
        let next = ProcessState::from_phase(self.definition.phase_at(self.executed_time));
        self.transition(next)?;

        if next == ProcessState::Ended && self.turnaround_time.is_none() {
            self.turnaround_time = Some(since_arrival + tick);
        }

        Ok(next)
    }

    fn transition(&mut self, next: ProcessState) -> ExecResult<()> {
        if next == self.state {
            return Ok(());
        }
        if !self.state.can_transition_to(next) {
            return Err(ExecError::InvalidTransition {
                pid: self.pid,
                from: self.state,
                to: next,
            });
        }
        log::debug!("pid {}: {:?} -> {:?}", self.pid, self.state, next);
        self.state = next;
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
