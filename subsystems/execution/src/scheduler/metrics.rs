//! # Scheduler Metrics
//!
//! Counters collected by the engine while a policy drives the CPU.

/// Scheduler metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerMetrics {
    /// Total timer ticks
    ticks: u64,
    /// Ticks where a process made CPU progress
    busy_ticks: u64,
    /// Ticks where the CPU made no progress
    idle_ticks: u64,
    /// Ticks where an I/O burst was serviced
    io_ticks: u64,
    /// CPU handed to a different process
    context_switches: u64,
    /// CPU taken from a process that could have continued
    preemptions: u64,
}

impl SchedulerMetrics {
    /// Create new metrics
    pub const fn new() -> Self {
        Self {
            ticks: 0,
            busy_ticks: 0,
            idle_ticks: 0,
            io_ticks: 0,
            context_switches: 0,
            preemptions: 0,
        }
    }

    /// Record a timer tick
    pub fn record_tick(&mut self) {
        self.ticks += 1;
    }

    /// Record a tick with CPU progress
    pub fn record_busy(&mut self) {
        self.busy_ticks += 1;
    }

    /// Record a tick without CPU progress
    pub fn record_idle(&mut self) {
        self.idle_ticks += 1;
    }

    /// Record a serviced I/O tick
    pub fn record_io(&mut self) {
        self.io_ticks += 1;
    }

    /// Record a context switch
    pub fn record_context_switch(&mut self) {
        self.context_switches += 1;
    }

    /// Record a preemption
    pub fn record_preemption(&mut self) {
        self.preemptions += 1;
    }

    /// Get total ticks
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Get busy ticks
    pub fn busy_ticks(&self) -> u64 {
        self.busy_ticks
    }

    /// Get idle ticks
    pub fn idle_ticks(&self) -> u64 {
        self.idle_ticks
    }

    /// Get serviced I/O ticks
    pub fn io_ticks(&self) -> u64 {
        self.io_ticks
    }

    /// Get total context switches
    pub fn context_switches(&self) -> u64 {
        self.context_switches
    }

    /// Get preemptions
    pub fn preemptions(&self) -> u64 {
        self.preemptions
    }

    /// Get CPU utilization (percentage)
    pub fn cpu_utilization(&self) -> u8 {
        let total = self.busy_ticks + self.idle_ticks;

        if total == 0 {
            0
        } else {
            ((self.busy_ticks * 100) / total) as u8
        }
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
