//! # Simulation Results
//!
//! Per-process timings and their aggregates, handed to the reporter once
//! every process has ended.

use crate::process::ProcessExecution;
use crate::scheduler::SchedulerMetrics;
use crate::Pid;

/// Final timings of one process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessResult {
    /// Process ID
    pub pid: Pid,
    /// Arrival time (ms)
    pub arrival_time: u64,
    /// Arrival to first CPU allocation (ms)
    pub response_time: u64,
    /// Arrival to end (ms)
    pub turnaround_time: u64,
}

impl ProcessResult {
    /// Collect the latched timings of an ended process
    ///
    /// Returns `None` while either timing is still unknown.
    pub fn from_execution(process: &ProcessExecution) -> Option<Self> {
        Some(Self {
            pid: process.pid(),
            arrival_time: process.definition().arrival_time(),
            response_time: process.response_time()?,
            turnaround_time: process.turnaround_time()?,
        })
    }
}

/// Mean / min / max over a set of samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Arithmetic mean
    pub mean: f64,
    /// Smallest sample
    pub min: u64,
    /// Largest sample
    pub max: u64,
}

impl Summary {
    /// Summarize samples, `None` when there are none
    pub fn from_samples(samples: impl IntoIterator<Item = u64>) -> Option<Self> {
        let mut count = 0u64;
        let mut sum = 0u64;
        let mut min = u64::MAX;
        let mut max = 0u64;

        for sample in samples {
            count += 1;
            sum += sample;
            min = min.min(sample);
            max = max.max(sample);
        }

        if count == 0 {
            return None;
        }

        Some(Self {
            mean: sum as f64 / count as f64,
            min,
            max,
        })
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// Policy that drove the run
    pub policy: &'static str,
    /// Per-process timings, ascending PID
    pub processes: Vec<ProcessResult>,
    /// Response time aggregate
    pub response: Option<Summary>,
    /// Turnaround time aggregate
    pub turnaround: Option<Summary>,
    /// Simulated time when the last process ended (ms)
    pub end_time: u64,
    /// Engine counters
    pub metrics: SchedulerMetrics,
}

impl SimulationResult {
    /// Build the result from per-process timings
    pub fn new(
        policy: &'static str,
        processes: Vec<ProcessResult>,
        end_time: u64,
        metrics: SchedulerMetrics,
    ) -> Self {
        let response = Summary::from_samples(processes.iter().map(|p| p.response_time));
        let turnaround = Summary::from_samples(processes.iter().map(|p| p.turnaround_time));

        Self {
            policy,
            processes,
            response,
            turnaround,
            end_time,
            metrics,
        }
    }

    /// Timings of one process
    pub fn process(&self, pid: Pid) -> Option<&ProcessResult> {
        self.processes.iter().find(|p| p.pid == pid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let summary = Summary::from_samples([10, 20, 60]).unwrap();
        assert_eq!(summary.min, 10);
        assert_eq!(summary.max, 60);
        assert!((summary.mean - 30.0).abs() < f64::EPSILON);

        assert_eq!(Summary::from_samples(Vec::new()), None);
    }

    #[test]
    fn test_result_aggregates() {
        let processes = vec![
            ProcessResult { pid: Pid::new(0), arrival_time: 0, response_time: 0, turnaround_time: 40 },
            ProcessResult { pid: Pid::new(1), arrival_time: 0, response_time: 40, turnaround_time: 60 },
        ];
        let result = SimulationResult::new("fifo", processes, 60, SchedulerMetrics::new());

        let response = result.response.unwrap();
        assert_eq!((response.min, response.max), (0, 40));
        let turnaround = result.turnaround.unwrap();
        assert!((turnaround.mean - 50.0).abs() < f64::EPSILON);
        assert_eq!(result.process(Pid::new(1)).unwrap().response_time, 40);
        assert!(result.process(Pid::new(2)).is_none());
    }
}
