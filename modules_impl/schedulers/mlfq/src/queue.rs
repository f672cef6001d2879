//! # Multi-Level Feedback Queue
//!
//! Priority levels, highest first, each a FIFO of [`Job`] records. A PID is
//! held by at most one level at a time.

use schedsim_execution::{ExecError, ExecResult, Pid, ProcessSnapshot};
use std::collections::VecDeque;

/// Job entry in a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Job {
    /// Process ID
    pub pid: Pid,
    /// Time slice used at the current level (ms)
    pub elapsed: u64,
}

impl Job {
    fn new(pid: Pid) -> Self {
        Self { pid, elapsed: 0 }
    }
}

/// Where a job went after being charged a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charge {
    /// Moved to the tail of its level
    Requeued {
        /// Level it stays in
        level: usize,
    },
    /// Slice used up, moved to the head of the next level
    Demoted {
        /// Level it left
        from: usize,
        /// Level it entered
        to: usize,
    },
}

/// Multi-level feedback queue
#[derive(Debug, Clone)]
pub struct MultilevelQueue {
    /// Queues by priority level
    levels: Vec<VecDeque<Job>>,
    /// Time slice per level (ms)
    quanta: Vec<u64>,
}

impl MultilevelQueue {
    /// Create a queue with one level per quantum
    pub fn new(quanta: Vec<u64>) -> Self {
        Self {
            levels: quanta.iter().map(|_| VecDeque::new()).collect(),
            quanta,
        }
    }

    /// Number of levels
    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    /// Jobs of one level, head first
    pub fn level(&self, index: usize) -> Option<&VecDeque<Job>> {
        self.levels.get(index)
    }

    /// Total number of jobs
    pub fn len(&self) -> usize {
        self.levels.iter().map(|l| l.len()).sum()
    }

    /// Check if no job is queued
    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(|l| l.is_empty())
    }

    /// Check if a PID is queued anywhere
    pub fn contains(&self, pid: Pid) -> bool {
        self.level_of(pid).is_some()
    }

    /// Level holding a PID
    pub fn level_of(&self, pid: Pid) -> Option<usize> {
        self.levels
            .iter()
            .position(|level| level.iter().any(|job| job.pid == pid))
    }

    /// Level and position of a PID
    pub fn locate(&self, pid: Pid) -> ExecResult<(usize, usize)> {
        for (level, jobs) in self.levels.iter().enumerate() {
            if let Some(index) = jobs.iter().position(|job| job.pid == pid) {
                return Ok((level, index));
            }
        }
        Err(ExecError::UnknownPid(pid))
    }

    /// Job record of a PID
    pub fn job(&self, pid: Pid) -> ExecResult<&Job> {
        let (level, index) = self.locate(pid)?;
        self.levels[level].get(index).ok_or(ExecError::UnknownPid(pid))
    }

    /// Enqueue a PID at the top level unless already queued
    pub fn admit(&mut self, pid: Pid) -> bool {
        if self.contains(pid) {
            return false;
        }
        self.levels[0].push_back(Job::new(pid));
        true
    }

    /// Remove a PID from whichever level holds it
    pub fn evict(&mut self, pid: Pid) -> bool {
        for level in &mut self.levels {
            if let Some(pos) = level.iter().position(|job| job.pid == pid) {
                level.remove(pos);
                return true;
            }
        }
        false
    }

    /// Mirror the active set: evict departed PIDs, then admit new ones
    pub fn sync(&mut self, active: &[ProcessSnapshot]) {
        for level in &mut self.levels {
            level.retain(|job| {
                let keep = active.iter().any(|p| p.pid == job.pid);
                if !keep {
                    log::debug!("[mlfq] evicting pid {}", job.pid);
                }
                keep
            });
        }

        for snapshot in active {
            if self.admit(snapshot.pid) {
                log::debug!("[mlfq] admitted pid {} at level 0", snapshot.pid);
            }
        }
    }

    /// First job, scanning levels from the top, that is not on I/O
    ///
    /// Jobs on I/O are skipped in place.
    pub fn select(&self, on_io: impl Fn(Pid) -> bool) -> Option<Pid> {
        self.levels
            .iter()
            .flat_map(|level| level.iter())
            .find(|job| !on_io(job.pid))
            .map(|job| job.pid)
    }

    /// Charge a tick of CPU time to a job
    ///
    /// A job whose slice reaches its level's quantum is demoted to the head
    /// of the next level with a fresh slice; otherwise it goes to the tail of
    /// its own level. On the lowest level the slice restarts instead.
    pub fn charge(&mut self, pid: Pid, tick: u64) -> ExecResult<Charge> {
        let (level, index) = self.locate(pid)?;
        let mut job = self.levels[level]
            .remove(index)
            .ok_or(ExecError::UnknownPid(pid))?;

        job.elapsed += tick;
        let expired = job.elapsed >= self.quanta[level];

        if expired && level + 1 < self.levels.len() {
            job.elapsed = 0;
            self.levels[level + 1].push_front(job);
            return Ok(Charge::Demoted { from: level, to: level + 1 });
        }

        if expired {
            job.elapsed = 0;
        }
        self.levels[level].push_back(job);
        Ok(Charge::Requeued { level })
    }

    /// Move every job to the top level and reset all slices
    ///
    /// Relative order is kept level by level. Returns the number of jobs
    /// that moved up.
    pub fn boost(&mut self) -> usize {
        let mut boosted = 0;
        for level in 1..self.levels.len() {
            let jobs = std::mem::take(&mut self.levels[level]);
            boosted += jobs.len();
            self.levels[0].extend(jobs);
        }
        for job in &mut self.levels[0] {
            job.elapsed = 0;
        }
        boosted
    }
}

// =============================================================================
// TESTS
// =============================================================================
