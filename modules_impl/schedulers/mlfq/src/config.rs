//! # MLFQ Scheduler Configuration

use schedsim_execution::{ExecError, ExecResult, SimConfig};
use static_assertions::const_assert;

/// Configuration for the multi-level feedback queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MlfqConfig {
    /// Time slice per level, highest priority first (ms)
    pub quanta_ms: Vec<u64>,
    /// Interval between priority boosts (ms)
    pub boost_interval_ms: u64,
    /// Tick charged to the selected job on every decision (ms)
    pub tick_ms: u64,
}

impl MlfqConfig {
    /// Default quanta: 20ms, 60ms, 100ms
    pub const DEFAULT_QUANTA_MS: [u64; 3] = [20, 60, 100];
    /// Default boost interval: 200ms
    pub const DEFAULT_BOOST_INTERVAL_MS: u64 = 200;

    /// Create default configuration
    pub fn new() -> Self {
        Self {
            quanta_ms: Self::DEFAULT_QUANTA_MS.to_vec(),
            boost_interval_ms: Self::DEFAULT_BOOST_INTERVAL_MS,
            tick_ms: SimConfig::DEFAULT_TICK_MS,
        }
    }

    /// Default levels, ticking at the simulation's rate
    pub fn for_simulation(sim: &SimConfig) -> Self {
        Self {
            tick_ms: sim.tick_ms,
            ..Self::new()
        }
    }

    /// Number of priority levels
    pub fn levels(&self) -> usize {
        self.quanta_ms.len()
    }

    /// Reject unusable settings
    pub fn validate(&self) -> ExecResult<()> {
        if self.quanta_ms.is_empty() {
            return Err(ExecError::InvalidConfig("MLFQ needs at least one level".into()));
        }
        if self.quanta_ms[0] == 0 {
            return Err(ExecError::InvalidConfig("MLFQ quantum must be non-zero".into()));
        }
        if self.quanta_ms.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ExecError::InvalidConfig(format!(
                "MLFQ quanta must strictly increase by level: {:?}",
                self.quanta_ms
            )));
        }
        if self.boost_interval_ms == 0 || self.tick_ms == 0 {
            return Err(ExecError::InvalidConfig(
                "MLFQ boost interval and tick must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MlfqConfig {
    fn default() -> Self {
        Self::new()
    }
}

const_assert!(MlfqConfig::DEFAULT_QUANTA_MS[0] < MlfqConfig::DEFAULT_QUANTA_MS[1]);
const_assert!(MlfqConfig::DEFAULT_QUANTA_MS[1] < MlfqConfig::DEFAULT_QUANTA_MS[2]);
