//! # Round-Robin Scheduler Configuration

use schedsim_execution::{ExecError, ExecResult};

/// Configuration for the round-robin scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRobinConfig {
    /// Time slice per turn (ms)
    pub time_slice_ms: u64,
}

impl RoundRobinConfig {
    /// Default time slice: 50ms
    pub const DEFAULT_TIME_SLICE_MS: u64 = 50;

    /// Create default configuration
    pub fn new() -> Self {
        Self {
            time_slice_ms: Self::DEFAULT_TIME_SLICE_MS,
        }
    }

    /// Create with a custom time slice
    pub fn with_time_slice(time_slice_ms: u64) -> Self {
        Self { time_slice_ms }
    }

    /// Reject unusable settings
    pub fn validate(&self) -> ExecResult<()> {
        if self.time_slice_ms == 0 {
            return Err(ExecError::InvalidConfig("time slice must be non-zero".into()));
        }
        Ok(())
    }
}

impl Default for RoundRobinConfig {
    fn default() -> Self {
        Self::new()
    }
}
