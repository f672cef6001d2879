//! # Simulation Configuration

use crate::{ExecError, ExecResult};
use bitflags::bitflags;
use core::time::Duration;

bitflags! {
    /// Simulation flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SimFlags: u32 {
        /// Emit a per-tick trace to the attached observer
        const GRAPH = 1 << 0;
        /// Sleep for the pacing delay after every tick
        const REAL_TIME = 1 << 1;
    }
}

/// Configuration for one simulation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Timer interrupt interval (ms of simulated time)
    pub tick_ms: u64,
    /// Wall-clock delay per tick when `REAL_TIME` is set
    pub pacing: Duration,
    /// Seed for the I/O completion driver (`None` = entropy)
    pub seed: Option<u64>,
    /// Feature flags
    pub flags: SimFlags,
}

impl SimConfig {
    /// Default tick: 10ms
    pub const DEFAULT_TICK_MS: u64 = 10;
    /// Default pacing delay: 10ms
    pub const DEFAULT_PACING: Duration = Duration::from_millis(10);

    /// Create default configuration
    pub fn new() -> Self {
        Self {
            tick_ms: Self::DEFAULT_TICK_MS,
            pacing: Self::DEFAULT_PACING,
            seed: None,
            flags: SimFlags::empty(),
        }
    }

    /// Set the tick interval
    pub fn with_tick(mut self, tick_ms: u64) -> Self {
        self.tick_ms = tick_ms;
        self
    }

    /// Set the I/O driver seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the pacing delay
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Add flags
    pub fn with_flags(mut self, flags: SimFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Is the per-tick trace enabled?
    pub fn graph(&self) -> bool {
        self.flags.contains(SimFlags::GRAPH)
    }

    /// Is wall-clock pacing enabled?
    pub fn real_time(&self) -> bool {
        self.flags.contains(SimFlags::REAL_TIME)
    }

    /// Reject unusable settings
    pub fn validate(&self) -> ExecResult<()> {
        if self.tick_ms == 0 {
            return Err(ExecError::InvalidConfig("tick must be at least 1ms".into()));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}
