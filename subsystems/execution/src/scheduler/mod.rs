//! # Scheduler Framework
//!
//! This module defines the policy FRAMEWORK, not a specific policy.
//! Actual policies are provided by the `modules_impl/schedulers` crates.

pub mod metrics;
pub mod traits;

pub use metrics::SchedulerMetrics;
pub use traits::*;
