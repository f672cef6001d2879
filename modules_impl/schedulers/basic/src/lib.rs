//! # Basic Scheduler Module
//!
//! Single-rule policies for schedsim:
//! - [`FifoScheduler`]: first come, first served
//! - [`SjfScheduler`]: shortest job first, non-preemptive
//! - [`StcfScheduler`]: shortest time-to-completion first, preemptive
//!
//! None of them keeps state between decisions beyond what the engine
//! passes in.

#![deny(unsafe_code)]

mod fifo;
mod sjf;
mod stcf;

pub use fifo::FifoScheduler;
pub use sjf::SjfScheduler;
pub use stcf::StcfScheduler;
