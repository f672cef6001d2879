//! # schedsim Policy Registry
//!
//! Maps policy names to factories that build a fresh [`Scheduler`] for
//! every simulation run.
//!
//! ## Builtin Policies
//!
//! | Name   | Policy |
//! |--------|--------|
//! | `fifo` | First come, first served |
//! | `sjf`  | Shortest job first (non-preemptive) |
//! | `stcf` | Shortest time-to-completion first (preemptive) |
//! | `rr`   | Round robin, 50ms slice |
//! | `mlfq` | Multi-level feedback queue |

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod registry;

use core::fmt;
use schedsim_execution::ExecError;

pub use registry::{PolicyFactory, PolicyRegistry, RegisteredPolicy};

#[doc(no_inline)]
pub use schedsim_execution::Scheduler;

/// Registry result type
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No policy registered under this name
    UnknownPolicy(String),
    /// A policy is already registered under this name
    AlreadyExists(String),
    /// The factory rejected its configuration
    Policy(ExecError),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::UnknownPolicy(name) => write!(f, "unknown policy '{}'", name),
            RegistryError::AlreadyExists(name) => write!(f, "policy '{}' is already registered", name),
            RegistryError::Policy(err) => write!(f, "policy construction failed: {}", err),
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryError::Policy(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ExecError> for RegistryError {
    fn from(err: ExecError) -> Self {
        RegistryError::Policy(err)
    }
}
