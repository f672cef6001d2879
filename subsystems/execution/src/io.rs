//! # I/O Completion Driver
//!
//! Chooses which process on I/O gets serviced during a tick. This is the
//! only source of nondeterminism in a run, so it sits behind a trait and the
//! default implementation is seedable.

use crate::Pid;
use core::fmt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks one process out of the processes currently on I/O
pub trait IoSelector: fmt::Debug {
    /// Choose one of `candidates`; `None` only if `candidates` is empty
    fn choose(&mut self, candidates: &[Pid]) -> Option<Pid>;
}

/// Uniform random choice
#[derive(Debug)]
pub struct RandomIoSelector {
    rng: StdRng,
}

impl RandomIoSelector {
    /// Reproducible selector
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Selector seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when a seed is given, entropy otherwise
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl IoSelector for RandomIoSelector {
    fn choose(&mut self, candidates: &[Pid]) -> Option<Pid> {
        if candidates.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..candidates.len());
        Some(candidates[index])
    }
}

/// Always services the lowest PID
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstIoSelector;

impl IoSelector for FirstIoSelector {
    fn choose(&mut self, candidates: &[Pid]) -> Option<Pid> {
        candidates.iter().copied().min()
    }
}
