//! # Random Module
//!
//! Randomness capability injected into the identifier generator.

use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Source of uniformly distributed integers.
pub trait RandomSource: Send + Sync {
    /// Draw a value from the closed range `[low, high]`.
    fn next_in_range(&self, low: u32, high: u32) -> u32;
}

/// Thread-local `rand` generator, one handle per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_in_range(&self, low: u32, high: u32) -> u32 {
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Deterministic source that replays a fixed list of values, cycling at the end.
///
/// Values outside the requested range are clamped into it.
#[derive(Debug)]
pub struct SequenceRandom {
    values: Vec<u32>,
    cursor: AtomicUsize,
}

impl SequenceRandom {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            cursor: AtomicUsize::new(0),
        }
    }

    /// Number of values drawn so far
    pub fn draws(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }
}

impl RandomSource for SequenceRandom {
    fn next_in_range(&self, low: u32, high: u32) -> u32 {
        if self.values.is_empty() {
            return low;
        }
        let index = self.cursor.fetch_add(1, Ordering::AcqRel) % self.values.len();
        self.values[index].clamp(low, high)
    }
}
