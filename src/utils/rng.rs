// src/utils/rng.rs
//! Injectable randomness source.
//!
//! Mirrors the [`TimeProvider`](super::time::TimeProvider) pattern: the
//! generator and the patient-state store never touch a global RNG, they draw
//! from whatever [`Randomness`] the scheduler was built with. Tests supply a
//! replayed sequence; production uses a seedable [`rand`] generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform random draws for the simulation.
pub trait Randomness: Send {
    /// Uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform sample in `[-half_span, +half_span]`, centered on zero.
    ///
    /// A unit draw of exactly 0.5 maps to a zero offset.
    fn next_symmetric(&mut self, half_span: f64) -> f64 {
        (self.next_unit() - 0.5) * 2.0 * half_span
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        ((self.next_unit() * len as f64) as usize).min(len - 1)
    }
}

/// Production randomness backed by [`StdRng`].
pub struct StdRandomness {
    rng: StdRng,
}

impl StdRandomness {
    /// Seeded source for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Entropy-seeded source for normal operation.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Randomness for StdRandomness {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Deterministic source replaying a fixed sequence of unit draws, cycling
/// when exhausted. Intended for tests.
pub struct SequenceRandomness {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceRandomness {
    /// Build a cycling sequence. Values outside `[0, 1)` are clamped.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|v| v.clamp(0.0, 0.999_999_999))
            .collect::<Vec<_>>();
        assert!(!values.is_empty(), "sequence must not be empty");
        Self { values, cursor: 0 }
    }

    /// A source whose every symmetric draw is exactly zero offset.
    pub fn zero_offset() -> Self {
        Self::new([0.5])
    }
}

impl Randomness for SequenceRandomness {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
