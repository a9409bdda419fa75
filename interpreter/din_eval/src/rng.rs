//! The interpreter's random number generator.
//!
//! One `StdRng` per interpreter instance rather than a process-wide
//! global; `seed_random` reseeds this instance only, so independent
//! interpreters never perturb each other.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seedable RNG owned by an [`Interpreter`](crate::Interpreter).
pub struct EvalRng {
    inner: StdRng,
}

impl EvalRng {
    /// Create an RNG seeded from OS entropy.
    pub fn from_entropy() -> Self {
        EvalRng {
            inner: StdRng::from_entropy(),
        }
    }

    /// Reseed deterministically (the `seed_random` built-in).
    pub fn reseed(&mut self, seed: i64) {
        self.inner = StdRng::seed_from_u64(seed as u64);
    }

    /// Uniform float in `[0, 1)`.
    pub fn float_unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Uniform integer in `[min, max)`. Caller guarantees `min < max`.
    pub fn int_range(&mut self, min: i64, max: i64) -> i64 {
        self.inner.gen_range(min..max)
    }

    /// Uniform float in `[min, max)`. Caller guarantees `min < max`.
    pub fn float_range(&mut self, min: f64, max: f64) -> f64 {
        self.inner.gen_range(min..max)
    }

    /// Uniform index in `[0, len)`. Caller guarantees `len > 0`.
    pub fn index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}

impl Default for EvalRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
