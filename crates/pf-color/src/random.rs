// SPDX-License-Identifier: MIT
//
// Injectable random sources.
//
// Generators never reach for a global RNG. They take `&mut dyn RandomSource`
// so that the same code path serves three callers:
//
//   ThreadRandom    the default, non-deterministic (rand's thread RNG)
//   Xorshift32      seeded and reproducible (CLI `--seed`)
//   FixedSequence   replays a fixed list of values (tests)

use rand::Rng;

/// A source of uniformly distributed floats in [0, 1).
pub trait RandomSource {
    /// Next value in [0, 1).
    fn next_f64(&mut self) -> f64;

    /// Uniform value in [lo, hi].
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        (hi - lo).mul_add(self.next_f64(), lo)
    }

    /// Uniform index in [0, len). `len` must be non-zero.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn index(&mut self, len: usize) -> usize {
        let idx = (self.next_f64() * len as f64).floor() as usize;
        idx.min(len - 1)
    }
}

// ─── ThreadRandom ────────────────────────────────────────────────────────────

/// Non-deterministic source backed by `rand`'s thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_f64(&mut self) -> f64 {
        rand::rng().random::<f64>()
    }
}

// ─── Xorshift32 ──────────────────────────────────────────────────────────────

/// Minimal deterministic PRNG. The same seed always yields the same palette.
#[derive(Debug, Clone)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    /// A zero seed would lock the generator at zero, so it is bumped to 1.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    const fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }
}

impl RandomSource for Xorshift32 {
    fn next_f64(&mut self) -> f64 {
        // Divide by 2^32 so the result never reaches 1.0.
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

// ─── FixedSequence ───────────────────────────────────────────────────────────

/// Replays a fixed list of values, cycling when exhausted.
///
/// Values are clamped into [0, 1) on construction. An empty list behaves
/// like a list containing a single `0.0`.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    values: Vec<f64>,
    pos: usize,
}

impl FixedSequence {
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        let mut values: Vec<f64> = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        if values.is_empty() {
            values.push(0.0);
        }
        Self { values, pos: 0 }
    }

    /// A source that always returns `value`.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for FixedSequence {
    fn next_f64(&mut self) -> f64 {
        let v = self.values[self.pos];
        self.pos = (self.pos + 1) % self.values.len();
        v
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
