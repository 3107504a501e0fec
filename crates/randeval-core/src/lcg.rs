//! Linear congruential generator.

use crate::source::{IntSource, UniformSource};

/// Linear congruential generator: `x' = (a·x + c) mod m`.
///
/// `a`, `c` and `m` are fixed at construction; only the current value `x`
/// mutates, and `0 <= x < m` holds at all times. The seed is reduced
/// modulo `m`, so any `u64` seed is valid.
#[derive(Debug, Clone)]
pub struct Lcg {
    a: u64,
    c: u64,
    m: u64,
    x: u64,
}

impl Lcg {
    /// Create a generator with multiplier `a`, increment `c` and modulus `m`.
    ///
    /// # Panics
    ///
    /// Panics if `m == 0`.
    pub fn new(seed: u64, a: u64, c: u64, m: u64) -> Self {
        assert!(m > 0, "modulus must be nonzero");
        Self { a, c, m, x: seed % m }
    }

    /// Re-seed the engine in place, keeping `a`, `c`, `m`.
    pub fn reset(&mut self, seed: u64) {
        self.x = seed % self.m;
    }

    /// Current value `x`.
    pub fn state(&self) -> u64 {
        self.x
    }

    /// Modulus `m`.
    pub fn modulus(&self) -> u64 {
        self.m
    }

    /// Multiplier `a`.
    pub fn multiplier(&self) -> u64 {
        self.a
    }

    /// Increment `c`.
    pub fn increment(&self) -> u64 {
        self.c
    }
}

impl IntSource for Lcg {
    fn next_int(&mut self) -> u64 {
        // 128-bit intermediate: a*x + c cannot overflow for any u64 params.
        let next = (self.a as u128 * self.x as u128 + self.c as u128) % self.m as u128;
        self.x = next as u64;
        self.x
    }
}

impl UniformSource for Lcg {
    fn next_float(&mut self) -> f64 {
        self.next_int() as f64 / self.m as f64
    }
}
