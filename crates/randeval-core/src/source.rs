//! Generator traits and construction errors.
//!
//! Every engine implements [`IntSource`], the single-method advance
//! capability the period finder drives, and [`UniformSource`], which maps
//! the integer stream into floats in `[0, 1)`.

use thiserror::Error;

/// Error raised when a generator is constructed outside its domain.
///
/// Construction-time invariant violations fail fast; no partially
/// initialized engine is ever returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// LFSR seed reduces to the all-zero register state, which can never
    /// leave zero again.
    #[error("seed reduces to an all-zero register state")]
    InvalidSeed,
    /// LFSR tap position outside the register. Position 1 is the output
    /// bit, which always feeds back and cannot be listed as a tap.
    #[error("tap position {tap} outside register range 2..={n_bits}")]
    InvalidTaps { tap: u32, n_bits: u32 },
    /// LFSR register width outside the supported `1..=63` range.
    #[error("register width {0} outside supported range 1..=63")]
    InvalidWidth(u32),
}

/// A stateful generator that can be advanced one integer at a time.
pub trait IntSource {
    /// Advance internal state and return the next integer.
    fn next_int(&mut self) -> u64;
}

/// A generator producing uniform floats in `[0, 1)`.
pub trait UniformSource: IntSource {
    /// Advance internal state and return the next float in `[0, 1)`.
    fn next_float(&mut self) -> f64;

    /// Materialize `n` floats by repeated [`next_float`](Self::next_float)
    /// calls. The sequence is owned by the caller; the battery only reads it.
    fn generate(&mut self, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.next_float()).collect()
    }
}
