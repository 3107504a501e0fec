//! Linear feedback shift register.

use crate::source::{GeneratorError, IntSource, UniformSource};

/// Number of bits assembled per float by [`UniformSource::next_float`].
const DEFAULT_FLOAT_BITS: u32 = 32;

/// Linear feedback shift register.
///
/// The register holds `n_bits` bits of state. Each step emits the LSB,
/// shifts the register right by one and inserts the feedback bit at the
/// top position. The feedback is the XOR of the output bit and the bits at
/// the tap positions (1-based, counted from the LSB): the output bit
/// always participates, so taps list the feedback polynomial's remaining
/// exponents. This keeps the state map invertible, which is what
/// guarantees the register can never fall into the absorbing all-zero
/// state. Tap position 1 would cancel the implicit output term and is
/// rejected at construction.
///
/// Construction also rejects any seed that masks down to zero; after that
/// the state is never observed as zero.
#[derive(Debug, Clone)]
pub struct Lfsr {
    n_bits: u32,
    taps: Vec<u32>,
    state: u64,
}

impl Lfsr {
    /// Create a register of width `n_bits` with the given 1-based taps.
    ///
    /// The seed is masked to `n_bits`. Fails with
    /// [`GeneratorError::InvalidSeed`] when the masked seed is zero,
    /// [`GeneratorError::InvalidTaps`] for a tap outside `2..=n_bits`, and
    /// [`GeneratorError::InvalidWidth`] for a width outside `1..=63`.
    pub fn new(seed: u64, taps: &[u32], n_bits: u32) -> Result<Self, GeneratorError> {
        if !(1..=63).contains(&n_bits) {
            return Err(GeneratorError::InvalidWidth(n_bits));
        }
        if let Some(&tap) = taps.iter().find(|&&t| t < 2 || t > n_bits) {
            return Err(GeneratorError::InvalidTaps { tap, n_bits });
        }
        let state = seed & ((1u64 << n_bits) - 1);
        if state == 0 {
            return Err(GeneratorError::InvalidSeed);
        }
        Ok(Self {
            n_bits,
            taps: taps.to_vec(),
            state,
        })
    }

    /// Advance one step and return the output bit (0 or 1).
    pub fn next_bit(&mut self) -> u8 {
        let bit = (self.state & 1) as u8;
        // output bit is part of the feedback; taps hold the other terms
        let feedback = self
            .taps
            .iter()
            .fold(self.state & 1, |acc, &t| acc ^ ((self.state >> (t - 1)) & 1));
        self.state = (self.state >> 1) | (feedback << (self.n_bits - 1));
        bit
    }

    /// Assemble `bits` output bits (MSB first) into a float in `[0, 1)`.
    ///
    /// `bits` must be in `1..=63`; more than 53 bits exceed `f64` mantissa
    /// precision anyway.
    pub fn next_float_with(&mut self, bits: u32) -> f64 {
        debug_assert!((1..=63).contains(&bits));
        let mut val = 0u64;
        for _ in 0..bits {
            val = (val << 1) | self.next_bit() as u64;
        }
        val as f64 / (1u64 << bits) as f64
    }

    /// Current register state.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Register width in bits.
    pub fn width(&self) -> u32 {
        self.n_bits
    }

    /// Tap positions (1-based, from the LSB).
    pub fn taps(&self) -> &[u32] {
        &self.taps
    }
}

impl IntSource for Lfsr {
    /// Advance one bit and return the full register state.
    ///
    /// The state captures the entire cycle, so period detection over this
    /// stream reports the register's true cycle length.
    fn next_int(&mut self) -> u64 {
        self.next_bit();
        self.state
    }
}

impl UniformSource for Lfsr {
    fn next_float(&mut self) -> f64 {
        self.next_float_with(DEFAULT_FLOAT_BITS)
    }
}
