//! # randeval-core
//!
//! Deterministic pseudorandom generators and cycle detection.
//!
//! This crate supplies the sequence side of the randeval workspace: two
//! classical uniform engines and a period finder that works against any
//! integer-emitting generator.
//!
//! ## Quick Start
//!
//! ```
//! use randeval_core::{Lcg, UniformSource, find_period};
//!
//! // glibc-style parameters, fixed seed -> fully deterministic sequence
//! let mut rng = Lcg::new(123456, 1103515245, 12345, 1 << 31);
//! let samples = rng.generate(10_000);
//! assert!(samples.iter().all(|&v| (0.0..1.0).contains(&v)));
//!
//! // small-modulus generators cycle quickly
//! let mut small = Lcg::new(1, 5, 3, 16);
//! let result = find_period(&mut small, 1_000);
//! assert_eq!(result.period, Some(16));
//! ```
//!
//! ## Architecture
//!
//! Engines → sample sequence → test battery (`randeval-tests`)
//!
//! Every engine implements the [`IntSource`] trait (raw integer advance,
//! consumed by [`find_period`]) and the [`UniformSource`] trait (floats in
//! `[0, 1)`, plus `generate(n)` for eager materialization). Tests never
//! share a live engine: materialize one sequence and pass slices around.

pub mod lcg;
pub mod lfsr;
pub mod period;
pub mod source;

pub use lcg::Lcg;
pub use lfsr::Lfsr;
pub use period::{PeriodResult, find_period};
pub use source::{GeneratorError, IntSource, UniformSource};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
