//! Generational genetic algorithm.
//!
//! Approximates optima of two problem classes:
//!
//! - **Bit strings**: maximize a scalar function of the decoded integer
//!   ([`problems::MaxSquareProblem`], f(x) = x²), with single-point
//!   crossover and bit-flip mutation.
//! - **Permutations**: minimize the length of a closed tour over a cost
//!   matrix ([`problems::TspProblem`]), with order crossover and swap
//!   mutation.
//!
//! Both run on the same engine ([`ga::GaRunner`]): roulette-wheel
//! selection, optional elitism, best-ever tracking, and a fixed generation
//! budget.
//!
//! # Architecture
//!
//! The engine performs no I/O. Randomness comes from one explicitly seeded
//! generator per run ([`random`]), so a fixed seed reproduces a run bit for
//! bit. Progress is exposed through [`ga::GenerationReport`] and
//! `tracing` events.

pub mod error;
pub mod ga;
pub mod problems;
pub mod random;

pub use error::{ConfigError, GaError, InvariantViolation};
