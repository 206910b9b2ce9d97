//! Genetic Algorithm framework.
//!
//! A generational GA built on trait-based abstractions. Users define their
//! problem by implementing [`GaProblem`], which specifies how to create,
//! evaluate, crossover, and mutate genotypes. Fitness is maximized.
//!
//! # Core Traits
//!
//! - [`Genotype`]: An encoded candidate solution
//! - [`GaProblem`]: Problem definition — initialization, evaluation, operators
//!
//! # Key Types
//!
//! - [`Individual`]: A genotype with its cached fitness
//! - [`BitString`], [`Permutation`]: Built-in encodings
//! - [`GaConfig`]: Algorithm parameters (population size, rates, elitism)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best-ever individual, final population, statistics
//!
//! # Submodules
//!
//! - [`operators`]: Single-point and order crossover, bit-flip and swap mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod encoding;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use encoding::{check_bijection, BitString, Permutation};
pub use runner::{GaResult, GaRunner, GenerationReport, GenerationStats};
pub use selection::{selection_probabilities, Selection, Selector};
pub use types::{GaProblem, Genotype, Individual};
