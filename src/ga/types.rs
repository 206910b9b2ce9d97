//! Core trait definitions for the GA framework.
//!
//! [`Genotype`] describes an encoded candidate solution, [`GaProblem`]
//! supplies the problem-specific pieces (random creation, fitness,
//! recombination, mutation), and [`Individual`] pairs a genotype with its
//! cached fitness.

use crate::error::InvariantViolation;
use rand::Rng;
use std::fmt::Debug;

/// An encoded candidate solution.
///
/// The length of a genotype is fixed for the lifetime of a run. Operators
/// never modify a genotype after it has been placed into a population;
/// they build new genotypes from their parents.
pub trait Genotype: Clone + Debug + PartialEq + Send + Sync {
    /// The decoded form of the genotype.
    type Value;

    /// Number of genes.
    fn len(&self) -> usize;

    /// Returns `true` if the genotype has no genes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decodes the genotype into the value it represents.
    fn decode(&self) -> Self::Value;

    /// Verifies the structural invariant of the encoding.
    ///
    /// The default implementation accepts every genotype.
    fn check_invariant(&self) -> Result<(), InvariantViolation> {
        Ok(())
    }
}

/// A genotype paired with its fitness.
///
/// The only way to build an `Individual` is [`Individual::evaluate`], and
/// the genotype cannot be modified afterwards, so [`fitness`](Self::fitness)
/// is always the fitness of the stored genotype.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual<G> {
    genotype: G,
    fitness: f64,
}

impl<G: Genotype> Individual<G> {
    /// Evaluates `genotype` against `problem` and caches the result.
    pub fn evaluate<P>(problem: &P, genotype: G) -> Self
    where
        P: GaProblem<Genotype = G> + ?Sized,
    {
        let fitness = problem.evaluate(&genotype);
        debug_assert!(
            fitness >= 0.0,
            "fitness must be non-negative, got {fitness} for {genotype:?}"
        );
        Self { genotype, fitness }
    }

    /// The encoded solution.
    pub fn genotype(&self) -> &G {
        &self.genotype
    }

    /// The cached fitness. Higher is better.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Decodes the genotype.
    pub fn decode(&self) -> G::Value {
        self.genotype.decode()
    }

    /// Consumes the individual, returning its genotype.
    pub fn into_genotype(self) -> G {
        self.genotype
    }

    #[cfg(test)]
    pub(crate) fn with_fitness(genotype: G, fitness: f64) -> Self {
        Self { genotype, fitness }
    }
}

/// Defines a GA optimization problem.
///
/// Fitness is **maximized**: evaluators must return non-negative values
/// where higher means better.
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because offspring may be bred and
/// evaluated in parallel when the `parallel` feature is enabled.
pub trait GaProblem: Send + Sync {
    /// The encoding used by this problem.
    type Genotype: Genotype;

    /// Creates a uniformly random genotype.
    fn create_genotype<R: Rng>(&self, rng: &mut R) -> Self::Genotype;

    /// Computes the fitness of a genotype. Must be non-negative and must
    /// not fail for any valid genotype.
    fn evaluate(&self, genotype: &Self::Genotype) -> f64;

    /// Recombines two parents into one offspring.
    ///
    /// The engine decides whether recombination happens at all (see
    /// `GaConfig::crossover_rate`). The default implementation copies
    /// parent1.
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Genotype,
        _parent2: &Self::Genotype,
        _rng: &mut R,
    ) -> Self::Genotype {
        parent1.clone()
    }

    /// Mutates a freshly produced offspring, with `rate` as the per-gene
    /// probability.
    ///
    /// The default implementation is a no-op.
    fn mutate<R: Rng>(&self, _genotype: &mut Self::Genotype, _rate: f64, _rng: &mut R) {}
}
