//! Selection strategies for the GA.
//!
//! Selection determines which individuals are chosen as parents for
//! crossover. Every strategy samples with replacement and favors
//! **higher** fitness.
//!
//! A strategy is [prepared](Selection::prepare) once per generation
//! against the fully evaluated population. The resulting [`Selector`] is
//! read-only, so any number of offspring can draw from it independently.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1 (roulette wheel)
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::{Genotype, Individual};
use crate::error::ConfigError;
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use u_genetic::ga::Selection;
///
/// // Fitness-proportionate (the default)
/// let sel = Selection::Roulette;
///
/// // Uniform over the fitter half
/// let sel = Selection::Truncation(0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Individual `i` is chosen with probability `fitness_i / total`.
    /// A threshold `r` is drawn from `[0, total)` and the first individual
    /// whose cumulative fitness is strictly greater than `r` wins, so
    /// zero-fitness individuals are never chosen while `total > 0`.
    /// When `total` is zero (or not finite) the choice is uniform.
    ///
    /// # Complexity
    /// O(n) to prepare, O(log n) per selection
    #[default]
    Roulette,

    /// Uniform choice among the top `ceil(n * ratio)` individuals by fitness
    /// (at least one). `Truncation(0.5)` picks uniformly from the fitter half.
    ///
    /// # Complexity
    /// O(n log n) to prepare, O(1) per selection
    Truncation(f64),

    /// Tournament selection: draw `k` individuals uniformly, keep the fittest.
    ///
    /// # Complexity
    /// O(n) to prepare, O(k) per selection
    Tournament(usize),
}

impl Selection {
    /// Checks the strategy parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Selection::Roulette => Ok(()),
            Selection::Truncation(ratio) => {
                if ratio > 0.0 && ratio <= 1.0 {
                    Ok(())
                } else {
                    Err(ConfigError::TruncationRatio(ratio))
                }
            }
            Selection::Tournament(0) => Err(ConfigError::TournamentSize),
            Selection::Tournament(_) => Ok(()),
        }
    }

    /// Prepares the strategy against an evaluated population.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn prepare<G: Genotype>(&self, population: &[Individual<G>]) -> Selector {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        let n = population.len();
        let kind = match *self {
            Selection::Roulette => roulette_wheel(population),
            Selection::Truncation(ratio) => {
                let keep = ((n as f64 * ratio).ceil() as usize).clamp(1, n);
                let mut ranked = rank_descending(population);
                ranked.truncate(keep);
                SelectorKind::Truncation { ranked }
            }
            Selection::Tournament(k) => SelectorKind::Tournament {
                k: k.max(1),
                fitness: population.iter().map(Individual::fitness).collect(),
            },
        };
        Selector { n, kind }
    }

    /// Selects a single parent index from the population.
    ///
    /// Prefer [`prepare`](Self::prepare) when drawing more than once.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<G: Genotype, R: Rng>(&self, population: &[Individual<G>], rng: &mut R) -> usize {
        self.prepare(population).select(rng)
    }
}

/// A selection strategy bound to one generation's population.
#[derive(Debug, Clone)]
pub struct Selector {
    n: usize,
    kind: SelectorKind,
}

#[derive(Debug, Clone)]
enum SelectorKind {
    Uniform,
    Roulette {
        cumulative: Vec<f64>,
        total: f64,
        last_positive: usize,
    },
    Truncation {
        ranked: Vec<usize>,
    },
    Tournament {
        k: usize,
        fitness: Vec<f64>,
    },
}

impl Selector {
    /// Draws one parent index.
    pub fn select<R: Rng>(&self, rng: &mut R) -> usize {
        match &self.kind {
            SelectorKind::Uniform => rng.random_range(0..self.n),
            SelectorKind::Roulette {
                cumulative,
                total,
                last_positive,
            } => {
                let threshold = rng.random_range(0.0..*total);
                let idx = cumulative.partition_point(|&c| c <= threshold);
                if idx < self.n {
                    idx
                } else {
                    *last_positive // floating-point fallback
                }
            }
            SelectorKind::Truncation { ranked } => ranked[rng.random_range(0..ranked.len())],
            SelectorKind::Tournament { k, fitness } => {
                let mut best_idx = rng.random_range(0..self.n);
                for _ in 1..*k {
                    let idx = rng.random_range(0..self.n);
                    if fitness[idx] > fitness[best_idx] {
                        best_idx = idx;
                    }
                }
                best_idx
            }
        }
    }

    /// Size of the population this selector draws from.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Returns `true` if roulette selection degraded to uniform choice.
    pub fn is_uniform(&self) -> bool {
        matches!(self.kind, SelectorKind::Uniform)
    }
}

/// Roulette weight of an individual. Negative or NaN fitness counts as zero.
fn weight(fitness: f64) -> f64 {
    if fitness > 0.0 {
        fitness
    } else {
        0.0
    }
}

fn roulette_wheel<G: Genotype>(population: &[Individual<G>]) -> SelectorKind {
    let mut cumulative = Vec::with_capacity(population.len());
    let mut total = 0.0;
    let mut last_positive = 0;
    for (i, ind) in population.iter().enumerate() {
        let w = weight(ind.fitness());
        if w > 0.0 {
            last_positive = i;
        }
        total += w;
        cumulative.push(total);
    }

    if total > 0.0 && total.is_finite() {
        SelectorKind::Roulette {
            cumulative,
            total,
            last_positive,
        }
    } else {
        tracing::debug!(
            population_size = population.len(),
            total_fitness = total,
            "roulette total fitness is degenerate, selecting uniformly"
        );
        SelectorKind::Uniform
    }
}

/// Indices of `population` ordered by fitness, fittest first. Ties keep
/// their population order.
pub(crate) fn rank_descending<G: Genotype>(population: &[Individual<G>]) -> Vec<usize> {
    let mut ranked: Vec<usize> = (0..population.len()).collect();
    ranked.sort_by(|&a, &b| {
        population[b]
            .fitness()
            .total_cmp(&population[a].fitness())
    });
    ranked
}

/// Normalized roulette probability `fitness_i / total` of each individual.
///
/// Falls back to the uniform distribution when the total is zero or not
/// finite, matching what [`Selection::Roulette`] actually does.
pub fn selection_probabilities<G: Genotype>(population: &[Individual<G>]) -> Vec<f64> {
    let n = population.len();
    let total: f64 = population.iter().map(|ind| weight(ind.fitness())).sum();
    if total > 0.0 && total.is_finite() {
        population
            .iter()
            .map(|ind| weight(ind.fitness()) / total)
            .collect()
    } else {
        vec![1.0 / n as f64; n]
    }
}
