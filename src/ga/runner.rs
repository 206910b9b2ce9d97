//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → elitism → selection → crossover →
//! mutation → evaluation → replacement, for a fixed number of generations.

use super::config::GaConfig;
use super::selection::{rank_descending, selection_probabilities, Selector};
use super::types::{GaProblem, Genotype, Individual};
use crate::error::{GaError, InvariantViolation};
use crate::random::{create_rng, rng_from_entropy, sub_seeds};
use rand::Rng;
use tracing::instrument;

/// Summary statistics of one generation's population.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// 0 for the initial population, `g` after the g-th replacement.
    pub generation: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    pub total_fitness: f64,
    /// Sum of the normalized roulette probabilities (1.0 up to rounding).
    pub probability_sum: f64,
    pub probability_mean: f64,
    pub probability_max: f64,
}

impl GenerationStats {
    /// Computes the statistics of `population`.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn from_population<G: Genotype>(generation: usize, population: &[Individual<G>]) -> Self {
        let n = population.len() as f64;
        let total_fitness: f64 = population.iter().map(Individual::fitness).sum();
        let probs = selection_probabilities(population);
        let probability_sum: f64 = probs.iter().sum();
        Self {
            generation,
            best_fitness: find_best(population).fitness(),
            mean_fitness: total_fitness / n,
            total_fitness,
            probability_sum,
            probability_mean: probability_sum / n,
            probability_max: probs.iter().copied().fold(0.0, f64::max),
        }
    }
}

/// Read-only view of a generation, handed to the observer of
/// [`GaRunner::run_with_observer`].
#[derive(Debug)]
pub struct GenerationReport<'a, G> {
    pub population: &'a [Individual<G>],
    /// Fittest individual of this generation.
    pub best: &'a Individual<G>,
    /// Fittest individual seen so far in the run.
    pub best_ever: &'a Individual<G>,
    pub stats: &'a GenerationStats,
}

impl<G: Genotype> GenerationReport<'_, G> {
    pub fn generation(&self) -> usize {
        self.stats.generation
    }

    /// Normalized roulette probability of each individual.
    pub fn selection_probabilities(&self) -> Vec<f64> {
        selection_probabilities(self.population)
    }
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<G> {
    /// The fittest individual seen during the entire run.
    pub best: Individual<G>,

    /// Same as `best.fitness()`.
    pub best_fitness: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// The population after the last generation.
    pub final_population: Vec<Individual<G>>,

    /// Statistics for the initial population and each generation after it.
    pub history: Vec<GenerationStats>,
}

impl<G: Genotype> GaResult<G> {
    /// Fittest individual of the final population.
    pub fn final_best(&self) -> &Individual<G> {
        find_best(&self.final_population)
    }

    /// First individual of the final population, with no regard to
    /// fitness.
    pub fn first_of_final(&self) -> &Individual<G> {
        &self.final_population[0]
    }
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_genetic::ga::{GaConfig, GaRunner};
/// use u_genetic::problems::MaxSquareProblem;
///
/// let problem = MaxSquareProblem::new(5).unwrap();
/// let config = GaConfig::bit_string().with_seed(42);
/// let result = GaRunner::run(&problem, &config).unwrap();
/// let x = result.best.decode();
/// assert_eq!(result.best_fitness, (x * x) as f64);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// Returns an error, before any generation runs, if the configuration
    /// is invalid, and [`GaError::Invariant`] if the problem's operators
    /// produce an offspring that breaks its encoding.
    pub fn run<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
    ) -> Result<GaResult<P::Genotype>, GaError> {
        Self::run_with_observer(problem, config, |_| {})
    }

    /// Runs the GA, calling `observer` with the initial population and
    /// again after every generation.
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            population_size = config.population_size,
            max_generations = config.max_generations,
            seed = ?config.seed
        )
    )]
    pub fn run_with_observer<P, F>(
        problem: &P,
        config: &GaConfig,
        mut observer: F,
    ) -> Result<GaResult<P::Genotype>, GaError>
    where
        P: GaProblem,
        F: FnMut(&GenerationReport<'_, P::Genotype>),
    {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => rng_from_entropy(),
        };

        // 1. Initialize and evaluate population
        let genotypes: Vec<P::Genotype> = (0..config.population_size)
            .map(|_| problem.create_genotype(&mut rng))
            .collect();
        let mut population = map_maybe_parallel(genotypes, config.parallel, |g| {
            Individual::evaluate(problem, g)
        });

        // 2. Track best
        let mut best = find_best(&population).clone();
        let mut history = Vec::with_capacity(config.max_generations + 1);
        history.push(observe(0, &population, &best, &mut observer));

        let elite_count = config.elite_count();

        // 3. Evolutionary loop
        for gen in 1..=config.max_generations {
            let selector = config.selection.prepare(&population);

            // Elite preservation: fittest first, copied unchanged
            let mut next_gen: Vec<Individual<P::Genotype>> =
                Vec::with_capacity(config.population_size);
            if elite_count > 0 {
                let ranked = rank_descending(&population);
                next_gen.extend(ranked[..elite_count].iter().map(|&i| population[i].clone()));
            }

            // Offspring, each with its own sub-seeded generator
            let seeds = sub_seeds(&mut rng, config.population_size - elite_count);
            let offspring = map_maybe_parallel(seeds, config.parallel, |seed| {
                breed_offspring(problem, config, &population, &selector, seed)
            });
            next_gen.extend(offspring.into_iter().collect::<Result<Vec<_>, _>>()?);

            population = next_gen;

            // Update best
            let gen_best = find_best(&population);
            if gen_best.fitness() > best.fitness() {
                best = gen_best.clone();
            }

            let stats = observe(gen, &population, &best, &mut observer);
            tracing::debug!(
                generation = gen,
                best_fitness = stats.best_fitness,
                mean_fitness = stats.mean_fitness,
                best_ever = best.fitness(),
                elite_count,
                "generation complete"
            );
            history.push(stats);
        }

        tracing::info!(
            generations = config.max_generations,
            best_fitness = best.fitness(),
            "GA run complete"
        );

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            generations: config.max_generations,
            final_population: population,
            history,
        })
    }
}

/// Produces one evaluated offspring from a sub-seed.
///
/// An offspring that breaks its encoding's invariant is a defect in the
/// problem's operators and aborts the run.
fn breed_offspring<P: GaProblem>(
    problem: &P,
    config: &GaConfig,
    population: &[Individual<P::Genotype>],
    selector: &Selector,
    seed: u64,
) -> Result<Individual<P::Genotype>, InvariantViolation> {
    let mut rng = create_rng(seed);

    // Selection
    let parent1 = &population[selector.select(&mut rng)];
    let parent2 = &population[selector.select(&mut rng)];

    // Crossover
    let mut child = if rng.random_range(0.0..1.0) < config.crossover_rate {
        problem.crossover(parent1.genotype(), parent2.genotype(), &mut rng)
    } else {
        parent1.genotype().clone()
    };

    // Mutation
    problem.mutate(&mut child, config.mutation_rate, &mut rng);

    if let Err(violation) = child.check_invariant() {
        tracing::error!(%violation, "offspring breaks its encoding");
        return Err(violation);
    }

    Ok(Individual::evaluate(problem, child))
}

fn observe<G, F>(
    generation: usize,
    population: &[Individual<G>],
    best_ever: &Individual<G>,
    observer: &mut F,
) -> GenerationStats
where
    G: Genotype,
    F: FnMut(&GenerationReport<'_, G>),
{
    let stats = GenerationStats::from_population(generation, population);
    observer(&GenerationReport {
        population,
        best: find_best(population),
        best_ever,
        stats: &stats,
    });
    stats
}

/// Find the individual with the highest fitness; the earliest wins ties.
fn find_best<G: Genotype>(population: &[Individual<G>]) -> &Individual<G> {
    population
        .iter()
        .reduce(|best, ind| if ind.fitness() > best.fitness() { ind } else { best })
        .expect("population must not be empty")
}

/// Maps `items` in order, with rayon when enabled. The output order is the
/// input order either way.
#[cfg(feature = "parallel")]
fn map_maybe_parallel<I, T, F>(items: Vec<I>, parallel: bool, f: F) -> Vec<T>
where
    I: Send,
    T: Send,
    F: Fn(I) -> T + Send + Sync,
{
    use rayon::prelude::*;
    if parallel {
        items.into_par_iter().map(f).collect()
    } else {
        items.into_iter().map(f).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn map_maybe_parallel<I, T, F>(items: Vec<I>, _parallel: bool, f: F) -> Vec<T>
where
    F: Fn(I) -> T,
{
    items.into_iter().map(f).collect()
}

// ============================================================================
// Tests
// ============================================================================
