//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.
//! It is an immutable value handed to the runner; problem-specific
//! options (genotype length, distance matrix) live on the problem.

use super::selection::Selection;
use crate::error::ConfigError;

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_genetic::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 50);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_genetic::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_selection(Selection::Truncation(0.5))
///     .with_elite_ratio(0.5)
///     .with_mutation_rate(0.015)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in every generation.
    pub population_size: usize,

    /// Number of generations to run.
    pub max_generations: usize,

    /// Selection strategy for choosing parents.
    pub selection: Selection,

    /// Fraction of the population carried over unchanged (0.0–1.0).
    ///
    /// The elite count is `floor(population_size * elite_ratio)`, so 0.5
    /// keeps the fitter half. 0.0 regenerates the whole population.
    pub elite_ratio: f64,

    /// Probability that an offspring is recombined from its two parents
    /// (0.0–1.0). Otherwise it starts as a copy of the first parent.
    pub crossover_rate: f64,

    /// Per-gene mutation probability (0.0–1.0).
    pub mutation_rate: f64,

    /// Whether to breed offspring in parallel using rayon.
    ///
    /// Only takes effect with the `parallel` feature. Results are identical
    /// either way.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 50,
            selection: Selection::default(),
            elite_ratio: 0.0,
            crossover_rate: 0.9,
            mutation_rate: 0.01,
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Sets the elite ratio.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Enables or disables parallel breeding.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for the x² bit-string search: six individuals, four
    /// generations, roulette selection, no elitism.
    pub fn bit_string() -> Self {
        Self {
            population_size: 6,
            max_generations: 4,
            selection: Selection::Roulette,
            elite_ratio: 0.0,
            crossover_rate: 0.7,
            mutation_rate: 0.01,
            ..Self::default()
        }
    }

    /// Preset for the tour search: 100 individuals, 50 generations, the
    /// fitter half kept as elites, every offspring recombined.
    pub fn tsp() -> Self {
        Self {
            population_size: 100,
            max_generations: 50,
            selection: Selection::Roulette,
            elite_ratio: 0.5,
            crossover_rate: 1.0,
            mutation_rate: 0.015,
            ..Self::default()
        }
    }

    /// Number of elites carried into each next generation.
    pub fn elite_count(&self) -> usize {
        (self.population_size as f64 * self.elite_ratio) as usize
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::PopulationSize);
        }
        if self.max_generations == 0 {
            return Err(ConfigError::MaxGenerations);
        }
        ConfigError::check_rate("crossover_rate", self.crossover_rate)?;
        ConfigError::check_rate("mutation_rate", self.mutation_rate)?;
        ConfigError::check_rate("elite_ratio", self.elite_ratio)?;
        if self.elite_count() >= self.population_size {
            return Err(ConfigError::EliteRatio {
                ratio: self.elite_ratio,
                population_size: self.population_size,
            });
        }
        self.selection.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.max_generations, 50);
        assert_eq!(config.selection, Selection::Roulette);
        assert_eq!(config.elite_ratio, 0.0);
        assert!((config.crossover_rate - 0.9).abs() < 1e-10);
        assert!((config.mutation_rate - 0.01).abs() < 1e-10);
        assert!(!config.parallel);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(200)
            .with_max_generations(1000)
            .with_selection(Selection::Tournament(3))
            .with_elite_ratio(0.2)
            .with_crossover_rate(0.8)
            .with_mutation_rate(0.05)
            .with_parallel(true)
            .with_seed(42);

        assert_eq!(config.population_size, 200);
        assert_eq!(config.max_generations, 1000);
        assert_eq!(config.selection, Selection::Tournament(3));
        assert!((config.elite_ratio - 0.2).abs() < 1e-10);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert!(config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_population_zero() {
        let config = GaConfig::default().with_population_size(0);
        assert_eq!(config.validate(), Err(ConfigError::PopulationSize));
    }

    #[test]
    fn test_validate_single_individual_ok() {
        let config = GaConfig::default().with_population_size(1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = GaConfig::default().with_max_generations(0);
        assert_eq!(config.validate(), Err(ConfigError::MaxGenerations));
    }

    #[test]
    fn test_validate_rates_out_of_range() {
        let config = GaConfig::default().with_crossover_rate(1.5);
        assert_eq!(
            config.validate(),
            Err(ConfigError::RateOutOfRange {
                name: "crossover_rate",
                value: 1.5
            })
        );
        assert!(GaConfig::default().with_mutation_rate(-0.01).validate().is_err());
        assert!(GaConfig::default().with_mutation_rate(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_validate_elite_too_high() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_elite_ratio(1.0);
        assert!(matches!(config.validate(), Err(ConfigError::EliteRatio { .. })));
    }

    #[test]
    fn test_validate_selection_parameters() {
        let config = GaConfig::default().with_selection(Selection::Tournament(0));
        assert_eq!(config.validate(), Err(ConfigError::TournamentSize));
    }

    #[test]
    fn test_elite_count_floors() {
        assert_eq!(GaConfig::tsp().elite_count(), 50);
        let odd = GaConfig::tsp().with_population_size(7);
        assert_eq!(odd.elite_count(), 3);
        assert_eq!(GaConfig::bit_string().elite_count(), 0);
    }

    // ---- Presets ----

    #[test]
    fn test_preset_bit_string() {
        let config = GaConfig::bit_string();
        assert_eq!(config.population_size, 6);
        assert_eq!(config.max_generations, 4);
        assert!((config.crossover_rate - 0.7).abs() < 1e-15);
        assert!((config.mutation_rate - 0.01).abs() < 1e-15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_preset_tsp() {
        let config = GaConfig::tsp();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.max_generations, 50);
        assert_eq!(config.crossover_rate, 1.0);
        assert!((config.mutation_rate - 0.015).abs() < 1e-15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_preset_chainable() {
        let config = GaConfig::tsp().with_population_size(20).with_seed(42);
        assert_eq!(config.population_size, 20);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.elite_count(), 10);
    }
}
