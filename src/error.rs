//! Error types.
//!
//! Configuration problems are reported before a run starts
//! ([`ConfigError`]). A genotype that breaks its structural invariant is a
//! defect in an operator and is reported as [`InvariantViolation`].
//! Degenerate runtime conditions, such as a population whose total fitness
//! is zero, are not errors: the operators absorb them with documented
//! fallbacks.

/// Invalid run or problem configuration. Fatal at initialization.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("PopulationSize: population_size must be at least 1")]
    PopulationSize,
    #[error("MaxGenerations: max_generations must be at least 1")]
    MaxGenerations,
    #[error("RateOutOfRange: {name} must be within [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },
    #[error(
        "EliteRatio: elite_ratio={ratio} leaves no room for offspring \
         in a population of {population_size}"
    )]
    EliteRatio { ratio: f64, population_size: usize },
    #[error("TournamentSize: tournament size must be at least 1")]
    TournamentSize,
    #[error("TruncationRatio: truncation ratio must be within (0, 1], got {0}")]
    TruncationRatio(f64),
    #[error("GenotypeLength: genotype length must be within 1..={max}, got {len}")]
    GenotypeLength { len: usize, max: usize },
    #[error("NoCities: distance matrix must describe at least one city")]
    NoCities,
    #[error("NonSquareMatrix: row {row} has {len} entries, expected {expected}")]
    NonSquareMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("InvalidDistance: entry ({row}, {col}) must be finite and non-negative, got {value}")]
    InvalidDistance { row: usize, col: usize, value: f64 },
    #[error("NonZeroDiagonal: entry ({index}, {index}) must be zero, got {value}")]
    NonZeroDiagonal { index: usize, value: f64 },
    #[error("AsymmetricMatrix: entries ({row}, {col}) and ({col}, {row}) differ")]
    AsymmetricMatrix { row: usize, col: usize },
    #[error("ZeroDistanceFitness: fallback fitness must be finite and positive, got {0}")]
    ZeroDistanceFitness(f64),
}

impl ConfigError {
    /// Checks that `value` is a probability, rejecting NaN.
    pub(crate) fn check_rate(name: &'static str, value: f64) -> Result<(), Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(())
        } else {
            Err(Self::RateOutOfRange { name, value })
        }
    }
}

/// A genotype failed its structural invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("InvariantViolation: {reason}")]
pub struct InvariantViolation {
    pub reason: String,
}

impl InvariantViolation {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Top-level error returned by the GA entry points.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GaError {
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Invariant(#[from] InvariantViolation),
}
