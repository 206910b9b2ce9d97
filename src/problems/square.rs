//! Maximize `f(x) = x²` over `L`-bit unsigned integers.

use crate::error::ConfigError;
use crate::ga::operators::{bit_flip_mutation, single_point_crossover};
use crate::ga::{BitString, GaProblem, Genotype};
use rand::Rng;

/// The x² problem over fixed-width bit strings.
///
/// Fitness is the square of the decoded value, so the optimum is the
/// all-ones string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxSquareProblem {
    genotype_length: usize,
}

impl MaxSquareProblem {
    /// Creates the problem for `genotype_length`-bit strings (1..=64).
    pub fn new(genotype_length: usize) -> Result<Self, ConfigError> {
        if !(1..=BitString::MAX_LEN).contains(&genotype_length) {
            return Err(ConfigError::GenotypeLength {
                len: genotype_length,
                max: BitString::MAX_LEN,
            });
        }
        Ok(Self { genotype_length })
    }

    pub fn genotype_length(&self) -> usize {
        self.genotype_length
    }

    /// Largest value representable in `genotype_length` bits.
    pub fn max_value(&self) -> u64 {
        u64::MAX >> (u64::BITS as usize - self.genotype_length)
    }
}

impl GaProblem for MaxSquareProblem {
    type Genotype = BitString;

    fn create_genotype<R: Rng>(&self, rng: &mut R) -> BitString {
        BitString::random(self.genotype_length, rng)
    }

    fn evaluate(&self, genotype: &BitString) -> f64 {
        let x = genotype.decode() as f64;
        x * x
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &BitString,
        parent2: &BitString,
        rng: &mut R,
    ) -> BitString {
        BitString {
            bits: single_point_crossover(parent1.as_slice(), parent2.as_slice(), rng),
        }
    }

    fn mutate<R: Rng>(&self, genotype: &mut BitString, rate: f64, rng: &mut R) {
        bit_flip_mutation(&mut genotype.bits, rate, rng);
    }
}
