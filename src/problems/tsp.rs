//! Traveling salesman over an externally supplied cost matrix.
//!
//! A tour is a [`Permutation`] of the cities, closed into a cycle by
//! returning from the last city to the first. Fitness is the inverse of
//! the tour length, so shorter tours are fitter.

use crate::error::ConfigError;
use crate::ga::operators::{order_crossover, swap_mutation};
use crate::ga::{GaProblem, Permutation};
use rand::Rng;

/// Relative tolerance for the symmetry check of [`DistanceMatrix::new`].
const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// An `n × n` matrix of non-negative travel costs with a zero diagonal.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds a symmetric cost matrix from its rows.
    ///
    /// # Errors
    /// Fails if the matrix is empty, not square, has a negative or
    /// non-finite entry, a non-zero diagonal entry, or `d(i, j) != d(j, i)`.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, ConfigError> {
        Self::build(rows, true)
    }

    /// Builds a cost matrix that may be asymmetric (`d(i, j) != d(j, i)`).
    pub fn asymmetric(rows: Vec<Vec<f64>>) -> Result<Self, ConfigError> {
        Self::build(rows, false)
    }

    /// Builds a symmetric matrix from `cost(i, j)`.
    pub fn from_fn(n: usize, cost: impl Fn(usize, usize) -> f64) -> Result<Self, ConfigError> {
        let rows = (0..n).map(|i| (0..n).map(|j| cost(i, j)).collect()).collect();
        Self::new(rows)
    }

    fn build(rows: Vec<Vec<f64>>, symmetric: bool) -> Result<Self, ConfigError> {
        let n = rows.len();
        if n == 0 {
            return Err(ConfigError::NoCities);
        }

        let mut data = Vec::with_capacity(n * n);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != n {
                return Err(ConfigError::NonSquareMatrix {
                    row,
                    len: values.len(),
                    expected: n,
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(ConfigError::InvalidDistance { row, col, value });
                }
            }
            if values[row] != 0.0 {
                return Err(ConfigError::NonZeroDiagonal {
                    index: row,
                    value: values[row],
                });
            }
            data.extend(values);
        }

        if symmetric {
            for row in 0..n {
                for col in row + 1..n {
                    let a = data[row * n + col];
                    let b = data[col * n + row];
                    if (a - b).abs() > SYMMETRY_TOLERANCE * a.max(b).max(1.0) {
                        return Err(ConfigError::AsymmetricMatrix { row, col });
                    }
                }
            }
        }

        Ok(Self { n, data })
    }

    /// Number of cities.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Cost of travelling from city `from` to city `to`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        assert!(from < self.n && to < self.n, "city index out of range");
        self.data[from * self.n + to]
    }
}

/// The tour problem over a [`DistanceMatrix`].
#[derive(Debug, Clone)]
pub struct TspProblem {
    matrix: DistanceMatrix,
    zero_distance_fitness: f64,
}

impl TspProblem {
    /// Fitness assigned to a tour of length zero.
    pub const DEFAULT_ZERO_DISTANCE_FITNESS: f64 = 1.0e9;

    pub fn new(matrix: DistanceMatrix) -> Self {
        Self {
            matrix,
            zero_distance_fitness: Self::DEFAULT_ZERO_DISTANCE_FITNESS,
        }
    }

    /// Sets the fitness used when a tour has length zero, in place of the
    /// undefined `1 / 0`.
    pub fn with_zero_distance_fitness(mut self, fitness: f64) -> Result<Self, ConfigError> {
        if !(fitness.is_finite() && fitness > 0.0) {
            return Err(ConfigError::ZeroDistanceFitness(fitness));
        }
        self.zero_distance_fitness = fitness;
        Ok(self)
    }

    pub fn num_cities(&self) -> usize {
        self.matrix.size()
    }

    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    /// Total cost of visiting the cities in order and returning to the first.
    pub fn tour_length(&self, tour: &Permutation) -> f64 {
        let cities = tour.as_slice();
        debug_assert_eq!(cities.len(), self.num_cities(), "tour size mismatch");

        let (Some(&first), Some(&last)) = (cities.first(), cities.last()) else {
            return 0.0;
        };
        let open: f64 = cities
            .windows(2)
            .map(|w| self.matrix.get(w[0], w[1]))
            .sum();
        open + self.matrix.get(last, first)
    }
}

impl GaProblem for TspProblem {
    type Genotype = Permutation;

    fn create_genotype<R: Rng>(&self, rng: &mut R) -> Permutation {
        Permutation::random(self.num_cities(), rng)
    }

    fn evaluate(&self, tour: &Permutation) -> f64 {
        let length = self.tour_length(tour);
        if length > 0.0 {
            1.0 / length
        } else {
            self.zero_distance_fitness
        }
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &Permutation,
        parent2: &Permutation,
        rng: &mut R,
    ) -> Permutation {
        Permutation::from_operator(order_crossover(parent1.as_slice(), parent2.as_slice(), rng))
    }

    fn mutate<R: Rng>(&self, tour: &mut Permutation, rate: f64, rng: &mut R) {
        swap_mutation(&mut tour.order, rate, rng);
    }
}
