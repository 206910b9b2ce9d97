//! Concrete problems.
//!
//! - [`MaxSquareProblem`]: maximize x² over fixed-width bit strings
//! - [`TspProblem`]: shortest closed tour over a [`DistanceMatrix`]

mod square;
mod tsp;

pub use square::MaxSquareProblem;
pub use tsp::{DistanceMatrix, TspProblem};
