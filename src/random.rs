//! Seedable random source.
//!
//! Every operator takes its generator as an explicit `&mut R: Rng`
//! argument; nothing in the crate draws from a global generator except
//! [`rng_from_entropy`], which is only used when no seed is configured.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Generator used by the GA engine.
pub type GaRng = Xoshiro256PlusPlus;

/// Creates a deterministic generator from a `u64` seed.
pub fn create_rng(seed: u64) -> GaRng {
    Xoshiro256PlusPlus::seed_from_u64(seed)
}

/// Creates a generator seeded from the thread-local entropy source.
pub fn rng_from_entropy() -> GaRng {
    create_rng(rand::random())
}

/// Draws `count` sub-seeds from `rng`, in order.
///
/// Each offspring of a generation gets its own sub-seed, so the draws it
/// consumes do not depend on the order in which offspring are produced.
pub fn sub_seeds<R: Rng>(rng: &mut R, count: usize) -> Vec<u64> {
    (0..count).map(|_| rng.random()).collect()
}
