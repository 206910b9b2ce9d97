//! Built-in genotype encodings.
//!
//! - [`BitString`]: fixed-width bits, decoded most-significant bit first
//!   to an unsigned integer.
//! - [`Permutation`]: a visiting order over `0..n`, each value exactly once.

use super::types::Genotype;
use crate::error::{ConfigError, InvariantViolation};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

// ============================================================================
// Bit strings
// ============================================================================

/// A fixed-length bit string, most significant bit first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitString {
    pub(crate) bits: Vec<bool>,
}

impl BitString {
    /// Longest supported bit string; the decoded value must fit in a `u64`.
    pub const MAX_LEN: usize = u64::BITS as usize;

    /// Creates a uniformly random bit string of `len` bits.
    ///
    /// # Panics
    /// Panics if `len` is zero or exceeds [`MAX_LEN`](Self::MAX_LEN).
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        assert!(
            (1..=Self::MAX_LEN).contains(&len),
            "bit string length must be within 1..={}",
            Self::MAX_LEN
        );
        Self {
            bits: (0..len).map(|_| rng.random_bool(0.5)).collect(),
        }
    }

    /// Encodes the low `len` bits of `value`.
    pub fn from_value(value: u64, len: usize) -> Result<Self, ConfigError> {
        check_len(len)?;
        let bits = (0..len).rev().map(|shift| (value >> shift) & 1 == 1).collect();
        Ok(Self { bits })
    }

    /// Wraps an explicit bit vector.
    pub fn from_bits(bits: Vec<bool>) -> Result<Self, ConfigError> {
        check_len(bits.len())?;
        Ok(Self { bits })
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }
}

fn check_len(len: usize) -> Result<(), ConfigError> {
    if (1..=BitString::MAX_LEN).contains(&len) {
        Ok(())
    } else {
        Err(ConfigError::GenotypeLength {
            len,
            max: BitString::MAX_LEN,
        })
    }
}

impl Genotype for BitString {
    type Value = u64;

    fn len(&self) -> usize {
        self.bits.len()
    }

    fn decode(&self) -> u64 {
        self.bits
            .iter()
            .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit))
    }

    fn check_invariant(&self) -> Result<(), InvariantViolation> {
        check_len(self.bits.len()).map_err(|e| InvariantViolation::new(e.to_string()))
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

// ============================================================================
// Permutations
// ============================================================================

/// A permutation of `0..n`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Permutation {
    pub(crate) order: Vec<usize>,
}

impl Permutation {
    /// Wraps `order`, checking that it is a bijection over `0..order.len()`.
    pub fn new(order: Vec<usize>) -> Result<Self, InvariantViolation> {
        check_bijection(&order)?;
        Ok(Self { order })
    }

    /// The identity permutation `0, 1, .., n - 1`.
    pub fn identity(n: usize) -> Self {
        Self {
            order: (0..n).collect(),
        }
    }

    /// A uniformly random permutation of `0..n` (Fisher–Yates).
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);
        Self { order }
    }

    /// Wraps an operator result. Operators preserve the bijection, so this
    /// only re-checks it in debug builds.
    pub(crate) fn from_operator(order: Vec<usize>) -> Self {
        debug_assert!(
            check_bijection(&order).is_ok(),
            "operator produced a non-permutation: {order:?}"
        );
        Self { order }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }
}

/// Checks that `order` contains every value in `0..order.len()` exactly once.
pub fn check_bijection(order: &[usize]) -> Result<(), InvariantViolation> {
    let n = order.len();
    let mut seen = vec![false; n];
    for (pos, &v) in order.iter().enumerate() {
        if v >= n {
            return Err(InvariantViolation::new(format!(
                "value {v} at position {pos} is out of range 0..{n}"
            )));
        }
        if seen[v] {
            return Err(InvariantViolation::new(format!(
                "value {v} appears more than once (again at position {pos})"
            )));
        }
        seen[v] = true;
    }
    Ok(())
}

impl Genotype for Permutation {
    type Value = Vec<usize>;

    fn len(&self) -> usize {
        self.order.len()
    }

    fn decode(&self) -> Vec<usize> {
        self.order.clone()
    }

    fn check_invariant(&self) -> Result<(), InvariantViolation> {
        check_bijection(&self.order)
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    // ---- BitString ----

    #[test]
    fn test_decode_msb_first() {
        let b = BitString::from_bits(vec![false, true, false, true, true]).unwrap();
        assert_eq!(b.decode(), 11);
        assert_eq!(b.to_string(), "01011");
    }

    #[test]
    fn test_from_value_pads_to_width() {
        let b = BitString::from_value(3, 5).unwrap();
        assert_eq!(b.to_string(), "00011");
        assert_eq!(b.len(), 5);
    }

    #[test]
    fn test_full_width_decode() {
        let b = BitString::from_value(u64::MAX, 64).unwrap();
        assert_eq!(b.decode(), u64::MAX);
    }

    #[test]
    fn test_length_limits() {
        assert_eq!(
            BitString::from_value(0, 0),
            Err(ConfigError::GenotypeLength { len: 0, max: 64 })
        );
        assert!(BitString::from_bits(vec![true; 65]).is_err());
    }

    #[test]
    fn test_random_bit_string_in_range() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let b = BitString::random(5, &mut rng);
            assert_eq!(b.len(), 5);
            assert!(b.decode() < 32);
        }
    }

    proptest! {
        #[test]
        fn prop_bit_string_round_trip(bits in proptest::collection::vec(any::<bool>(), 1..=64)) {
            let len = bits.len();
            let original = BitString::from_bits(bits).unwrap();
            let reencoded = BitString::from_value(original.decode(), len).unwrap();
            prop_assert_eq!(reencoded, original);
        }
    }

    // ---- Permutation ----

    #[test]
    fn test_permutation_new_accepts_bijection() {
        assert!(Permutation::new(vec![2, 0, 1]).is_ok());
        assert!(Permutation::new(vec![]).is_ok());
    }

    #[test]
    fn test_permutation_new_rejects_duplicates() {
        let err = Permutation::new(vec![0, 1, 1]).unwrap_err();
        assert!(err.reason.contains("more than once"), "{err}");
    }

    #[test]
    fn test_permutation_new_rejects_out_of_range() {
        let err = Permutation::new(vec![0, 3, 1]).unwrap_err();
        assert!(err.reason.contains("out of range"), "{err}");
    }

    #[test]
    fn test_random_permutation_is_valid() {
        let mut rng = create_rng(42);
        for n in [1, 2, 10, 50] {
            let p = Permutation::random(n, &mut rng);
            assert!(p.check_invariant().is_ok());
            assert_eq!(p.len(), n);
        }
    }

    #[test]
    fn test_identity_decode() {
        assert_eq!(Permutation::identity(4).decode(), vec![0, 1, 2, 3]);
    }
}
