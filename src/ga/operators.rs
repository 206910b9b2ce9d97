//! Genetic operators for the built-in encodings.
//!
//! These operate on plain slices and are problem-agnostic: any bit-string
//! or permutation problem can use them.
//!
//! # Crossover Operators
//!
//! - [`single_point_crossover`]: head of parent1, tail of parent2
//! - [`order_crossover`] (OX): Davis (1985), preserves relative order
//!
//! # Mutation Operators
//!
//! - [`bit_flip_mutation`]: independent per-bit flip — O(n)
//! - [`swap_mutation`]: independent per-position swap — O(n)
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*

use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// Single-point crossover.
///
/// Draws a cut point `c` uniformly from `[0, n)` and returns
/// `parent1[..c] ++ parent2[c..]`. A cut at 0 yields a copy of parent2.
///
/// # Panics
/// Panics if parents have different lengths or are empty.
pub fn single_point_crossover<T: Copy, R: Rng>(
    parent1: &[T],
    parent2: &[T],
    rng: &mut R,
) -> Vec<T> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    let cut = rng.random_range(0..n);
    let mut child = Vec::with_capacity(n);
    child.extend_from_slice(&parent1[..cut]);
    child.extend_from_slice(&parent2[cut..]);
    child
}

/// Order Crossover (OX) for permutations.
///
/// Draws `start` uniformly from `[0, n)` and `end` uniformly from
/// `[start, n)`, then builds the child with
/// [`order_crossover_with_segment`]. `start == end` borrows nothing from
/// parent1, so the child is a copy of parent2.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths or are empty.
pub fn order_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    let start = rng.random_range(0..n);
    let end = rng.random_range(start..n);
    order_crossover_with_segment(parent1, parent2, start, end)
}

/// Builds one OX child from an explicit half-open segment `[start, end)`.
///
/// 1. Copy `parent1[start..end]` into the same positions of the child
/// 2. Walk `parent2` left to right; each city not yet in the child goes to
///    the next unfilled position, scanning from the left
///
/// The segment holds `end - start` distinct cities and parent2 supplies
/// exactly the `n - (end - start)` missing ones, so every slot is filled
/// once and the fill cursor never passes the end.
///
/// # Panics
/// Panics if parents have different lengths or `start > end` or `end > n`.
pub fn order_crossover_with_segment(
    parent1: &[usize],
    parent2: &[usize],
    start: usize,
    end: usize,
) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(start <= end && end <= n, "invalid segment [{start}, {end}) for length {n}");

    let sentinel = usize::MAX;
    let mut child = vec![sentinel; n];
    let mut present = vec![false; n];

    // Step 1: Copy segment from parent1
    for i in start..end {
        child[i] = parent1[i];
        present[parent1[i]] = true;
    }

    // Step 2: Fill the gaps from parent2, in parent2's order
    let mut pos = 0;
    for &city in parent2 {
        if present[city] {
            continue;
        }
        while child[pos] != sentinel {
            pos += 1;
        }
        child[pos] = city;
        present[city] = true;
    }

    child
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Bit-flip mutation: each bit flips independently with probability `rate`.
pub fn bit_flip_mutation<R: Rng>(bits: &mut [bool], rate: f64, rng: &mut R) {
    for bit in bits.iter_mut() {
        if rng.random_range(0.0..1.0) < rate {
            *bit = !*bit;
        }
    }
}

/// Swap mutation: for each position `i`, with probability `rate`, swap it
/// with a uniformly drawn position `j` (`j == i` is a no-op).
pub fn swap_mutation<T, R: Rng>(perm: &mut [T], rate: f64, rng: &mut R) {
    let n = perm.len();
    for i in 0..n {
        if rng.random_range(0.0..1.0) < rate {
            let j = rng.random_range(0..n);
            perm.swap(i, j);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::encoding::check_bijection;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn is_valid_permutation(perm: &[usize], n: usize) -> bool {
        perm.len() == n && check_bijection(perm).is_ok()
    }

    // ---- Single-point crossover ----

    #[test]
    fn test_single_point_splices_parents() {
        let mut rng = create_rng(42);
        let p1 = vec![true; 8];
        let p2 = vec![false; 8];

        for _ in 0..100 {
            let child = single_point_crossover(&p1, &p2, &mut rng);
            assert_eq!(child.len(), 8);
            // A run of parent1's bits followed by a run of parent2's bits
            let cut = child.iter().take_while(|&&b| b).count();
            assert!(cut < 8, "cut must fall inside [0, n)");
            assert!(child[cut..].iter().all(|&b| !b), "child {child:?}");
        }
    }

    #[test]
    fn test_single_point_covers_all_cuts() {
        let mut rng = create_rng(7);
        let p1 = vec![1u8; 5];
        let p2 = vec![0u8; 5];
        let mut seen = [false; 5];
        for _ in 0..500 {
            let child = single_point_crossover(&p1, &p2, &mut rng);
            seen[child.iter().filter(|&&g| g == 1).count()] = true;
        }
        assert!(seen.iter().all(|&s| s), "every cut in [0, 5) should occur");
    }

    #[test]
    fn test_single_point_single_gene() {
        let mut rng = create_rng(42);
        assert_eq!(single_point_crossover(&[true], &[false], &mut rng), vec![false]);
    }

    #[test]
    #[should_panic(expected = "parents must have equal length")]
    fn test_single_point_length_mismatch() {
        let mut rng = create_rng(42);
        single_point_crossover(&[true, false], &[true], &mut rng);
    }

    // ---- Order crossover ----

    #[test]
    fn test_ox_segment_example() {
        let p1 = vec![0, 1, 2, 3, 4, 5, 6, 7];
        let p2 = vec![7, 6, 5, 4, 3, 2, 1, 0];
        let child = order_crossover_with_segment(&p1, &p2, 2, 5);
        // Positions 2..5 come from p1; the gaps take 7, 6, 5, 1, 0 in p2's order
        assert_eq!(child, vec![7, 6, 2, 3, 4, 5, 1, 0]);
    }

    #[test]
    fn test_ox_empty_segment_copies_parent2() {
        let p1 = vec![0, 1, 2, 3];
        let p2 = vec![2, 0, 3, 1];
        assert_eq!(order_crossover_with_segment(&p1, &p2, 2, 2), p2);
    }

    #[test]
    fn test_ox_full_segment_copies_parent1() {
        let p1 = vec![0, 1, 2, 3];
        let p2 = vec![2, 0, 3, 1];
        assert_eq!(order_crossover_with_segment(&p1, &p2, 0, 4), p1);
    }

    #[test]
    fn test_ox_produces_valid_permutations() {
        let mut rng = create_rng(42);
        let p1: Vec<usize> = (0..8).collect();
        let p2 = vec![3, 7, 5, 1, 6, 0, 2, 4];

        for _ in 0..200 {
            let child = order_crossover(&p1, &p2, &mut rng);
            assert!(is_valid_permutation(&child, 8), "OX child not valid: {child:?}");
        }
    }

    #[test]
    fn test_ox_single_element() {
        let mut rng = create_rng(42);
        assert_eq!(order_crossover(&[0], &[0], &mut rng), vec![0]);
    }

    #[test]
    fn test_ox_identical_parents() {
        let mut rng = create_rng(42);
        let p = vec![4, 2, 0, 3, 1];
        for _ in 0..20 {
            assert_eq!(order_crossover(&p, &p, &mut rng), p);
        }
    }

    // ---- Bit-flip mutation ----

    #[test]
    fn test_bit_flip_rate_zero_is_identity() {
        let mut rng = create_rng(42);
        let mut bits = vec![true, false, true, true, false];
        bit_flip_mutation(&mut bits, 0.0, &mut rng);
        assert_eq!(bits, vec![true, false, true, true, false]);
    }

    #[test]
    fn test_bit_flip_rate_one_flips_all() {
        let mut rng = create_rng(42);
        let mut bits = vec![true, false, true, true, false];
        bit_flip_mutation(&mut bits, 1.0, &mut rng);
        assert_eq!(bits, vec![false, true, false, false, true]);
    }

    #[test]
    fn test_bit_flip_rate_is_per_bit() {
        let mut rng = create_rng(42);
        let mut bits = vec![false; 10_000];
        bit_flip_mutation(&mut bits, 0.1, &mut rng);
        let flipped = bits.iter().filter(|&&b| b).count() as f64 / 10_000.0;
        assert!((flipped - 0.1).abs() < 0.02, "flip fraction {flipped}");
    }

    // ---- Swap mutation ----

    #[test]
    fn test_swap_rate_zero_is_identity() {
        let mut rng = create_rng(42);
        let mut perm: Vec<usize> = (0..10).collect();
        swap_mutation(&mut perm, 0.0, &mut rng);
        assert_eq!(perm, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_swap_preserves_permutation() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let mut perm: Vec<usize> = (0..10).collect();
            swap_mutation(&mut perm, 0.5, &mut rng);
            assert!(is_valid_permutation(&perm, 10));
        }
    }

    #[test]
    fn test_swap_single_element() {
        let mut rng = create_rng(42);
        let mut perm = vec![0];
        swap_mutation(&mut perm, 1.0, &mut rng);
        assert_eq!(perm, vec![0]);
    }

    // ---- Integration: crossover + mutation pipeline ----

    proptest! {
        #[test]
        fn prop_ox_then_swap_is_bijection(
            n in 1usize..40,
            seed in any::<u64>(),
            rate in 0.0f64..=1.0,
        ) {
            let mut rng = create_rng(seed);
            let p1 = crate::ga::Permutation::random(n, &mut rng);
            let p2 = crate::ga::Permutation::random(n, &mut rng);
            let mut child = order_crossover(p1.as_slice(), p2.as_slice(), &mut rng);
            prop_assert!(is_valid_permutation(&child, n), "after OX: {:?}", child);
            swap_mutation(&mut child, rate, &mut rng);
            prop_assert!(is_valid_permutation(&child, n), "after swap: {:?}", child);
        }

        #[test]
        fn prop_ox_any_segment_is_bijection(
            n in 1usize..30,
            a in 0usize..30,
            b in 0usize..30,
            seed in any::<u64>(),
        ) {
            let mut rng = create_rng(seed);
            let (start, end) = (a.min(b).min(n), a.max(b).min(n));
            let p1 = crate::ga::Permutation::random(n, &mut rng);
            let p2 = crate::ga::Permutation::random(n, &mut rng);
            let child = order_crossover_with_segment(p1.as_slice(), p2.as_slice(), start, end);
            prop_assert!(is_valid_permutation(&child, n));
            prop_assert_eq!(&child[start..end], &p1.as_slice()[start..end]);
        }
    }
}
