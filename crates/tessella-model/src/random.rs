// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Random Instance Generation
//!
//! Seeded generation of valid instances for tests and benchmarks. Subsets
//! are random shuffled-prefix samples of the universe, de-duplicated by
//! linear scan, with costs skewed so that small subsets tend to be cheap.

use crate::instance::Instance;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// Generates a random valid instance with `num_subsets` distinct subsets
/// over a universe of `element_count` elements.
///
/// Every subset is a uniformly shuffled prefix of the universe with a
/// uniformly drawn size in `1..=element_count`, re-drawn until distinct from
/// all previously generated subsets. Costs follow `10 · (1 − 0.9 · u^ln k)`
/// with `u` uniform in `[0, 1)` and `k` the subset size, which lands every
/// cost in `[1, 10]` and biases small subsets toward small costs
/// (singletons always cost exactly 1).
///
/// The same `(element_count, num_subsets, seed)` triple always produces the
/// same instance.
///
/// # Panics
///
/// Panics if `element_count` is zero or if `num_subsets` exceeds the number
/// of distinct non-empty subsets of the universe (the uniqueness scan could
/// never terminate).
pub fn random_instance(element_count: usize, num_subsets: usize, seed: u64) -> Instance<f64> {
    assert!(
        element_count > 0,
        "called `random_instance` with an empty universe"
    );
    if element_count < usize::BITS as usize {
        let distinct = (1usize << element_count) - 1;
        assert!(
            num_subsets <= distinct,
            "called `random_instance` asking for {} distinct subsets of a universe with only {} non-empty subsets",
            num_subsets,
            distinct
        );
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut universe: Vec<usize> = (0..element_count).collect();

    let mut subsets: Vec<Vec<usize>> = Vec::with_capacity(num_subsets);
    let mut costs: Vec<f64> = Vec::with_capacity(num_subsets);

    while subsets.len() < num_subsets {
        universe.shuffle(&mut rng);
        let size = rng.random_range(1..=element_count);
        let mut subset = universe[..size].to_vec();
        subset.sort_unstable();

        // The linear uniqueness scan is quadratic, which is fine at test and
        // benchmark scale.
        if subsets.iter().any(|existing| *existing == subset) {
            continue;
        }

        let skew = rng.random::<f64>().powf((size as f64).ln());
        costs.push(10.0 * (1.0 - 0.9 * skew));
        subsets.push(subset);
    }

    Instance::new(element_count, subsets, costs)
        .expect("randomly generated instances always validate")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_instances_validate() {
        for seed in 0..20 {
            let instance = random_instance(6, 10, seed);
            assert_eq!(instance.element_count(), 6);
            assert_eq!(instance.num_subsets(), 10);
        }
    }

    #[test]
    fn test_generation_is_deterministic_per_seed() {
        let a = random_instance(5, 8, 42);
        let b = random_instance(5, 8, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = random_instance(5, 8, 1);
        let b = random_instance(5, 8, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_subsets_are_distinct() {
        let instance = random_instance(4, 15, 7);
        for i in 0..instance.num_subsets() {
            for j in i + 1..instance.num_subsets() {
                assert_ne!(instance.subset(i), instance.subset(j));
            }
        }
    }

    #[test]
    fn test_costs_are_in_expected_range() {
        let instance = random_instance(6, 12, 3);
        for &cost in instance.costs() {
            assert!((1.0..=10.0).contains(&cost), "cost {} out of [1, 10]", cost);
        }
    }
}
