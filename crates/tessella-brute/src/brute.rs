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

//! # Brute-Force Exact Cover
//!
//! Enumerates subset selections as lexicographic combinations of sizes
//! 1 through min(m, n). An exact cover can never use more subsets than
//! that: each selected subset must contribute at least one element no
//! other selected subset covers. Each combination is swept subset by
//! subset, aborting as soon as an element is covered twice or the running
//! cost reaches the incumbent.
//!
//! On cost ties the first combination in enumeration order wins, which
//! makes results reproducible across runs.

use tessella_core::num::SolverCost;
use tessella_core::utils::combinations::Combinations;
use tessella_model::evaluation::Evaluation;
use tessella_model::instance::Instance;

/// The largest subset count the brute-force solver accepts.
pub const MAX_SUBSETS: usize = 32;

/// The error type for the brute-force solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BruteForceError {
    /// The instance has more subsets than the solver supports.
    TooManySubsets {
        /// The number of subsets in the rejected instance.
        num_subsets: usize,
    },
}

impl std::fmt::Display for BruteForceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooManySubsets { num_subsets } => write!(
                f,
                "the instance has {} subsets but the brute-force solver supports at most {}",
                num_subsets, MAX_SUBSETS
            ),
        }
    }
}

impl std::error::Error for BruteForceError {}

/// Finds a minimum-cost exact cover by exhaustive enumeration.
///
/// Returns the zero evaluation when no exact cover exists, the trivially
/// covered optimum when the universe is empty, and otherwise a proven
/// optimal evaluation. Fails only when the instance has more than
/// [`MAX_SUBSETS`] subsets.
pub fn solve_by_brute_force<C>(instance: &Instance<C>) -> Result<Evaluation<C>, BruteForceError>
where
    C: SolverCost,
{
    let num_subsets = instance.num_subsets();
    if num_subsets > MAX_SUBSETS {
        return Err(BruteForceError::TooManySubsets { num_subsets });
    }

    if instance.element_count() == 0 {
        return Ok(Evaluation::trivial());
    }

    let element_count = instance.element_count();
    let max_selection_size = num_subsets.min(element_count);

    // Scratch buffers reused across all combinations.
    let mut cover_counts = vec![0u32; element_count];
    let mut best_indices: Vec<usize> = Vec::with_capacity(max_selection_size);
    let mut best_cost: Option<C> = None;

    for selection_size in 1..=max_selection_size {
        let mut combinations = Combinations::new(num_subsets, selection_size);
        'combination: while combinations.advance() {
            let selection = combinations.current();

            for count in cover_counts.iter_mut() {
                *count = 0;
            }
            let mut cost = C::zero();
            let mut covered_elements = 0usize;

            for &subset_index in selection {
                cost = cost + instance.cost(subset_index);
                if let Some(best) = best_cost {
                    // An equal-cost selection loses to the incumbent, so
                    // the first lexicographic optimum is the one kept.
                    if cost >= best {
                        continue 'combination;
                    }
                }

                for &element in instance.subset(subset_index) {
                    cover_counts[element] += 1;
                    if cover_counts[element] > 1 {
                        continue 'combination;
                    }
                }
                covered_elements += instance.subset(subset_index).len();
            }

            // No element is covered twice, so full coverage means every
            // count is exactly one.
            if covered_elements == element_count {
                best_cost = Some(cost);
                best_indices.clear();
                best_indices.extend_from_slice(selection);
            }
        }
    }

    match best_cost {
        Some(cost) => Ok(Evaluation::proven_optimal(best_indices, cost)),
        None => Ok(Evaluation::no_cover()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessella_model::evaluation::verify_cover;

    fn instance(
        element_count: usize,
        subsets: Vec<Vec<usize>>,
        costs: Vec<f64>,
    ) -> Instance<f64> {
        Instance::new(element_count, subsets, costs).unwrap()
    }

    #[test]
    fn test_empty_universe_is_trivially_covered() {
        let instance = instance(0, Vec::new(), Vec::new());
        let evaluation = solve_by_brute_force(&instance).unwrap();
        assert!(evaluation.exactly_covered());
        assert!(evaluation.optimal());
        assert_eq!(evaluation.cost(), 0.0);
        assert!(evaluation.subset_indices().is_empty());
    }

    #[test]
    fn test_no_subsets_means_no_cover() {
        let instance = instance(2, Vec::new(), Vec::new());
        let evaluation = solve_by_brute_force(&instance).unwrap();
        assert!(!evaluation.exactly_covered());
        assert!(!evaluation.optimal());
    }

    #[test]
    fn test_pairwise_overlapping_triangle_has_no_cover() {
        let instance = instance(
            3,
            vec![vec![0, 1], vec![1, 2], vec![0, 2]],
            vec![1.0, 1.0, 1.0],
        );
        let evaluation = solve_by_brute_force(&instance).unwrap();
        assert!(!evaluation.exactly_covered());
    }

    #[test]
    fn test_single_full_subset() {
        let instance = instance(1, vec![vec![0]], vec![42.0]);
        let evaluation = solve_by_brute_force(&instance).unwrap();
        assert!(evaluation.optimal());
        assert_eq!(evaluation.subset_indices(), &[0]);
        assert_eq!(evaluation.cost(), 42.0);
    }

    #[test]
    fn test_cheapest_duplicate_pair_wins() {
        let instance = instance(
            2,
            vec![vec![0, 1], vec![0], vec![1], vec![0]],
            vec![17.0, 7.0, 5.0, 3.0],
        );
        let evaluation = solve_by_brute_force(&instance).unwrap();
        assert!(evaluation.optimal());
        assert!((evaluation.cost() - 8.0).abs() < 1e-12);
        assert_eq!(evaluation.subset_indices(), &[2, 3]);
    }

    #[test]
    fn test_three_element_instance() {
        let instance = instance(
            3,
            vec![vec![0, 1, 2], vec![0], vec![1], vec![1, 2], vec![0, 2]],
            vec![17.0, 5.0, 4.0, 3.0, 3.0],
        );
        let evaluation = solve_by_brute_force(&instance).unwrap();
        assert!(evaluation.optimal());
        assert!((evaluation.cost() - 7.0).abs() < 1e-12);
        assert_eq!(evaluation.subset_indices(), &[2, 4]);
        assert!(verify_cover(&instance, evaluation.subset_indices()));
    }

    #[test]
    fn test_four_element_instance() {
        let instance = instance(
            4,
            vec![
                vec![0],
                vec![0, 1],
                vec![1, 2],
                vec![1],
                vec![0, 1, 2, 3],
                vec![2, 3],
                vec![0, 1, 3],
                vec![2],
            ],
            vec![1.8, 1.7, 2.4, 1.4, 5.4, 2.7, 1.9, 1.6],
        );
        let evaluation = solve_by_brute_force(&instance).unwrap();
        assert!(evaluation.optimal());
        assert!((evaluation.cost() - 3.5).abs() < 1e-12);
        assert_eq!(evaluation.subset_indices(), &[6, 7]);
    }

    #[test]
    fn test_tie_break_keeps_first_lexicographic_selection() {
        // Two optimal covers of cost 2: {0} and {1, 2}. The singleton is
        // enumerated first and must win the tie.
        let instance = instance(2, vec![vec![0, 1], vec![0], vec![1]], vec![2.0, 1.0, 1.0]);
        let evaluation = solve_by_brute_force(&instance).unwrap();
        assert_eq!(evaluation.cost(), 2.0);
        assert_eq!(evaluation.subset_indices(), &[0]);
    }

    #[test]
    fn test_too_many_subsets_is_rejected() {
        let instance = instance(1, vec![vec![0]; 33], vec![1.0; 33]);
        assert_eq!(
            solve_by_brute_force(&instance).unwrap_err(),
            BruteForceError::TooManySubsets { num_subsets: 33 }
        );
    }

    #[test]
    fn test_exactly_32_subsets_is_accepted() {
        let instance = instance(1, vec![vec![0]; 32], vec![1.0; 32]);
        let evaluation = solve_by_brute_force(&instance).unwrap();
        assert!(evaluation.optimal());
        assert_eq!(evaluation.subset_indices(), &[0]);
    }
}
