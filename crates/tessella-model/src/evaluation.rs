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

//! # Solver Evaluation
//!
//! The result a solver hands back: which subsets were selected, whether they
//! cover every element exactly once, the summed cost, and whether the
//! selection is a proven minimum. The zero evaluation ([`Evaluation::no_cover`])
//! means "no exact cover exists" and is distinct from an error.

use crate::instance::Instance;
use fixedbitset::FixedBitSet;
use tessella_core::num::SolverCost;

/// The evaluation of a subset selection against an instance.
///
/// Immutable after creation. `optimal` implies `exactly_covered`; the
/// mandatory solver contract sets `optimal` whenever a cover is returned
/// from a run that was driven to completion, while a cooperatively
/// interrupted search may return `exactly_covered = true, optimal = false`.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<C> {
    /// Selected subset indices in the caller's numbering, strictly increasing.
    subset_indices: Vec<usize>,
    /// Whether every element is covered exactly once by the selection.
    exactly_covered: bool,
    /// Sum of the selected subsets' costs.
    cost: C,
    /// Whether the selection is a proven minimum-cost exact cover.
    optimal: bool,
}

impl<C> Evaluation<C>
where
    C: SolverCost,
{
    /// The zero evaluation: no exact cover exists.
    #[inline]
    pub fn no_cover() -> Self {
        Self {
            subset_indices: Vec::new(),
            exactly_covered: false,
            cost: C::zero(),
            optimal: false,
        }
    }

    /// The trivially covered optimum of an instance with no elements.
    #[inline]
    pub fn trivial() -> Self {
        Self {
            subset_indices: Vec::new(),
            exactly_covered: true,
            cost: C::zero(),
            optimal: true,
        }
    }

    /// A proven minimum-cost exact cover.
    ///
    /// # Panics
    ///
    /// Panics (in debug builds) if `subset_indices` is not strictly
    /// increasing.
    pub fn proven_optimal(subset_indices: Vec<usize>, cost: C) -> Self {
        debug_assert!(
            subset_indices.windows(2).all(|pair| pair[0] < pair[1]),
            "called `Evaluation::proven_optimal` with unsorted subset indices"
        );
        Self {
            subset_indices,
            exactly_covered: true,
            cost,
            optimal: true,
        }
    }

    /// An exact cover that is not proven optimal (an interrupted search's
    /// incumbent).
    ///
    /// # Panics
    ///
    /// Panics (in debug builds) if `subset_indices` is not strictly
    /// increasing.
    pub fn feasible(subset_indices: Vec<usize>, cost: C) -> Self {
        debug_assert!(
            subset_indices.windows(2).all(|pair| pair[0] < pair[1]),
            "called `Evaluation::feasible` with unsorted subset indices"
        );
        Self {
            subset_indices,
            exactly_covered: true,
            cost,
            optimal: false,
        }
    }

    /// Returns the selected subset indices, strictly increasing.
    #[inline]
    pub fn subset_indices(&self) -> &[usize] {
        &self.subset_indices
    }

    /// Returns whether the selection covers every element exactly once.
    #[inline]
    pub fn exactly_covered(&self) -> bool {
        self.exactly_covered
    }

    /// Returns the summed cost of the selection.
    #[inline]
    pub fn cost(&self) -> C {
        self.cost
    }

    /// Returns whether the selection is a proven minimum.
    #[inline]
    pub fn optimal(&self) -> bool {
        self.optimal
    }
}

impl<C> std::fmt::Display for Evaluation<C>
where
    C: SolverCost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.exactly_covered {
            return write!(f, "Evaluation(no exact cover)");
        }
        write!(
            f,
            "Evaluation(cost: {}, subsets: {:?}, optimal: {})",
            self.cost, self.subset_indices, self.optimal
        )
    }
}

/// Checks that a subset selection is an exact cover of the instance:
/// the selected subsets are pairwise disjoint and their union is the whole
/// universe. Indices that are out of range or repeated fail the check.
///
/// Solvers do not call this on their own results; it exists so tests and
/// distrustful callers can verify a returned evaluation independently.
pub fn verify_cover<C>(instance: &Instance<C>, subset_indices: &[usize]) -> bool
where
    C: SolverCost,
{
    let mut covered = FixedBitSet::with_capacity(instance.element_count());
    let mut selected = FixedBitSet::with_capacity(instance.num_subsets());

    for &subset_index in subset_indices {
        if subset_index >= instance.num_subsets() || selected.contains(subset_index) {
            return false;
        }
        selected.insert(subset_index);

        for &element in instance.subset(subset_index) {
            if covered.contains(element) {
                // Some element is covered twice.
                return false;
            }
            covered.insert(element);
        }
    }

    covered.count_ones(..) == instance.element_count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance() -> Instance<f64> {
        Instance::new(
            3,
            vec![vec![0, 1, 2], vec![0], vec![1], vec![1, 2], vec![0, 2]],
            vec![17.0, 5.0, 4.0, 3.0, 3.0],
        )
        .unwrap()
    }

    #[test]
    fn test_no_cover_is_the_zero_evaluation() {
        let evaluation = Evaluation::<f64>::no_cover();
        assert!(!evaluation.exactly_covered());
        assert!(!evaluation.optimal());
        assert_eq!(evaluation.cost(), 0.0);
        assert!(evaluation.subset_indices().is_empty());
    }

    #[test]
    fn test_trivial_is_optimal_and_covered() {
        let evaluation = Evaluation::<f64>::trivial();
        assert!(evaluation.exactly_covered());
        assert!(evaluation.optimal());
        assert_eq!(evaluation.cost(), 0.0);
    }

    #[test]
    fn test_proven_optimal_carries_indices_and_cost() {
        let evaluation = Evaluation::proven_optimal(vec![2, 4], 7.0f64);
        assert!(evaluation.optimal());
        assert!(evaluation.exactly_covered());
        assert_eq!(evaluation.subset_indices(), &[2, 4]);
        assert_eq!(evaluation.cost(), 7.0);
    }

    #[test]
    fn test_verify_cover_accepts_exact_covers() {
        let instance = instance();
        assert!(verify_cover(&instance, &[0]));
        assert!(verify_cover(&instance, &[2, 4]));
        assert!(verify_cover(&instance, &[1, 3]));
    }

    #[test]
    fn test_verify_cover_rejects_overlap_and_gaps() {
        let instance = instance();
        // Overlap: subsets 0 and 1 both contain element 0.
        assert!(!verify_cover(&instance, &[0, 1]));
        // Gap: element 2 is uncovered.
        assert!(!verify_cover(&instance, &[1, 2]));
        // Empty selection covers nothing.
        assert!(!verify_cover(&instance, &[]));
    }

    #[test]
    fn test_verify_cover_rejects_invalid_indices() {
        let instance = instance();
        assert!(!verify_cover(&instance, &[5]));
        assert!(!verify_cover(&instance, &[1, 1, 3]));
    }

    #[test]
    fn test_verify_cover_on_empty_instance() {
        let empty = Instance::<f64>::new(0, Vec::new(), Vec::new()).unwrap();
        assert!(verify_cover(&empty, &[]));
        assert!(!verify_cover(&empty, &[0]));
    }
}
