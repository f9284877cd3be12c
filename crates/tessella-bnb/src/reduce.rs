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

//! # Duplicate Subset Reduction
//!
//! Before the search starts, duplicate subsets are collapsed to their
//! cheapest representative. A more expensive duplicate can never be part of
//! an optimum, and the branching rule relies on sub-instance subsets being
//! unique (it derives the branching pair from the symmetric difference of
//! two covering subsets, which must not be empty).
//!
//! The reduction borrows subset storage from the instance instead of
//! cloning it; only the ordering, the cost vector and the index map are
//! materialized.

use std::cmp::Ordering;
use tessella_core::num::SolverCost;
use tessella_model::instance::Instance;

/// A duplicate-free view of an instance, with a map back to the caller's
/// subset numbering.
#[derive(Debug, Clone)]
pub struct ReducedInstance<'a, C> {
    element_count: usize,
    subsets: Vec<&'a [usize]>,
    costs: Vec<C>,
    /// `original_indices[reduced] == index in the caller's instance`.
    original_indices: Vec<usize>,
}

impl<'a, C> ReducedInstance<'a, C>
where
    C: SolverCost,
{
    /// Builds the duplicate-free view of `instance`.
    ///
    /// Subsets are ordered by their element tuple with ties broken by cost,
    /// and only the cheapest subset of each identical group is kept. Among
    /// equally cheap duplicates the one with the smallest original index
    /// survives (the sort is stable).
    pub fn from_instance(instance: &'a Instance<C>) -> Self {
        let mut order: Vec<usize> = (0..instance.num_subsets()).collect();
        order.sort_by(|&a, &b| {
            instance
                .subset(a)
                .cmp(instance.subset(b))
                .then_with(|| {
                    instance
                        .cost(a)
                        .partial_cmp(&instance.cost(b))
                        .unwrap_or(Ordering::Equal)
                })
        });

        let mut subsets: Vec<&'a [usize]> = Vec::with_capacity(order.len());
        let mut costs: Vec<C> = Vec::with_capacity(order.len());
        let mut original_indices: Vec<usize> = Vec::with_capacity(order.len());

        let mut position = 0;
        while position < order.len() {
            let original = order[position];
            let subset = instance.subset(original);
            subsets.push(subset);
            costs.push(instance.cost(original));
            original_indices.push(original);

            position += 1;
            while position < order.len() && instance.subset(order[position]) == subset {
                position += 1;
            }
        }

        Self {
            element_count: instance.element_count(),
            subsets,
            costs,
            original_indices,
        }
    }

    /// Returns the number of elements in the universe.
    #[inline]
    pub fn element_count(&self) -> usize {
        self.element_count
    }

    /// Returns the number of kept subsets.
    #[inline]
    pub fn num_subsets(&self) -> usize {
        self.subsets.len()
    }

    /// Returns the kept subsets, ordered by element tuple.
    #[inline]
    pub fn subsets(&self) -> &[&'a [usize]] {
        &self.subsets
    }

    /// Returns the kept costs, parallel to `subsets`.
    #[inline]
    pub fn costs(&self) -> &[C] {
        &self.costs
    }

    /// Maps a reduced subset index back to the caller's numbering.
    ///
    /// # Panics
    ///
    /// Panics if `reduced_index` is out of bounds.
    #[inline]
    pub fn original_index(&self, reduced_index: usize) -> usize {
        self.original_indices[reduced_index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_cheapest_duplicate() {
        // Subsets 1 and 3 are identical; 3 is cheaper.
        let instance = Instance::new(
            2,
            vec![vec![0, 1], vec![0], vec![1], vec![0]],
            vec![17.0f64, 7.0, 5.0, 3.0],
        )
        .unwrap();
        let reduced = ReducedInstance::from_instance(&instance);

        assert_eq!(reduced.num_subsets(), 3);
        for (position, subset) in reduced.subsets().iter().enumerate() {
            if *subset == [0] {
                assert_eq!(reduced.costs()[position], 3.0);
                assert_eq!(reduced.original_index(position), 3);
            }
        }
    }

    #[test]
    fn test_orders_by_element_tuple() {
        let instance = Instance::new(
            3,
            vec![vec![2], vec![0, 1], vec![0], vec![1, 2]],
            vec![1.0f64, 1.0, 1.0, 1.0],
        )
        .unwrap();
        let reduced = ReducedInstance::from_instance(&instance);

        let subsets: Vec<&[usize]> = reduced.subsets().to_vec();
        assert_eq!(
            subsets,
            vec![&[0][..], &[0, 1][..], &[1, 2][..], &[2][..]]
        );
        // The index map points back at the caller's numbering.
        assert_eq!(reduced.original_index(0), 2);
        assert_eq!(reduced.original_index(3), 0);
    }

    #[test]
    fn test_no_duplicates_is_identity_up_to_order() {
        let instance = Instance::new(
            3,
            vec![vec![0], vec![1], vec![2]],
            vec![1.0f64, 2.0, 3.0],
        )
        .unwrap();
        let reduced = ReducedInstance::from_instance(&instance);
        assert_eq!(reduced.num_subsets(), 3);

        // Every original index appears exactly once.
        let mut seen: Vec<usize> = (0..3).map(|i| reduced.original_index(i)).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2]);
    }
}
