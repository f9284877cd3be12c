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

//! # Sub-Instance Construction and Branching
//!
//! Applying a node's branching constraint together with those of its
//! ancestors filters the duplicate-reduced subset family down to the
//! sub-instance that node represents. The scan also classifies the
//! sub-instance on the fly: an element no kept subset covers makes it
//! infeasible, and a sub-instance whose kept subsets cover every element
//! exactly once *is* a solution and needs no further bounding.
//!
//! Branching pairs are picked from the element incidence of the
//! sub-instance: the most-covered element `i`, and the smallest element `j`
//! in the symmetric difference of the first two subsets covering `i`. Those
//! two subsets then necessarily land in different children.

use crate::error::SolveError;
use crate::reduce::ReducedInstance;
use crate::tree::{Node, NodeKind};
use smallvec::SmallVec;
use std::collections::HashSet;
use tessella_core::math::matrix::{ColMajorMatrix, MatrixError, SENTINEL};
use tessella_core::num::SolverCost;

/// One branching constraint collected from an ancestor chain.
#[derive(Debug, Clone, Copy)]
struct BranchConstraint {
    i: u32,
    j: u32,
    both: bool,
}

/// An element pair to branch on, with `i < j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchingPair {
    /// The most-covered element of the sub-instance.
    pub i: u32,
    /// An element separating the first two subsets that cover `i`.
    pub j: u32,
}

/// The sub-instance a search node represents.
///
/// Subset storage is borrowed from the root instance; only costs and the
/// local index map are materialized per node.
#[derive(Debug)]
pub struct SubInstance<'a, C> {
    element_count: usize,
    subsets: Vec<&'a [usize]>,
    costs: Vec<C>,
    /// `reduced_indices[local] == index into the duplicate-reduced instance`.
    reduced_indices: Vec<usize>,
    is_solution: bool,
}

impl<'a, C> SubInstance<'a, C>
where
    C: SolverCost,
{
    /// Builds the sub-instance implied by `node` and its ancestors, keeping
    /// exactly the subsets that satisfy every branching constraint.
    ///
    /// Returns `Ok(None)` if some element cannot be covered by any kept
    /// subset (the node is infeasible). Fails if the ancestor chain
    /// constrains the same unordered element pair twice.
    pub fn for_node(
        reduced: &ReducedInstance<'a, C>,
        node: &Node<C>,
    ) -> Result<Option<Self>, SolveError> {
        let mut constraints: Vec<BranchConstraint> = Vec::new();
        let mut branched_pairs: HashSet<(u32, u32)> = HashSet::new();

        let mut current = node;
        while current.kind() != NodeKind::Root {
            let (i, j) = (current.i(), current.j());
            debug_assert!(i < j, "nodes are created with i < j");
            if !branched_pairs.insert((i, j)) {
                return Err(SolveError::DuplicateBranchingPair { i, j });
            }
            constraints.push(BranchConstraint {
                i,
                j,
                both: current.kind() == NodeKind::Both,
            });
            current = current
                .parent()
                .expect("non-root nodes always have a parent");
        }

        let mut subsets: Vec<&'a [usize]> = Vec::with_capacity(reduced.num_subsets());
        let mut costs: Vec<C> = Vec::with_capacity(reduced.num_subsets());
        let mut reduced_indices: Vec<usize> = Vec::with_capacity(reduced.num_subsets());
        let mut cover_counts = vec![0usize; reduced.element_count()];

        for (reduced_index, &subset) in reduced.subsets().iter().enumerate() {
            let satisfies_all = constraints.iter().all(|constraint| {
                let has_i = subset.binary_search(&(constraint.i as usize)).is_ok();
                let has_j = subset.binary_search(&(constraint.j as usize)).is_ok();
                if constraint.both {
                    has_i == has_j
                } else {
                    !(has_i && has_j)
                }
            });
            if !satisfies_all {
                continue;
            }

            subsets.push(subset);
            costs.push(reduced.costs()[reduced_index]);
            reduced_indices.push(reduced_index);
            for &element in subset {
                cover_counts[element] += 1;
            }
        }

        let mut is_solution = true;
        for &count in &cover_counts {
            if count == 0 {
                return Ok(None);
            }
            if count > 1 {
                is_solution = false;
            }
        }

        Ok(Some(Self {
            element_count: reduced.element_count(),
            subsets,
            costs,
            reduced_indices,
            is_solution,
        }))
    }

    /// Returns the number of elements in the universe.
    #[inline]
    pub fn element_count(&self) -> usize {
        self.element_count
    }

    /// Returns the kept subsets.
    #[inline]
    pub fn subsets(&self) -> &[&'a [usize]] {
        &self.subsets
    }

    /// Returns the kept costs, parallel to `subsets`.
    #[inline]
    pub fn costs(&self) -> &[C] {
        &self.costs
    }

    /// Maps a local subset index to the duplicate-reduced numbering.
    #[inline]
    pub fn reduced_index(&self, local_index: usize) -> usize {
        self.reduced_indices[local_index]
    }

    /// Returns the local-to-reduced index map.
    #[inline]
    pub fn reduced_indices(&self) -> &[usize] {
        &self.reduced_indices
    }

    /// Whether the kept subsets cover every element exactly once, making
    /// the sub-instance its own solution.
    #[inline]
    pub fn is_solution(&self) -> bool {
        self.is_solution
    }

    /// Sums the kept costs.
    #[inline]
    pub fn total_cost(&self) -> C {
        self.costs
            .iter()
            .fold(C::zero(), |total, &cost| total + cost)
    }

    /// Builds the column-major incidence matrix of the kept subsets, one
    /// column per subset holding its element indices.
    pub fn to_matrix(&self) -> Result<ColMajorMatrix, MatrixError> {
        let capacity = self
            .subsets
            .iter()
            .map(|subset| subset.len() + 1)
            .sum::<usize>();
        let mut values = Vec::with_capacity(capacity);
        for subset in &self.subsets {
            for &element in *subset {
                values.push(element as u32);
            }
            values.push(SENTINEL);
        }
        ColMajorMatrix::new(values)
    }
}

/// The symmetric difference of two sorted element slices as a merge walk.
/// The result is sorted ascending.
fn symmetric_difference(x: &[usize], y: &[usize]) -> SmallVec<[usize; 8]> {
    let mut difference = SmallVec::new();
    let mut xi = 0;
    let mut yi = 0;
    while xi < x.len() && yi < y.len() {
        match x[xi].cmp(&y[yi]) {
            std::cmp::Ordering::Less => {
                difference.push(x[xi]);
                xi += 1;
            }
            std::cmp::Ordering::Greater => {
                difference.push(y[yi]);
                yi += 1;
            }
            std::cmp::Ordering::Equal => {
                xi += 1;
                yi += 1;
            }
        }
    }
    difference.extend_from_slice(&x[xi..]);
    difference.extend_from_slice(&y[yi..]);
    difference
}

/// Finds an element pair `(i, j)`, `i < j`, that splits the sub-instance:
/// some kept subset contains exactly one of the two elements, and some
/// kept subsets contain `i` together.
///
/// `i` is the element covered by the most subsets (the first such element on
/// ties) and `j` the smallest element in the symmetric difference of the
/// first two subsets covering `i`. Both the both-branch and the diff-branch
/// child then exclude at least one of those two subsets, so the search space
/// genuinely splits.
///
/// Fails with [`SolveError::BranchingImpossible`] if no element is covered
/// twice, which can only happen when the caller branches on an infeasible or
/// already-solved sub-instance.
pub fn find_branching_pair<C>(sub: &SubInstance<'_, C>) -> Result<BranchingPair, SolveError>
where
    C: SolverCost,
{
    let mut counts = vec![0usize; sub.element_count()];
    for subset in sub.subsets() {
        for &element in *subset {
            counts[element] += 1;
        }
    }

    let mut most_covered = 0usize;
    for (element, &count) in counts.iter().enumerate() {
        if counts[most_covered] < count {
            most_covered = element;
        }
    }

    if counts.get(most_covered).copied().unwrap_or(0) <= 1 {
        return Err(SolveError::BranchingImpossible);
    }

    let mut covering = sub
        .subsets()
        .iter()
        .filter(|subset| subset.binary_search(&most_covered).is_ok());
    let first = covering.next().expect("count says two subsets cover i");
    let second = covering.next().expect("count says two subsets cover i");

    let difference = symmetric_difference(first, second);
    if difference.is_empty() {
        // Duplicates were removed up front, so two covering subsets can
        // only be identical if the search state is corrupted.
        return Err(SolveError::BranchingImpossible);
    }

    let i = most_covered as u32;
    let j = difference[0] as u32;
    Ok(if i < j {
        BranchingPair { i, j }
    } else {
        BranchingPair { i: j, j: i }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessella_model::instance::Instance;

    fn reduced(instance: &Instance<f64>) -> ReducedInstance<'_, f64> {
        ReducedInstance::from_instance(instance)
    }

    #[test]
    fn test_root_sub_instance_keeps_everything() {
        let instance = Instance::new(
            3,
            vec![vec![0, 1], vec![1, 2], vec![0, 2]],
            vec![1.0, 1.0, 1.0],
        )
        .unwrap();
        let reduced = reduced(&instance);
        let root = Node::<f64>::root();

        let sub = SubInstance::for_node(&reduced, &root).unwrap().unwrap();
        assert_eq!(sub.subsets().len(), 3);
        assert!(!sub.is_solution());
        assert_eq!(sub.total_cost(), 3.0);
    }

    #[test]
    fn test_both_branch_filters_mixed_subsets() {
        let instance = Instance::new(
            3,
            vec![vec![0, 1], vec![0], vec![1], vec![2]],
            vec![1.0, 1.0, 1.0, 1.0],
        )
        .unwrap();
        let reduced = reduced(&instance);
        let root = Node::<f64>::root();
        let (both, diff) = root.branch(1.0, 0, 1).unwrap();

        // Both branch: subsets containing exactly one of {0, 1} are dropped.
        let sub = SubInstance::for_node(&reduced, &both).unwrap().unwrap();
        let kept: Vec<&[usize]> = sub.subsets().to_vec();
        assert_eq!(kept, vec![&[0, 1][..], &[2][..]]);
        assert!(sub.is_solution());

        // Diff branch: [0, 1] is dropped, the singletons stay.
        let sub = SubInstance::for_node(&reduced, &diff).unwrap().unwrap();
        let kept: Vec<&[usize]> = sub.subsets().to_vec();
        assert_eq!(kept, vec![&[0][..], &[1][..], &[2][..]]);
        assert!(sub.is_solution());
    }

    #[test]
    fn test_uncoverable_element_is_infeasible() {
        let instance = Instance::new(
            2,
            vec![vec![0, 1], vec![0]],
            vec![1.0, 1.0],
        )
        .unwrap();
        let reduced = reduced(&instance);
        let root = Node::<f64>::root();
        // Diff branch on (0, 1) drops [0, 1]; element 1 becomes uncoverable.
        let (_, diff) = root.branch(1.0, 0, 1).unwrap();

        assert!(SubInstance::for_node(&reduced, &diff).unwrap().is_none());
    }

    #[test]
    fn test_repeated_pair_in_ancestor_chain_is_rejected() {
        let instance = Instance::new(
            3,
            vec![vec![0, 1], vec![1, 2], vec![0, 2]],
            vec![1.0, 1.0, 1.0],
        )
        .unwrap();
        let reduced = reduced(&instance);
        let root = Node::<f64>::root();
        let (both, _) = root.branch(1.0, 0, 1).unwrap();
        let (again, _) = both.branch(2.0, 0, 1).unwrap();

        assert_eq!(
            SubInstance::for_node(&reduced, &again).unwrap_err(),
            SolveError::DuplicateBranchingPair { i: 0, j: 1 }
        );
    }

    #[test]
    fn test_sub_instance_matrix_layout() {
        let instance = Instance::new(
            3,
            vec![vec![0, 1], vec![2]],
            vec![1.0, 1.0],
        )
        .unwrap();
        let reduced = reduced(&instance);
        let root = Node::<f64>::root();
        let sub = SubInstance::for_node(&reduced, &root).unwrap().unwrap();

        let matrix = sub.to_matrix().unwrap();
        assert_eq!(matrix.values(), &[0, 1, SENTINEL, 2, SENTINEL]);
    }

    #[test]
    fn test_symmetric_difference_is_sorted() {
        assert_eq!(
            symmetric_difference(&[0, 1, 4], &[1, 2, 5]).as_slice(),
            &[0, 2, 4, 5]
        );
        assert_eq!(symmetric_difference(&[1, 2], &[1, 2]).as_slice(), &[] as &[usize]);
        assert_eq!(symmetric_difference(&[], &[3]).as_slice(), &[3]);
    }

    #[test]
    fn test_branching_pair_splits_the_two_covering_subsets() {
        // Element 1 is covered most often (by [0, 1] and [1, 2]).
        let instance = Instance::new(
            3,
            vec![vec![0, 1], vec![1, 2], vec![2]],
            vec![1.0, 1.0, 1.0],
        )
        .unwrap();
        let reduced = reduced(&instance);
        let root = Node::<f64>::root();
        let sub = SubInstance::for_node(&reduced, &root).unwrap().unwrap();

        let pair = find_branching_pair(&sub).unwrap();
        assert!(pair.i < pair.j);
        // The two covering subsets must satisfy the both-branch predicate
        // differently, otherwise branching would not split them.
        let both_branch_keeps = |subset: &[usize]| {
            let has_i = subset.binary_search(&(pair.i as usize)).is_ok();
            let has_j = subset.binary_search(&(pair.j as usize)).is_ok();
            has_i == has_j
        };
        assert_ne!(both_branch_keeps(&[0, 1]), both_branch_keeps(&[1, 2]));
    }

    #[test]
    fn test_branching_on_solution_sub_instance_fails() {
        let instance = Instance::new(
            2,
            vec![vec![0], vec![1]],
            vec![1.0, 1.0],
        )
        .unwrap();
        let reduced = reduced(&instance);
        let root = Node::<f64>::root();
        let sub = SubInstance::for_node(&reduced, &root).unwrap().unwrap();
        assert!(sub.is_solution());

        assert_eq!(
            find_branching_pair(&sub).unwrap_err(),
            SolveError::BranchingImpossible
        );
    }
}
