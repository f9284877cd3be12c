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

//! # Weighted Exact Cover Instance
//!
//! A validated problem instance: `element_count` elements indexed
//! `0..element_count`, a family of subsets over those elements, and one
//! strictly positive cost per subset. Construction checks every shape
//! invariant eagerly and reports the offending index, so downstream solvers
//! can rely on sortedness and positivity without re-checking.

use tessella_core::num::SolverCost;

/// The error type for instance validation.
///
/// Every variant names the index it refers to, so callers can point users
/// at the exact offending subset or cost.
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceError {
    /// The universe is empty but subsets or costs were supplied.
    EmptyInstanceHasContent {
        /// Number of subsets supplied.
        num_subsets: usize,
        /// Number of costs supplied.
        num_costs: usize,
    },
    /// A subset contains no elements.
    EmptySubset {
        /// Index of the empty subset.
        subset_index: usize,
    },
    /// A subset references an element outside `0..element_count`.
    ElementOutOfRange {
        /// Index of the offending subset.
        subset_index: usize,
        /// The out-of-range element.
        element: usize,
        /// The universe size the element was checked against.
        element_count: usize,
    },
    /// A subset is not strictly increasing (unsorted or duplicate entries).
    SubsetNotSorted {
        /// Index of the offending subset.
        subset_index: usize,
    },
    /// The number of costs differs from the number of subsets.
    CostCountMismatch {
        /// Number of subsets supplied.
        num_subsets: usize,
        /// Number of costs supplied.
        num_costs: usize,
    },
    /// A cost is zero, negative or not a number.
    NonPositiveCost {
        /// Index of the offending cost.
        cost_index: usize,
        /// The offending cost, widened to `f64` for reporting.
        cost: f64,
    },
}

impl std::fmt::Display for InstanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInstanceHasContent {
                num_subsets,
                num_costs,
            } => write!(
                f,
                "an instance with no elements must have no subsets and no costs, \
                 but {} subsets and {} costs were supplied",
                num_subsets, num_costs
            ),
            Self::EmptySubset { subset_index } => write!(
                f,
                "subset {} is empty, empty subsets are not allowed",
                subset_index
            ),
            Self::ElementOutOfRange {
                subset_index,
                element,
                element_count,
            } => write!(
                f,
                "subset {} contains element {} which is not a member of [0, {})",
                subset_index, element, element_count
            ),
            Self::SubsetNotSorted { subset_index } => write!(
                f,
                "subset {} is not sorted strictly increasing (unsorted or duplicate elements)",
                subset_index
            ),
            Self::CostCountMismatch {
                num_subsets,
                num_costs,
            } => write!(
                f,
                "there must be exactly one cost per subset, but {} subsets and {} costs were supplied",
                num_subsets, num_costs
            ),
            Self::NonPositiveCost { cost_index, cost } => write!(
                f,
                "cost {} at index {} is invalid, only strictly positive costs are supported",
                cost, cost_index
            ),
        }
    }
}

impl std::error::Error for InstanceError {}

/// A validated weighted exact cover instance.
///
/// Invariants guaranteed after construction:
///
/// * every subset is non-empty and strictly increasing,
/// * every element index lies in `0..element_count`,
/// * there is exactly one cost per subset and every cost is strictly
///   positive and finite enough to compare (`cost > 0` holds).
///
/// The instance is immutable; solvers derive filtered views from it rather
/// than changing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance<C> {
    /// Number of elements in the universe, indexed `0..element_count`.
    element_count: usize,
    /// The subset family. Inner vectors are strictly increasing.
    subsets: Vec<Vec<usize>>,
    /// One strictly positive cost per subset.
    costs: Vec<C>,
}

impl<C> Instance<C>
where
    C: SolverCost,
{
    /// Constructs a validated instance.
    ///
    /// Checks, in order: an empty universe admits no content; no subset is
    /// empty; every element is in range; every subset is strictly
    /// increasing; subset and cost counts match; every cost is strictly
    /// positive (NaN costs are rejected by the same comparison).
    pub fn new(
        element_count: usize,
        subsets: Vec<Vec<usize>>,
        costs: Vec<C>,
    ) -> Result<Self, InstanceError> {
        if element_count == 0 {
            if !subsets.is_empty() || !costs.is_empty() {
                return Err(InstanceError::EmptyInstanceHasContent {
                    num_subsets: subsets.len(),
                    num_costs: costs.len(),
                });
            }
            return Ok(Self {
                element_count: 0,
                subsets,
                costs,
            });
        }

        for (subset_index, subset) in subsets.iter().enumerate() {
            if subset.is_empty() {
                return Err(InstanceError::EmptySubset { subset_index });
            }

            for &element in subset {
                if element >= element_count {
                    return Err(InstanceError::ElementOutOfRange {
                        subset_index,
                        element,
                        element_count,
                    });
                }
            }

            let strictly_increasing = subset.windows(2).all(|pair| pair[0] < pair[1]);
            if !strictly_increasing {
                return Err(InstanceError::SubsetNotSorted { subset_index });
            }
        }

        if subsets.len() != costs.len() {
            return Err(InstanceError::CostCountMismatch {
                num_subsets: subsets.len(),
                num_costs: costs.len(),
            });
        }

        for (cost_index, &cost) in costs.iter().enumerate() {
            if !(cost > C::zero()) {
                return Err(InstanceError::NonPositiveCost {
                    cost_index,
                    cost: cost.to_f64().unwrap_or(f64::NAN),
                });
            }
        }

        Ok(Self {
            element_count,
            subsets,
            costs,
        })
    }

    /// Returns the number of elements in the universe.
    #[inline]
    pub fn element_count(&self) -> usize {
        self.element_count
    }

    /// Returns the number of subsets.
    #[inline]
    pub fn num_subsets(&self) -> usize {
        self.subsets.len()
    }

    /// Returns the subset family.
    #[inline]
    pub fn subsets(&self) -> &[Vec<usize>] {
        &self.subsets
    }

    /// Returns a single subset as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `subset_index` is out of bounds.
    #[inline]
    pub fn subset(&self, subset_index: usize) -> &[usize] {
        &self.subsets[subset_index]
    }

    /// Returns the cost vector.
    #[inline]
    pub fn costs(&self) -> &[C] {
        &self.costs
    }

    /// Returns the cost of a single subset.
    ///
    /// # Panics
    ///
    /// Panics if `subset_index` is out of bounds.
    #[inline]
    pub fn cost(&self, subset_index: usize) -> C {
        self.costs[subset_index]
    }
}

impl<C> std::fmt::Display for Instance<C>
where
    C: SolverCost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Instance(elements: {}, subsets: {})",
            self.element_count,
            self.subsets.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_instance_is_accepted() {
        let instance =
            Instance::new(3, vec![vec![0, 1], vec![2]], vec![1.0f64, 2.0]).unwrap();
        assert_eq!(instance.element_count(), 3);
        assert_eq!(instance.num_subsets(), 2);
        assert_eq!(instance.subset(0), &[0, 1]);
        assert_eq!(instance.cost(1), 2.0);
    }

    #[test]
    fn test_empty_instance_is_accepted() {
        let instance = Instance::<f64>::new(0, Vec::new(), Vec::new()).unwrap();
        assert_eq!(instance.element_count(), 0);
        assert_eq!(instance.num_subsets(), 0);
    }

    #[test]
    fn test_empty_instance_with_content_is_rejected() {
        let err = Instance::new(0, vec![vec![0]], vec![1.0f64]).unwrap_err();
        assert_eq!(
            err,
            InstanceError::EmptyInstanceHasContent {
                num_subsets: 1,
                num_costs: 1
            }
        );
    }

    #[test]
    fn test_empty_subset_is_rejected() {
        let err = Instance::new(2, vec![vec![0], vec![]], vec![1.0f64, 1.0]).unwrap_err();
        assert_eq!(err, InstanceError::EmptySubset { subset_index: 1 });
    }

    #[test]
    fn test_element_out_of_range_is_rejected() {
        let err = Instance::new(2, vec![vec![0, 2]], vec![1.0f64]).unwrap_err();
        assert_eq!(
            err,
            InstanceError::ElementOutOfRange {
                subset_index: 0,
                element: 2,
                element_count: 2
            }
        );
    }

    #[test]
    fn test_unsorted_subset_is_rejected() {
        let err = Instance::new(3, vec![vec![1, 0]], vec![1.0f64]).unwrap_err();
        assert_eq!(err, InstanceError::SubsetNotSorted { subset_index: 0 });
    }

    #[test]
    fn test_duplicate_elements_are_rejected() {
        let err = Instance::new(3, vec![vec![1, 1]], vec![1.0f64]).unwrap_err();
        assert_eq!(err, InstanceError::SubsetNotSorted { subset_index: 0 });
    }

    #[test]
    fn test_cost_count_mismatch_is_rejected() {
        let err = Instance::new(2, vec![vec![0]], vec![1.0f64, 2.0]).unwrap_err();
        assert_eq!(
            err,
            InstanceError::CostCountMismatch {
                num_subsets: 1,
                num_costs: 2
            }
        );
    }

    #[test]
    fn test_non_positive_costs_are_rejected() {
        let err = Instance::new(1, vec![vec![0]], vec![0.0f64]).unwrap_err();
        assert_eq!(
            err,
            InstanceError::NonPositiveCost {
                cost_index: 0,
                cost: 0.0
            }
        );

        let err = Instance::new(1, vec![vec![0]], vec![-1.5f64]).unwrap_err();
        assert_eq!(
            err,
            InstanceError::NonPositiveCost {
                cost_index: 0,
                cost: -1.5
            }
        );
    }

    #[test]
    fn test_nan_cost_is_rejected() {
        let err = Instance::new(1, vec![vec![0]], vec![f64::NAN]).unwrap_err();
        assert!(matches!(
            err,
            InstanceError::NonPositiveCost { cost_index: 0, .. }
        ));
    }

    #[test]
    fn test_error_messages_name_the_offending_index() {
        let err = Instance::new(2, vec![vec![0], vec![1, 0]], vec![1.0f64, 1.0]).unwrap_err();
        assert!(err.to_string().contains("subset 1"));
    }
}
