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

//! # Lagrangian Dual Bounding
//!
//! Subgradient ascent on the Lagrangian dual of the set *covering*
//! relaxation (cover every element at least once). With decision variables
//! `x` in `{0, 1}^n` and multipliers `u >= 0`, the dual is
//!
//! ```text
//! max_{u >= 0} min_{x} c'x + u'(1 - Ax)
//! ```
//!
//! and for fixed `u` the inner minimum has the closed form `x_j = 1` iff
//! `(u'A)_j > c_j`. The ascent direction in `u` is the subgradient
//! `(1 - Ax)`, projected onto `u >= 0` after each step.
//!
//! The resulting dual objective is a valid lower bound for the covering
//! relaxation and therefore for the exact cover problem at the same
//! sub-instance. When the subgradient vanishes, the current `x` covers
//! every row exactly once and every multiplier has zero slack, so
//! complementary slackness holds: `x` is then a proven optimal *exact*
//! cover and the bound is tight.

use tessella_core::math::matrix::{ColMajorMatrix, MatrixError, RowMajorMatrix, SENTINEL};
use tessella_core::num::{cost_from_usize, SolverCost};

/// Iteration budget of one ascent run.
const MAX_ITERATIONS: usize = 1000;

/// The result of one subgradient ascent run.
#[derive(Debug, Clone, PartialEq)]
pub struct DualOutcome<C> {
    dual_objective: C,
    primal: Vec<usize>,
    proven_optimal_exact: bool,
    uncovered_row: Option<usize>,
}

impl<C> DualOutcome<C>
where
    C: SolverCost,
{
    /// Returns the Lagrangian dual objective, a lower bound on the optimal
    /// cost of the set-covering relaxation.
    #[inline]
    pub fn dual_objective(&self) -> C {
        self.dual_objective
    }

    /// Returns the candidate primal: the column indices with `x_j = 1`.
    /// Without [`Self::proven_optimal_exact`] it may be infeasible.
    #[inline]
    pub fn primal(&self) -> &[usize] {
        &self.primal
    }

    /// Whether the primal is a proven optimal exact cover of the matrix.
    /// In that case the dual objective equals the primal cost.
    #[inline]
    pub fn proven_optimal_exact(&self) -> bool {
        self.proven_optimal_exact
    }

    /// Returns a row the primal does not cover exactly once, if any.
    #[inline]
    pub fn uncovered_row(&self) -> Option<usize> {
        self.uncovered_row
    }
}

/// The initial step length: the mean per-element cost
/// `sum_j c_j / (nnz_j * n)` over all columns j, where `nnz_j` is the
/// number of elements in subset j.
fn mean_element_cost<C>(matrix: &ColMajorMatrix, costs: &[C]) -> C
where
    C: SolverCost,
{
    let num_columns = matrix.num_columns();
    let mut mean = C::zero();
    let mut column = 0usize;
    let mut nnz_in_column = 0usize;
    for &value in matrix.values() {
        if value == SENTINEL {
            debug_assert!(nnz_in_column > 0, "sub-instance subsets are never empty");
            mean = mean
                + costs[column] / (cost_from_usize::<C>(nnz_in_column) * cost_from_usize(num_columns));
            nnz_in_column = 0;
            column += 1;
        } else {
            nnz_in_column += 1;
        }
    }
    mean
}

/// Evaluates the dual objective `c'x + u'(1 - Ax)` for the current
/// iterates, collecting the primal support and checking complementary
/// slackness row by row. A row with zero slack is covered exactly once and
/// contributes nothing; any non-zero slack disproves optimality and is
/// reported as the uncovered row.
fn evaluate<C>(
    costs: &[C],
    x: &[C],
    row_matrix: &RowMajorMatrix,
    a_x: &mut [C],
    u: &[C],
) -> DualOutcome<C>
where
    C: SolverCost,
{
    let mut dual_objective = C::zero();
    let mut primal = Vec::new();
    for (column, &cost) in costs.iter().enumerate() {
        dual_objective = dual_objective + cost * x[column];
        if x[column] == C::one() {
            primal.push(column);
        }
    }

    let mut proven_optimal_exact = true;
    let mut uncovered_row = None;
    row_matrix.matrix_vector_multiply(x, a_x);
    for (row, &covered) in a_x.iter().enumerate() {
        let slack = C::one() - covered;
        dual_objective = dual_objective + u[row] * slack;
        if slack != C::zero() {
            proven_optimal_exact = false;
            uncovered_row = Some(row);
        }
    }

    DualOutcome {
        dual_objective,
        primal,
        proven_optimal_exact,
        uncovered_row,
    }
}

/// Runs subgradient ascent on the Lagrangian dual of the set-covering
/// relaxation given the column-major incidence matrix and one cost per
/// column.
///
/// Up to [`MAX_ITERATIONS`] iterations with step length
/// `initial / (1 + k)`, where `initial` is the mean per-element cost.
/// Terminates early when the subgradient vanishes (the current primal is an
/// exact cover and provenly optimal) or when a periodic status evaluation,
/// at geometrically spaced iterations, already proves optimality.
///
/// The work vectors `x`, `u`, `u'A` and `Ax` are allocated once per call
/// and reused across all iterations.
pub fn run_dual_ascent<C>(
    matrix: &ColMajorMatrix,
    costs: &[C],
) -> Result<DualOutcome<C>, MatrixError>
where
    C: SolverCost,
{
    let num_columns = matrix.num_columns();
    debug_assert_eq!(
        num_columns,
        costs.len(),
        "called `run_dual_ascent` with {} costs for {} columns",
        costs.len(),
        num_columns
    );

    let row_matrix = matrix.transpose()?;
    let num_rows = row_matrix.num_rows();

    let initial_step = mean_element_cost(matrix, costs);

    // The primal column vector, kept in the cost type since it multiplies
    // against costs and multipliers.
    let mut x = vec![C::zero(); num_columns];
    // The dual multiplier vector, u >= 0.
    let mut u = vec![C::zero(); num_rows];
    // Work storage for u'A and Ax.
    let mut u_a = vec![C::zero(); num_columns];
    let mut a_x = vec![C::zero(); num_rows];

    let mut next_status_check = 1usize;

    for k in 0..MAX_ITERATIONS {
        let step = initial_step / (C::one() + cost_from_usize(k));

        // Dual update first, primal second: that order leaves both iterates
        // consistent for the objective evaluation after the loop.
        //
        // Walk the rows once; each row's contribution is the number of
        // selected columns appearing in it, giving the subgradient
        // component (1 - contribution) without materializing Ax.
        let mut row = 0usize;
        let mut subgradient_zero = true;
        let mut contribution = C::zero();
        for &value in row_matrix.values() {
            if value != SENTINEL {
                if x[value as usize] == C::one() {
                    contribution = contribution + C::one();
                }
            } else {
                if contribution != C::one() {
                    subgradient_zero = false;
                }
                u[row] = u[row] + step * (C::one() - contribution);
                if u[row] < C::zero() {
                    u[row] = C::zero();
                }
                contribution = C::zero();
                row += 1;
            }
        }

        if subgradient_zero {
            // Every row is covered exactly once by x and complementary
            // slackness is met, so x is optimal for the exact problem.
            return Ok(evaluate(costs, &x, &row_matrix, &mut a_x, &u));
        }

        // Primal update: x minimizes c'x + u'(1 - Ax) = (c - u'A)x + u'1.
        matrix.vector_matrix_multiply(&u, &mut u_a);
        for column in 0..num_columns {
            x[column] = if u_a[column] > costs[column] {
                C::one()
            } else {
                C::zero()
            };
        }

        if k > next_status_check {
            next_status_check *= 2;
            let outcome = evaluate(costs, &x, &row_matrix, &mut a_x, &u);
            if outcome.proven_optimal_exact {
                return Ok(outcome);
            }
        }
    }

    Ok(evaluate(costs, &x, &row_matrix, &mut a_x, &u))
}

/// Computes just the set-covering lower bound of the given matrix and
/// costs, discarding the primal information.
pub fn covering_lower_bound<C>(matrix: &ColMajorMatrix, costs: &[C]) -> Result<C, MatrixError>
where
    C: SolverCost,
{
    Ok(run_dual_ascent(matrix, costs)?.dual_objective())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEN: u32 = SENTINEL;

    fn matrix(values: Vec<u32>) -> ColMajorMatrix {
        ColMajorMatrix::new(values).unwrap()
    }

    #[test]
    fn test_identity_matrix_is_proven_optimal() {
        // Three singleton subsets covering three elements: the only cover
        // selects all of them.
        let matrix = matrix(vec![0, SEN, 1, SEN, 2, SEN]);
        let costs = [2.0f64, 3.0, 4.0];

        let outcome = run_dual_ascent(&matrix, &costs).unwrap();
        assert!(outcome.proven_optimal_exact());
        assert_eq!(outcome.primal(), &[0, 1, 2]);
        assert!((outcome.dual_objective() - 9.0).abs() < 1e-9);
        assert_eq!(outcome.uncovered_row(), None);
    }

    #[test]
    fn test_single_full_subset_is_proven_optimal() {
        let matrix = matrix(vec![0, 1, 2, SEN]);
        let costs = [5.0f64];

        let outcome = run_dual_ascent(&matrix, &costs).unwrap();
        assert!(outcome.proven_optimal_exact());
        assert_eq!(outcome.primal(), &[0]);
        assert!((outcome.dual_objective() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_bound_never_exceeds_covering_optimum() {
        // Elements {0, 1, 2}; subsets [0, 1] (cost 2), [1, 2] (cost 2),
        // [2] (cost 1), [0] (cost 1). Optimal cover cost is 3.
        let matrix = matrix(vec![0, 1, SEN, 1, 2, SEN, 2, SEN, 0, SEN]);
        let costs = [2.0f64, 2.0, 1.0, 1.0];

        let bound = covering_lower_bound(&matrix, &costs).unwrap();
        assert!(
            bound <= 3.0 + 1e-9,
            "bound {} exceeds the covering optimum",
            bound
        );
    }

    #[test]
    fn test_proven_optimal_implies_cost_equals_objective() {
        // Two disjoint subsets partitioning four elements.
        let matrix = matrix(vec![0, 1, SEN, 2, 3, SEN]);
        let costs = [1.5f64, 2.5];

        let outcome = run_dual_ascent(&matrix, &costs).unwrap();
        if outcome.proven_optimal_exact() {
            let primal_cost: f64 = outcome.primal().iter().map(|&j| costs[j]).sum();
            assert!((primal_cost - outcome.dual_objective()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_unprovable_instance_reports_uncovered_row() {
        // Pairwise overlapping subsets with no exact cover: the engine can
        // never prove exact optimality here.
        let matrix = matrix(vec![0, 1, SEN, 1, 2, SEN, 0, 2, SEN]);
        let costs = [1.0f64, 1.0, 1.0];

        let outcome = run_dual_ascent(&matrix, &costs).unwrap();
        assert!(!outcome.proven_optimal_exact());
        assert!(outcome.uncovered_row().is_some());
    }

    #[test]
    fn test_mean_element_cost_rule() {
        // Columns: [0, 1] with cost 4 and [2] with cost 3.
        // mean = 4 / (2 * 2) + 3 / (1 * 2) = 1 + 1.5
        let matrix = matrix(vec![0, 1, SEN, 2, SEN]);
        let costs = [4.0f64, 3.0];
        assert!((mean_element_cost(&matrix, &costs) - 2.5).abs() < 1e-12);
    }
}
