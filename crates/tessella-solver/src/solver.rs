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

//! # Solver Entry Points
//!
//! Thin wrappers that validate a raw `(element_count, subsets, costs)`
//! triple and dispatch to one of the two engines. Validation errors and
//! solver errors surface unchanged; the absence of an exact cover is not an
//! error and comes back as the zero evaluation.

use tessella_bnb::bnb::BnbSolver;
use tessella_bnb::error::SolveError;
use tessella_bnb::monitor::search_monitor::SearchMonitor;
use tessella_brute::BruteForceError;
use tessella_core::num::SolverCost;
use tessella_model::evaluation::Evaluation;
use tessella_model::instance::{Instance, InstanceError};

/// The error type for the solver entry points.
#[derive(Debug)]
pub enum SolverError {
    /// The input triple does not form a valid instance.
    Instance(InstanceError),
    /// The brute-force engine rejected the instance.
    BruteForce(BruteForceError),
    /// The branch-and-bound engine failed.
    Search(SolveError),
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Instance(e) => write!(f, "invalid instance: {e}"),
            Self::BruteForce(e) => write!(f, "brute force solver: {e}"),
            Self::Search(e) => write!(f, "branch and bound solver: {e}"),
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Instance(e) => Some(e),
            Self::BruteForce(e) => Some(e),
            Self::Search(e) => Some(e),
        }
    }
}

impl From<InstanceError> for SolverError {
    fn from(e: InstanceError) -> Self {
        Self::Instance(e)
    }
}

impl From<BruteForceError> for SolverError {
    fn from(e: BruteForceError) -> Self {
        Self::BruteForce(e)
    }
}

impl From<SolveError> for SolverError {
    fn from(e: SolveError) -> Self {
        Self::Search(e)
    }
}

/// Validates the triple and solves it exhaustively.
///
/// Only instances with at most 32 subsets are accepted. Returns the zero
/// evaluation with no error when no exact cover exists.
pub fn solve_by_brute_force<C>(
    element_count: usize,
    subsets: Vec<Vec<usize>>,
    costs: Vec<C>,
) -> Result<Evaluation<C>, SolverError>
where
    C: SolverCost,
{
    let instance = Instance::new(element_count, subsets, costs)?;
    Ok(tessella_brute::solve_by_brute_force(&instance)?)
}

/// Validates the triple and solves it with branch-and-bound.
///
/// Returns the zero evaluation with no error when no exact cover exists.
pub fn solve_by_branch_and_bound<C>(
    element_count: usize,
    subsets: Vec<Vec<usize>>,
    costs: Vec<C>,
) -> Result<Evaluation<C>, SolverError>
where
    C: SolverCost,
{
    let instance = Instance::new(element_count, subsets, costs)?;
    Ok(BnbSolver::new().solve(&instance)?.into_evaluation())
}

/// Like [`solve_by_branch_and_bound`], with a monitor observing the search.
///
/// If the monitor stops the search early the returned evaluation carries
/// the best incumbent found so far with `optimal = false`, or the zero
/// evaluation when none was found yet.
pub fn solve_by_branch_and_bound_with_monitor<C, M>(
    element_count: usize,
    subsets: Vec<Vec<usize>>,
    costs: Vec<C>,
    monitor: M,
) -> Result<Evaluation<C>, SolverError>
where
    C: SolverCost,
    M: SearchMonitor<C>,
{
    let instance = Instance::new(element_count, subsets, costs)?;
    Ok(BnbSolver::new()
        .solve_with_monitor(&instance, monitor)?
        .into_evaluation())
}
