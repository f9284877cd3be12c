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

use crate::stats::BnbStatistics;
use tessella_core::num::SolverCost;
use tessella_model::evaluation::Evaluation;

/// Why the search loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The queue drained; the evaluation is conclusive (a proven optimum
    /// or a proof that no exact cover exists).
    Completed,
    /// A monitor terminated the search; the evaluation holds the incumbent
    /// found so far without an optimality claim.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "Completed"),
            Self::Aborted(reason) => write!(f, "Aborted: {reason}"),
        }
    }
}

/// The full outcome of a branch-and-bound solve.
#[derive(Debug, Clone)]
pub struct BnbOutcome<C> {
    evaluation: Evaluation<C>,
    termination_reason: TerminationReason,
    statistics: BnbStatistics,
}

impl<C> BnbOutcome<C>
where
    C: SolverCost,
{
    /// An outcome of a run driven to completion.
    #[inline]
    pub fn completed(evaluation: Evaluation<C>, statistics: BnbStatistics) -> Self {
        Self {
            evaluation,
            termination_reason: TerminationReason::Completed,
            statistics,
        }
    }

    /// An outcome of a run a monitor stopped early.
    #[inline]
    pub fn aborted<R>(evaluation: Evaluation<C>, reason: R, statistics: BnbStatistics) -> Self
    where
        R: Into<String>,
    {
        Self {
            evaluation,
            termination_reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    /// Returns the evaluation.
    #[inline]
    pub fn evaluation(&self) -> &Evaluation<C> {
        &self.evaluation
    }

    /// Consumes the outcome, returning just the evaluation.
    #[inline]
    pub fn into_evaluation(self) -> Evaluation<C> {
        self.evaluation
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns the solve statistics.
    #[inline]
    pub fn statistics(&self) -> &BnbStatistics {
        &self.statistics
    }
}

impl<C> std::fmt::Display for BnbOutcome<C>
where
    C: SolverCost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Outcome({}, {}, {})",
            self.termination_reason, self.evaluation, self.statistics
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_outcome_keeps_evaluation() {
        let outcome = BnbOutcome::completed(
            Evaluation::proven_optimal(vec![0, 2], 3.5f64),
            BnbStatistics::default(),
        );
        assert_eq!(outcome.termination_reason(), &TerminationReason::Completed);
        assert!(outcome.evaluation().optimal());
        assert_eq!(outcome.into_evaluation().subset_indices(), &[0, 2]);
    }

    #[test]
    fn test_aborted_outcome_keeps_reason() {
        let outcome =
            BnbOutcome::aborted(Evaluation::<f64>::no_cover(), "time limit", BnbStatistics::default());
        match outcome.termination_reason() {
            TerminationReason::Aborted(reason) => assert_eq!(reason, "time limit"),
            other => panic!("expected Aborted, got {other}"),
        }
    }
}
