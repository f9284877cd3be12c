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

//! # Branch-and-Bound Driver
//!
//! Best-first exploration of the constraint tree. Each popped node is
//! turned into its sub-instance; infeasible nodes are discarded, solved
//! nodes update the incumbent directly, and everything else is bounded by
//! the Lagrangian dual engine and either pruned, closed as optimal, or
//! branched on an element pair into a both-child and a diff-child.
//!
//! The search terminates when the queue drains: the incumbent is then a
//! proven optimum, or its absence proves that no exact cover exists. A
//! monitor may stop the loop early, in which case the incumbent is returned
//! without the optimality claim.

use crate::dual::run_dual_ascent;
use crate::error::SolveError;
use crate::monitor::no_op::NoOpMonitor;
use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use crate::queue::NodeQueue;
use crate::reduce::ReducedInstance;
use crate::result::{BnbOutcome, TerminationReason};
use crate::stats::BnbStatistics;
use crate::subinstance::{find_branching_pair, SubInstance};
use crate::tree::Node;
use std::rc::Rc;
use tessella_core::num::SolverCost;
use tessella_model::evaluation::Evaluation;
use tessella_model::instance::Instance;

/// A branch-and-bound solver for the weighted exact cover problem.
///
/// The solver itself is stateless between calls; every `solve` builds a
/// fresh search session. It exists as a type so callers can hold a solver
/// and configure monitored runs against it.
#[derive(Debug, Clone, Copy, Default)]
pub struct BnbSolver;

impl BnbSolver {
    /// Creates a new solver.
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Solves the instance to proven optimality.
    ///
    /// Returns a completed outcome whose evaluation is either a proven
    /// minimum-cost exact cover or the zero evaluation when no exact cover
    /// exists.
    pub fn solve<C>(&mut self, instance: &Instance<C>) -> Result<BnbOutcome<C>, SolveError>
    where
        C: SolverCost,
    {
        self.solve_with_monitor(instance, NoOpMonitor::new())
    }

    /// Solves the instance under the given monitor.
    ///
    /// The monitor observes the search and may stop it between popped
    /// nodes; a stopped search yields an aborted outcome carrying the best
    /// incumbent found so far with `optimal = false`.
    pub fn solve_with_monitor<C, M>(
        &mut self,
        instance: &Instance<C>,
        mut monitor: M,
    ) -> Result<BnbOutcome<C>, SolveError>
    where
        C: SolverCost,
        M: SearchMonitor<C>,
    {
        if instance.element_count() == 0 {
            return Ok(BnbOutcome::completed(
                Evaluation::trivial(),
                BnbStatistics::default(),
            ));
        }

        SearchSession::new(instance, &mut monitor).run()
    }
}

/// The best exact cover found so far, in reduced-instance numbering.
#[derive(Debug, Clone)]
struct Incumbent<C> {
    cost: C,
    reduced_indices: Vec<usize>,
}

/// One search run: the reduced instance, the node queue, the incumbent and
/// the bookkeeping around them.
struct SearchSession<'i, 'm, C, M>
where
    C: SolverCost,
{
    instance: &'i Instance<C>,
    reduced: ReducedInstance<'i, C>,
    queue: NodeQueue<C>,
    incumbent: Option<Incumbent<C>>,
    stats: BnbStatistics,
    monitor: &'m mut M,
    start_time: std::time::Instant,
}

impl<'i, 'm, C, M> SearchSession<'i, 'm, C, M>
where
    C: SolverCost,
    M: SearchMonitor<C>,
{
    fn new(instance: &'i Instance<C>, monitor: &'m mut M) -> Self {
        // More expensive duplicates can never be in an optimum, and the
        // branching rule requires unique subsets.
        let reduced = ReducedInstance::from_instance(instance);
        Self {
            instance,
            reduced,
            queue: NodeQueue::new(),
            incumbent: None,
            stats: BnbStatistics::default(),
            monitor,
            start_time: std::time::Instant::now(),
        }
    }

    fn run(mut self) -> Result<BnbOutcome<C>, SolveError> {
        self.monitor.on_enter_search(self.instance);
        self.queue.push(Node::root());

        let termination_reason = loop {
            let Some(node) = self.queue.pop() else {
                break TerminationReason::Completed;
            };
            self.stats.on_node_explored();
            self.monitor.on_node(&self.stats);

            if let SearchCommand::Terminate(reason) = self.monitor.search_command(&self.stats) {
                break TerminationReason::Aborted(reason);
            }

            self.process_node(&node)?;
        };

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        Ok(self.finalize(termination_reason))
    }

    /// Fathoms or branches one popped node.
    fn process_node(&mut self, node: &Rc<Node<C>>) -> Result<(), SolveError> {
        if let Some(incumbent) = &self.incumbent {
            if incumbent.cost <= node.lower_bound() {
                self.stats.on_pruned_by_bound();
                return Ok(());
            }
        }

        let Some(sub) = SubInstance::for_node(&self.reduced, node)? else {
            self.stats.on_pruned_infeasible();
            return Ok(());
        };

        if sub.is_solution() {
            let cost = sub.total_cost();
            let reduced_indices = sub.reduced_indices().to_vec();
            self.try_install(cost, reduced_indices);
            return Ok(());
        }

        // The sub-instance has some element in two or more subsets: bound
        // it through the Lagrangian dual of its covering relaxation.
        let matrix = sub.to_matrix()?;
        self.stats.on_dual_run();
        let dual = run_dual_ascent(&matrix, sub.costs())?;

        if dual.proven_optimal_exact() {
            let reduced_indices: Vec<usize> = dual
                .primal()
                .iter()
                .map(|&local| sub.reduced_index(local))
                .collect();
            self.try_install(dual.dual_objective(), reduced_indices);
            return Ok(());
        }

        if let Some(incumbent) = &self.incumbent {
            if incumbent.cost <= dual.dual_objective() {
                self.stats.on_pruned_by_bound();
                return Ok(());
            }
        }

        let pair = find_branching_pair(&sub)?;
        let (both, diff) = node.branch(dual.dual_objective(), pair.i, pair.j)?;
        self.stats.on_branch();
        self.queue.push(both);
        self.queue.push(diff);
        Ok(())
    }

    /// Installs a strictly improving incumbent.
    fn try_install(&mut self, cost: C, reduced_indices: Vec<usize>) {
        let improves = match &self.incumbent {
            None => true,
            Some(incumbent) => cost < incumbent.cost,
        };
        if improves {
            self.incumbent = Some(Incumbent {
                cost,
                reduced_indices,
            });
            self.stats.on_solution_found();
            self.monitor.on_solution_found(cost, &self.stats);
        }
    }

    /// Maps the incumbent back into the caller's subset numbering and
    /// wraps it into the outcome for the given termination reason.
    fn finalize(self, termination_reason: TerminationReason) -> BnbOutcome<C> {
        let completed = termination_reason == TerminationReason::Completed;

        let evaluation = match &self.incumbent {
            Some(incumbent) => {
                let mut subset_indices: Vec<usize> = incumbent
                    .reduced_indices
                    .iter()
                    .map(|&reduced_index| self.reduced.original_index(reduced_index))
                    .collect();
                subset_indices.sort_unstable();
                if completed {
                    Evaluation::proven_optimal(subset_indices, incumbent.cost)
                } else {
                    Evaluation::feasible(subset_indices, incumbent.cost)
                }
            }
            None => Evaluation::no_cover(),
        };

        match termination_reason {
            TerminationReason::Completed => BnbOutcome::completed(evaluation, self.stats),
            TerminationReason::Aborted(reason) => {
                BnbOutcome::aborted(evaluation, reason, self.stats)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::interrupt::InterruptMonitor;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tessella_model::evaluation::verify_cover;

    fn solve(instance: &Instance<f64>) -> BnbOutcome<f64> {
        BnbSolver::new().solve(instance).unwrap()
    }

    #[test]
    fn test_empty_universe_is_trivially_covered() {
        let instance = Instance::<f64>::new(0, Vec::new(), Vec::new()).unwrap();
        let outcome = solve(&instance);

        let evaluation = outcome.evaluation();
        assert!(evaluation.exactly_covered());
        assert!(evaluation.optimal());
        assert_eq!(evaluation.cost(), 0.0);
        assert!(evaluation.subset_indices().is_empty());
    }

    #[test]
    fn test_no_subsets_means_no_cover() {
        let instance = Instance::<f64>::new(2, Vec::new(), Vec::new()).unwrap();
        let outcome = solve(&instance);

        let evaluation = outcome.evaluation();
        assert!(!evaluation.exactly_covered());
        assert!(!evaluation.optimal());
        assert_eq!(evaluation.cost(), 0.0);
    }

    #[test]
    fn test_pairwise_overlapping_triangle_has_no_cover() {
        let instance = Instance::new(
            3,
            vec![vec![0, 1], vec![1, 2], vec![0, 2]],
            vec![1.0, 1.0, 1.0],
        )
        .unwrap();
        let outcome = solve(&instance);
        assert!(!outcome.evaluation().exactly_covered());
    }

    #[test]
    fn test_single_full_subset() {
        let instance = Instance::new(1, vec![vec![0]], vec![42.0]).unwrap();
        let outcome = solve(&instance);

        let evaluation = outcome.evaluation();
        assert!(evaluation.optimal());
        assert_eq!(evaluation.subset_indices(), &[0]);
        assert_eq!(evaluation.cost(), 42.0);
    }

    #[test]
    fn test_duplicates_are_resolved_to_the_cheapest() {
        let instance = Instance::new(
            2,
            vec![vec![0, 1], vec![0], vec![1], vec![0]],
            vec![17.0, 7.0, 5.0, 3.0],
        )
        .unwrap();
        let outcome = solve(&instance);

        let evaluation = outcome.evaluation();
        assert!(evaluation.optimal());
        assert!((evaluation.cost() - 8.0).abs() < 1e-12);
        assert_eq!(evaluation.subset_indices(), &[2, 3]);
        assert!(verify_cover(&instance, evaluation.subset_indices()));
    }

    #[test]
    fn test_three_element_instance_with_optimal_pair() {
        let instance = Instance::new(
            3,
            vec![vec![0, 1, 2], vec![0], vec![1], vec![1, 2], vec![0, 2]],
            vec![17.0, 5.0, 4.0, 3.0, 3.0],
        )
        .unwrap();
        let outcome = solve(&instance);

        let evaluation = outcome.evaluation();
        assert!(evaluation.optimal());
        assert!((evaluation.cost() - 7.0).abs() < 1e-12);
        assert_eq!(evaluation.subset_indices(), &[2, 4]);
    }

    #[test]
    fn test_four_element_instance() {
        let instance = Instance::new(
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
        )
        .unwrap();
        let outcome = solve(&instance);

        let evaluation = outcome.evaluation();
        assert!(evaluation.optimal());
        assert!((evaluation.cost() - 3.5).abs() < 1e-12);
        assert_eq!(evaluation.subset_indices(), &[6, 7]);
        assert!(verify_cover(&instance, evaluation.subset_indices()));
    }

    #[test]
    fn test_statistics_are_populated() {
        let instance = Instance::new(
            3,
            vec![vec![0, 1, 2], vec![0], vec![1], vec![1, 2], vec![0, 2]],
            vec![17.0, 5.0, 4.0, 3.0, 3.0],
        )
        .unwrap();
        let outcome = solve(&instance);

        let stats = outcome.statistics();
        assert!(stats.nodes_explored >= 1);
        assert!(stats.solutions_found >= 1);
    }

    #[test]
    fn test_interrupted_search_returns_non_optimal_outcome() {
        let instance = Instance::new(
            3,
            vec![vec![0, 1, 2], vec![0], vec![1], vec![1, 2], vec![0, 2]],
            vec![17.0, 5.0, 4.0, 3.0, 3.0],
        )
        .unwrap();

        // The flag is raised before the search starts, so the very first
        // poll terminates it.
        let flag = AtomicBool::new(false);
        flag.store(true, Ordering::Relaxed);

        let outcome = BnbSolver::new()
            .solve_with_monitor(&instance, InterruptMonitor::new(&flag))
            .unwrap();

        assert!(matches!(
            outcome.termination_reason(),
            TerminationReason::Aborted(_)
        ));
        assert!(!outcome.evaluation().optimal());
    }
}
