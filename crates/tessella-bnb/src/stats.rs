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

use std::time::Duration;

/// Statistics collected during one branch-and-bound solve.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BnbStatistics {
    /// Nodes popped from the queue.
    pub nodes_explored: u64,
    /// Nodes discarded because the incumbent already matched their bound.
    pub pruned_by_bound: u64,
    /// Nodes whose sub-instance left some element uncoverable.
    pub pruned_infeasible: u64,
    /// Subgradient ascent runs performed.
    pub dual_runs: u64,
    /// Nodes branched into two children.
    pub branches: u64,
    /// Improving incumbents installed.
    pub solutions_found: u64,
    /// Total wall time of the solve.
    pub time_total: Duration,
}

impl BnbStatistics {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_pruned_by_bound(&mut self) {
        self.pruned_by_bound = self.pruned_by_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_pruned_infeasible(&mut self) {
        self.pruned_infeasible = self.pruned_infeasible.saturating_add(1);
    }

    #[inline]
    pub fn on_dual_run(&mut self) {
        self.dual_runs = self.dual_runs.saturating_add(1);
    }

    #[inline]
    pub fn on_branch(&mut self) {
        self.branches = self.branches.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, time: Duration) {
        self.time_total = time;
    }
}

impl std::fmt::Display for BnbStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Statistics(nodes: {}, pruned by bound: {}, pruned infeasible: {}, \
             dual runs: {}, branches: {}, solutions: {}, time: {:.3}s)",
            self.nodes_explored,
            self.pruned_by_bound,
            self.pruned_infeasible,
            self.dual_runs,
            self.branches,
            self.solutions_found,
            self.time_total.as_secs_f64()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero_and_increment() {
        let mut stats = BnbStatistics::default();
        assert_eq!(stats.nodes_explored, 0);

        stats.on_node_explored();
        stats.on_node_explored();
        stats.on_pruned_by_bound();
        stats.on_solution_found();

        assert_eq!(stats.nodes_explored, 2);
        assert_eq!(stats.pruned_by_bound, 1);
        assert_eq!(stats.solutions_found, 1);
        assert_eq!(stats.branches, 0);
    }

    #[test]
    fn test_display_contains_counters() {
        let mut stats = BnbStatistics::default();
        stats.on_node_explored();
        let formatted = format!("{}", stats);
        assert!(formatted.contains("nodes: 1"));
    }
}
