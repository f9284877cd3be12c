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

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use crate::stats::BnbStatistics;
use std::time::{Duration, Instant};
use tessella_core::num::SolverCost;
use tessella_model::instance::Instance;

/// A monitor that prints a fixed-width progress table to stdout.
///
/// A line is emitted at most once per `log_interval`; the clock is only
/// consulted every `clock_check_mask + 1` nodes to keep the hot loop free
/// of timer syscalls. A summary line with the final statistics is printed
/// when the search exits.
#[derive(Debug, Clone)]
pub struct LogMonitor<C>
where
    C: SolverCost,
{
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_cost: Option<C>,
}

impl<C> LogMonitor<C>
where
    C: SolverCost,
{
    /// Creates a monitor that logs at most once per `log_interval`,
    /// checking the clock every `clock_check_mask + 1` nodes
    /// (the mask must be a power of two minus one).
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        debug_assert!(
            (clock_check_mask + 1).is_power_of_two(),
            "called `LogMonitor::new` with a clock check mask that is not a power of two minus one"
        );
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_cost: None,
        }
    }

    fn print_header(&self) {
        println!(
            "{:<9} | {:<12} | {:<14} | {:<14} | {:<12} | {:<10}",
            "Elapsed", "Nodes", "Best Cost", "Pruned Bound", "Infeasible", "Branches"
        );
        println!("{}", "-".repeat(84));
    }

    fn log_line(&mut self, stats: &BnbStatistics) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();

        let best_cost_str = match &self.best_cost {
            Some(cost) => format!("{}", cost),
            None => "Inf".to_string(),
        };
        let elapsed_field = format!("{:.1}s", elapsed);

        println!(
            "{:<9} | {:<12} | {:<14} | {:<14} | {:<12} | {:<10}",
            elapsed_field,
            stats.nodes_explored,
            best_cost_str,
            stats.pruned_by_bound,
            stats.pruned_infeasible,
            stats.branches
        );

        self.last_log_time = now;
    }
}

impl<C> Default for LogMonitor<C>
where
    C: SolverCost,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl<C> SearchMonitor<C> for LogMonitor<C>
where
    C: SolverCost,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, instance: &Instance<C>) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_cost = None;
        println!(
            "Solving {} ({} elements, {} subsets)",
            instance,
            instance.element_count(),
            instance.num_subsets()
        );
        self.print_header();
    }

    fn on_exit_search(&mut self, stats: &BnbStatistics) {
        self.log_line(stats);
        println!("{}", stats);
    }

    fn on_node(&mut self, stats: &BnbStatistics) {
        if (stats.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(stats);
        }
    }

    fn on_solution_found(&mut self, cost: C, stats: &BnbStatistics) {
        self.best_cost = Some(cost);
        self.log_line(stats);
    }

    fn search_command(&self, _stats: &BnbStatistics) -> SearchCommand {
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_monitor_never_terminates() {
        let monitor = LogMonitor::<f64>::default();
        assert_eq!(
            monitor.search_command(&BnbStatistics::default()),
            SearchCommand::Continue
        );
    }

    #[test]
    fn test_solution_updates_best_cost() {
        let mut monitor = LogMonitor::<f64>::default();
        assert!(monitor.best_cost.is_none());
        monitor.on_solution_found(8.0, &BnbStatistics::default());
        assert_eq!(monitor.best_cost, Some(8.0));
    }
}
