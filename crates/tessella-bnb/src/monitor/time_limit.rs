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

/// A monitor that stops the search once a wall-clock budget is spent.
///
/// The clock starts at `on_enter_search`, so a reused monitor measures each
/// solve separately.
#[derive(Debug, Clone)]
pub struct TimeLimitMonitor<C> {
    time_limit: Duration,
    start_time: Instant,
    _phantom: std::marker::PhantomData<C>,
}

impl<C> TimeLimitMonitor<C> {
    /// Creates a monitor with the given wall-clock budget.
    #[inline]
    pub fn new(time_limit: Duration) -> Self {
        Self {
            time_limit,
            start_time: Instant::now(),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Returns the configured budget.
    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl<C> SearchMonitor<C> for TimeLimitMonitor<C>
where
    C: SolverCost,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _instance: &Instance<C>) {
        self.start_time = Instant::now();
    }

    fn on_exit_search(&mut self, _stats: &BnbStatistics) {}
    fn on_node(&mut self, _stats: &BnbStatistics) {}
    fn on_solution_found(&mut self, _cost: C, _stats: &BnbStatistics) {}

    fn search_command(&self, _stats: &BnbStatistics) -> SearchCommand {
        if self.start_time.elapsed() >= self.time_limit {
            SearchCommand::Terminate("Time limit reached".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_budget_terminates_immediately() {
        let monitor = TimeLimitMonitor::<f64>::new(Duration::ZERO);
        assert!(matches!(
            monitor.search_command(&BnbStatistics::default()),
            SearchCommand::Terminate(_)
        ));
    }

    #[test]
    fn test_generous_budget_continues() {
        let monitor = TimeLimitMonitor::<f64>::new(Duration::from_secs(3600));
        assert_eq!(
            monitor.search_command(&BnbStatistics::default()),
            SearchCommand::Continue
        );
    }
}
