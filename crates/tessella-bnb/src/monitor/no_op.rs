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
use tessella_core::num::SolverCost;
use tessella_model::instance::Instance;

/// A monitor that observes nothing and never stops the search. The default
/// when no monitoring is requested.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMonitor;

impl NoOpMonitor {
    /// Creates a new no-op monitor.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl<C> SearchMonitor<C> for NoOpMonitor
where
    C: SolverCost,
{
    fn name(&self) -> &str {
        "NoOpMonitor"
    }

    fn on_enter_search(&mut self, _instance: &Instance<C>) {}
    fn on_exit_search(&mut self, _stats: &BnbStatistics) {}
    fn on_node(&mut self, _stats: &BnbStatistics) {}
    fn on_solution_found(&mut self, _cost: C, _stats: &BnbStatistics) {}

    fn search_command(&self, _stats: &BnbStatistics) -> SearchCommand {
        SearchCommand::Continue
    }
}
