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

//! # Search Monitoring Interface
//!
//! A callback interface for observing and controlling the best-first
//! search. Implementations can collect telemetry, log progress, react to
//! improving incumbents, and stop the search cooperatively between popped
//! nodes. A search stopped by a monitor returns its incumbent without an
//! optimality claim; it never corrupts the result.
//!
//! The hooks:
//!
//! * `on_enter_search`: before the root node is pushed.
//! * `on_node`: after each node is popped from the queue.
//! * `on_solution_found`: after an improving incumbent is installed.
//! * `on_exit_search`: after the loop ends, regardless of reason.
//! * `search_command`: polled between popped nodes; return
//!   [`SearchCommand::Terminate`] to stop.

use crate::stats::BnbStatistics;
use tessella_core::num::SolverCost;
use tessella_model::instance::Instance;

/// Control signal emitted by monitors.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    /// Keep searching.
    #[default]
    Continue,
    /// Stop the search, with a human-readable reason.
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Lifecycle hooks for one branch-and-bound solve.
pub trait SearchMonitor<C>
where
    C: SolverCost,
{
    /// A short name identifying the monitor in diagnostics.
    fn name(&self) -> &str;
    /// Called once before the search starts.
    fn on_enter_search(&mut self, instance: &Instance<C>);
    /// Called once after the search ends.
    fn on_exit_search(&mut self, stats: &BnbStatistics);
    /// Called after every popped node.
    fn on_node(&mut self, stats: &BnbStatistics);
    /// Called whenever an improving incumbent is installed.
    fn on_solution_found(&mut self, cost: C, stats: &BnbStatistics);
    /// Polled between popped nodes to decide whether to keep searching.
    fn search_command(&self, stats: &BnbStatistics) -> SearchCommand;
}

impl<C> std::fmt::Debug for dyn SearchMonitor<C> + '_
where
    C: SolverCost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}
