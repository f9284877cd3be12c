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

//! Monitoring combinators for the search loop.
//!
//! `CompositeMonitor` fans every event out to its children, letting logging,
//! budgets and interruption be mixed without coupling them to the solver.
//!
//! Behavior
//! - Events are dispatched to child monitors in insertion order.
//! - `search_command` short-circuits on the first non-`Continue` response;
//!   put stricter stop conditions first.

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use crate::stats::BnbStatistics;
use tessella_core::num::SolverCost;
use tessella_model::instance::Instance;

/// A monitor that aggregates multiple monitors and forwards events to all
/// of them.
pub struct CompositeMonitor<'a, C>
where
    C: SolverCost,
{
    monitors: Vec<Box<dyn SearchMonitor<C> + 'a>>,
}

impl<'a, C> Default for CompositeMonitor<'a, C>
where
    C: SolverCost,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, C> CompositeMonitor<'a, C>
where
    C: SolverCost,
{
    /// Creates an empty composite monitor.
    #[inline]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Adds a monitor.
    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SearchMonitor<C> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds an already boxed monitor.
    #[inline]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn SearchMonitor<C> + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns the number of child monitors.
    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns whether there are no child monitors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, C> SearchMonitor<C> for CompositeMonitor<'a, C>
where
    C: SolverCost,
{
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self, instance: &Instance<C>) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(instance);
        }
    }

    fn on_exit_search(&mut self, stats: &BnbStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(stats);
        }
    }

    fn on_node(&mut self, stats: &BnbStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_node(stats);
        }
    }

    fn on_solution_found(&mut self, cost: C, stats: &BnbStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_solution_found(cost, stats);
        }
    }

    fn search_command(&self, stats: &BnbStatistics) -> SearchCommand {
        for monitor in &self.monitors {
            let command = monitor.search_command(stats);
            if command != SearchCommand::Continue {
                return command;
            }
        }
        SearchCommand::Continue
    }
}
