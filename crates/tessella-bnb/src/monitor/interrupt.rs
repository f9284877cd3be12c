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
use std::sync::atomic::AtomicBool;
use tessella_core::num::SolverCost;
use tessella_model::instance::Instance;

/// A monitor that stops the search when an atomic flag is raised.
///
/// The flag is observed between popped nodes; the solve then returns its
/// incumbent (if any) without an optimality claim. The flag may be set from
/// another thread or a signal handler while the solver itself stays
/// single-threaded.
#[derive(Debug, Clone)]
pub struct InterruptMonitor<'a, C> {
    stop_flag: &'a AtomicBool,
    _phantom: std::marker::PhantomData<C>,
}

impl<'a, C> InterruptMonitor<'a, C> {
    /// Creates a monitor watching the given flag. The search terminates
    /// once the flag reads `true`.
    #[inline]
    pub fn new(stop_flag: &'a AtomicBool) -> Self {
        Self {
            stop_flag,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<'a, C> SearchMonitor<C> for InterruptMonitor<'a, C>
where
    C: SolverCost,
{
    fn name(&self) -> &str {
        "InterruptMonitor"
    }

    fn on_enter_search(&mut self, _instance: &Instance<C>) {}
    fn on_exit_search(&mut self, _stats: &BnbStatistics) {}
    fn on_node(&mut self, _stats: &BnbStatistics) {}
    fn on_solution_found(&mut self, _cost: C, _stats: &BnbStatistics) {}

    fn search_command(&self, _stats: &BnbStatistics) -> SearchCommand {
        if self.stop_flag.load(std::sync::atomic::Ordering::Relaxed) {
            SearchCommand::Terminate("Interrupt signal received".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_continues_while_flag_is_clear() {
        let flag = AtomicBool::new(false);
        let monitor = InterruptMonitor::<f64>::new(&flag);
        assert_eq!(
            monitor.search_command(&BnbStatistics::default()),
            SearchCommand::Continue
        );
    }

    #[test]
    fn test_terminates_once_flag_is_set() {
        let flag = AtomicBool::new(false);
        let monitor = InterruptMonitor::<f64>::new(&flag);
        flag.store(true, Ordering::Relaxed);

        match monitor.search_command(&BnbStatistics::default()) {
            SearchCommand::Terminate(reason) => {
                assert_eq!(reason, "Interrupt signal received");
            }
            other => panic!("expected Terminate, got {:?}", other),
        }
    }
}
