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

//! # Node Priority Queue
//!
//! A min-heap of search nodes keyed by lower bound, built on the standard
//! `BinaryHeap` with a reverse-ordered entry wrapper. Popping the node with
//! the smallest bound gives the best-first exploration order; ties break in
//! heap order, which is stable enough since branching is deterministic from
//! the instance.

use crate::tree::Node;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;
use tessella_core::num::SolverCost;

/// A heap entry ordered by descending lower bound, turning the standard
/// max-heap into the min-heap the search wants.
struct Entry<C>(Rc<Node<C>>);

impl<C> Ord for Entry<C>
where
    C: SolverCost,
{
    fn cmp(&self, other: &Self) -> Ordering {
        // Bounds are sums and products of finite costs and never NaN for a
        // valid instance; Equal is a safe fallback either way.
        other
            .0
            .lower_bound()
            .partial_cmp(&self.0.lower_bound())
            .unwrap_or(Ordering::Equal)
    }
}

impl<C> PartialOrd for Entry<C>
where
    C: SolverCost,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C> PartialEq for Entry<C>
where
    C: SolverCost,
{
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<C> Eq for Entry<C> where C: SolverCost {}

/// A priority queue of search nodes where nodes with a smaller lower bound
/// are popped first.
pub struct NodeQueue<C> {
    heap: BinaryHeap<Entry<C>>,
}

impl<C> Default for NodeQueue<C>
where
    C: SolverCost,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C> NodeQueue<C>
where
    C: SolverCost,
{
    /// Creates an empty queue.
    #[inline]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// Pushes a node.
    #[inline]
    pub fn push(&mut self, node: Rc<Node<C>>) {
        self.heap.push(Entry(node));
    }

    /// Pops the node with the smallest lower bound, if any.
    #[inline]
    pub fn pop(&mut self) -> Option<Rc<Node<C>>> {
        self.heap.pop().map(|entry| entry.0)
    }

    /// Returns the number of queued nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns whether the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<C> std::fmt::Debug for NodeQueue<C>
where
    C: SolverCost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeQueue(len: {})", self.heap.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_ascending_bound_order() {
        let root = Node::<f64>::root();
        let (a_both, a_diff) = root.branch(5.0, 0, 1).unwrap();
        let (b_both, b_diff) = root.branch(2.0, 0, 2).unwrap();

        let mut queue = NodeQueue::new();
        queue.push(a_both);
        queue.push(b_both);
        queue.push(a_diff);
        queue.push(b_diff);
        assert_eq!(queue.len(), 4);

        let bounds: Vec<f64> = std::iter::from_fn(|| queue.pop())
            .map(|node| node.lower_bound())
            .collect();
        assert_eq!(bounds, vec![2.0, 2.0, 5.0, 5.0]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_root_pops_last_against_finite_bounds() {
        let root = Node::<f64>::root();
        let (child, _) = root.branch(10.0, 0, 1).unwrap();

        let mut queue = NodeQueue::new();
        queue.push(Rc::clone(&root));
        queue.push(child);

        assert_eq!(queue.pop().unwrap().lower_bound(), 10.0);
        assert!(queue.pop().unwrap().lower_bound().is_infinite());
        assert!(queue.pop().is_none());
    }
}
