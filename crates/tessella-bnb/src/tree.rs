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

//! # Constraint Search Tree
//!
//! Immutable branch-and-bound nodes linked bottom-up. Every non-root node
//! constrains a pair of elements `(i, j)` with `i < j`:
//!
//! * **Both branch**: every selected subset contains both `i` and `j`, or
//!   neither.
//! * **Diff branch**: no selected subset contains both `i` and `j`.
//!
//! The sub-problem a node represents is obtained by applying its own
//! constraint together with those of all its ancestors. Children hold an
//! `Rc` to their parent, so a parent stays alive exactly as long as some
//! descendant is reachable from the queue or the incumbent; once the last
//! descendant is dropped the chain unwinds on its own.

use std::rc::Rc;
use tessella_core::num::SolverCost;

/// The constraint kind a node applies on top of its ancestors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The unconstrained root. Its bound and element pair carry no meaning.
    Root,
    /// Selected subsets contain both branching elements or neither.
    Both,
    /// No selected subset contains both branching elements.
    Diff,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Root => write!(f, "Root"),
            NodeKind::Both => write!(f, "Both"),
            NodeKind::Diff => write!(f, "Diff"),
        }
    }
}

/// The error type for branching with an invalid element pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchPairError {
    /// The first element of the rejected pair.
    pub i: u32,
    /// The second element of the rejected pair.
    pub j: u32,
}

impl std::fmt::Display for BranchPairError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "branching elements must satisfy i < j but got i = {}, j = {}",
            self.i, self.j
        )
    }
}

impl std::error::Error for BranchPairError {}

/// A node of the constraint search tree.
///
/// Nodes are immutable after creation and only reachable top-down through
/// the queue; the tree structure itself is bottom-up via parent links.
#[derive(Debug)]
pub struct Node<C> {
    kind: NodeKind,
    parent: Option<Rc<Node<C>>>,
    lower_bound: C,
    i: u32,
    j: u32,
}

impl<C> Node<C>
where
    C: SolverCost,
{
    /// Creates the root node.
    ///
    /// The root's lower bound is positive infinity so it can never be
    /// discarded by an incumbent before it has been explored.
    pub fn root() -> Rc<Self> {
        Rc::new(Self {
            kind: NodeKind::Root,
            parent: None,
            lower_bound: C::infinity(),
            i: u32::MAX,
            j: u32::MAX,
        })
    }

    /// Branches this node on the element pair `(i, j)`, producing the
    /// (both, diff) children. Both children share the given lower bound and
    /// point back to this node as their parent.
    ///
    /// Fails if `i >= j`.
    pub fn branch(
        self: &Rc<Self>,
        lower_bound: C,
        i: u32,
        j: u32,
    ) -> Result<(Rc<Self>, Rc<Self>), BranchPairError> {
        if i >= j {
            return Err(BranchPairError { i, j });
        }

        let both = Rc::new(Self {
            kind: NodeKind::Both,
            parent: Some(Rc::clone(self)),
            lower_bound,
            i,
            j,
        });
        let diff = Rc::new(Self {
            kind: NodeKind::Diff,
            parent: Some(Rc::clone(self)),
            lower_bound,
            i,
            j,
        });
        Ok((both, diff))
    }

    /// Returns the constraint kind.
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns the parent node, `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<&Rc<Node<C>>> {
        self.parent.as_ref()
    }

    /// Returns the lower bound this node was created with.
    #[inline]
    pub fn lower_bound(&self) -> C {
        self.lower_bound
    }

    /// Returns the first branching element. Meaningless for the root.
    #[inline]
    pub fn i(&self) -> u32 {
        self.i
    }

    /// Returns the second branching element. Meaningless for the root.
    #[inline]
    pub fn j(&self) -> u32 {
        self.j
    }
}

impl<C> std::fmt::Display for Node<C>
where
    C: SolverCost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            NodeKind::Root => write!(f, "Node(Root, bound: {})", self.lower_bound),
            _ => write!(
                f,
                "Node({}, i: {}, j: {}, bound: {})",
                self.kind, self.i, self.j, self.lower_bound
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_has_infinite_bound_and_no_parent() {
        let root = Node::<f64>::root();
        assert_eq!(root.kind(), NodeKind::Root);
        assert!(root.parent().is_none());
        assert!(root.lower_bound().is_infinite());
    }

    #[test]
    fn test_branch_creates_both_and_diff_children() {
        let root = Node::<f64>::root();
        let (both, diff) = root.branch(3.5, 1, 4).unwrap();

        assert_eq!(both.kind(), NodeKind::Both);
        assert_eq!(diff.kind(), NodeKind::Diff);
        for child in [&both, &diff] {
            assert_eq!(child.lower_bound(), 3.5);
            assert_eq!(child.i(), 1);
            assert_eq!(child.j(), 4);
            assert!(Rc::ptr_eq(child.parent().unwrap(), &root));
        }
    }

    #[test]
    fn test_branch_rejects_unordered_pairs() {
        let root = Node::<f64>::root();
        assert_eq!(
            root.branch(1.0, 4, 1).unwrap_err(),
            BranchPairError { i: 4, j: 1 }
        );
        assert_eq!(
            root.branch(1.0, 2, 2).unwrap_err(),
            BranchPairError { i: 2, j: 2 }
        );
    }

    #[test]
    fn test_parent_chain_survives_while_descendants_live() {
        let root = Node::<f64>::root();
        let (both, _) = root.branch(1.0, 0, 1).unwrap();
        let (grandchild, _) = both.branch(2.0, 0, 2).unwrap();
        drop(both);
        drop(root);

        // The chain is still reachable from the grandchild.
        let parent = grandchild.parent().unwrap();
        assert_eq!(parent.kind(), NodeKind::Both);
        assert_eq!(parent.parent().unwrap().kind(), NodeKind::Root);
    }
}
