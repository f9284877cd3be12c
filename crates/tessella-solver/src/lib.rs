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

//! # Tessella Solver
//!
//! **The user-facing crate of the Tessella exact cover workspace.**
//!
//! Give it a universe size, a family of subsets and one strictly positive
//! cost per subset; get back a proven minimum-cost exact cover or a proof
//! that none exists.
//!
//! ```rust
//! use tessella_solver::solve_by_branch_and_bound;
//!
//! let evaluation = solve_by_branch_and_bound(
//!     3,
//!     vec![vec![0, 1, 2], vec![0], vec![1], vec![1, 2], vec![0, 2]],
//!     vec![17.0, 5.0, 4.0, 3.0, 3.0],
//! )
//! .unwrap();
//!
//! assert!(evaluation.optimal());
//! assert_eq!(evaluation.subset_indices(), &[2, 4]);
//! assert_eq!(evaluation.cost(), 7.0);
//! ```
//!
//! Two engines are exposed: a branch-and-bound solver for real instances
//! and a brute-force solver for tiny ones (at most 32 subsets), which also
//! serves as the reference oracle in the cross-solver test suite.

pub mod solver;

pub use solver::{
    solve_by_branch_and_bound, solve_by_branch_and_bound_with_monitor, solve_by_brute_force,
    SolverError,
};
