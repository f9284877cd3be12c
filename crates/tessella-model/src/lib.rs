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

//! # Tessella Model
//!
//! **The Core Domain Model for the Tessella Exact Cover Solver.**
//!
//! This crate defines the data structures shared by every solver: the
//! weighted exact cover **instance** (a universe of elements, a family of
//! subsets and strictly positive costs) and the **evaluation** a solver
//! returns (selected subsets, cost, coverage and optimality flags).
//!
//! ## Architecture
//!
//! * **`instance`**: The validated, immutable [`instance::Instance`]. All
//!   shape invariants (sorted subsets, in-range elements, positive costs)
//!   are checked eagerly at construction so the solvers never meet an
//!   invalid state.
//! * **`evaluation`**: The solver output format, plus a cover verifier used
//!   by tests and callers that want to double-check a result.
//! * **`random`**: A seeded random instance generator for tests and
//!   benchmarks.
//! * **`loading`**: A loader for the exact-cover subset of the MPS format.
//!
//! ## Design Philosophy
//!
//! 1. **Fail-Fast**: Constructors validate inputs eagerly with errors that
//!    name the offending index.
//! 2. **Immutability**: An `Instance` never changes after construction;
//!    solvers build filtered views instead of mutating it.

pub mod evaluation;
pub mod instance;
pub mod loading;
pub mod random;
