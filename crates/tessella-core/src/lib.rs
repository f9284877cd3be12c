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

//! # Tessella Core
//!
//! **Shared primitives for the Tessella exact cover solver.**
//!
//! This crate contains the building blocks the solver crates agree on:
//!
//! * **`num`**: The `SolverCost` trait alias describing the scalar type used
//!   for subset costs, bounds and dual multipliers.
//! * **`math`**: A compressed sparse storage scheme for binary matrices with
//!   sentinel-terminated rows/columns, plus transposition and the two
//!   matrix/vector products the dual engine needs.
//! * **`utils`**: Small combinatorial helpers, currently the lexicographic
//!   combination cursor driving the brute-force solver.
//!
//! Nothing in this crate knows about covers, subsets or search trees; it is
//! deliberately the bottom of the dependency order.

pub mod math;
pub mod num;
pub mod utils;
