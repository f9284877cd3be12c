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

use num_traits::{Float, FromPrimitive};

/// A trait alias for scalar types that can be used as subset costs.
///
/// Costs, lower bounds, dual multipliers and objective values are all carried
/// in this type. The solvers require floating-point semantics: strictly
/// positive finite costs on input, `infinity()` as the "no bound yet"
/// sentinel of root nodes and incumbents, and exact representation of the
/// integers 0 and 1 for the binary primal vector.
///
/// Both `f32` and `f64` qualify. `f64` is the type the loaders and the test
/// suites use.
pub trait SolverCost:
    Float + FromPrimitive + std::fmt::Debug + std::fmt::Display + Send + Sync
{
}

impl<T> SolverCost for T where
    T: Float + FromPrimitive + std::fmt::Debug + std::fmt::Display + Send + Sync
{
}

/// Converts a `usize` counter into the solver cost type.
///
/// # Panics
///
/// Panics if the value is not representable in `C`. Counters passed here are
/// bounded by instance dimensions, which are far below the exactly
/// representable integer range of any `Float` type the solver is used with.
#[inline]
pub fn cost_from_usize<C: SolverCost>(value: usize) -> C {
    C::from_usize(value)
        .unwrap_or_else(|| panic!("count {} is not representable in the solver cost type", value))
}
