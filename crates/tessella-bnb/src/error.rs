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

use crate::tree::BranchPairError;
use tessella_core::math::matrix::MatrixError;

/// The error type for the branch-and-bound search.
///
/// Every variant indicates either invalid input to a kernel or a corrupted
/// search state; the driver never recovers locally, errors surface to the
/// caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// A sparse matrix operation failed.
    Matrix(MatrixError),
    /// A branch was requested with an unordered element pair.
    BranchPair(BranchPairError),
    /// An ancestor chain constrains the same element pair twice.
    DuplicateBranchingPair {
        /// The first element of the repeated pair.
        i: u32,
        /// The second element of the repeated pair.
        j: u32,
    },
    /// Branching was invoked on a sub-instance without an element covered
    /// by two distinct subsets.
    BranchingImpossible,
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Matrix(e) => write!(f, "sparse matrix error: {e}"),
            Self::BranchPair(e) => write!(f, "{e}"),
            Self::DuplicateBranchingPair { i, j } => {
                write!(f, "already branched on the element pair ({i}, {j})")
            }
            Self::BranchingImpossible => write!(
                f,
                "branching requires an element covered by two distinct subsets"
            ),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Matrix(e) => Some(e),
            Self::BranchPair(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MatrixError> for SolveError {
    fn from(e: MatrixError) -> Self {
        Self::Matrix(e)
    }
}

impl From<BranchPairError> for SolveError {
    fn from(e: BranchPairError) -> Self {
        Self::BranchPair(e)
    }
}
