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

//! # Compressed Binary Matrix Storage
//!
//! Sparse storage for binary matrices, used by the Lagrangian dual engine.
//! A matrix is a flat sequence of `u32` values. In row-major storage the
//! values of a row are the column indices of its 1-entries in ascending
//! order, terminated by [`SENTINEL`]; column-major storage is the analogous
//! transpose. The sentinel terminates every row/column, including trailing
//! empty ones, so the stripe count equals the sentinel count.
//!
//! For example, in row-major storage:
//!
//! ```text
//! 0 0 0 1 1
//! 0 0 0 0 0   =>   [3, 4, SENTINEL, SENTINEL, 1, 2, SENTINEL]
//! 0 1 1 0 0
//! ```
//!
//! The code only partially exploits sparsity; there is no blocking, SIMD or
//! tuned memory access. For the banded-ish incidence matrices the solver
//! produces this is decently performant, and the linear-time products keep
//! the dual engine's per-iteration cost proportional to the number of
//! non-zeros.

use crate::num::SolverCost;

/// Marks the end of a row or column in compressed storage.
///
/// Doubling as a terminator caps the addressable dimension at
/// `u32::MAX - 1` rows or columns, far beyond anything the solver meets.
pub const SENTINEL: u32 = u32::MAX;

/// The error type for compressed matrix construction and transposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// The value sequence contains no index at all (only sentinels, or nothing).
    MissingIndices,
    /// The value sequence does not end with the sentinel.
    MissingTerminalSentinel,
    /// Transposition tried to write past the end of a target stripe,
    /// which indicates inconsistent input indexing.
    SentinelOverwrite,
}

impl std::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingIndices => write!(f, "matrix values must contain at least one index"),
            Self::MissingTerminalSentinel => {
                write!(f, "matrix values must end in the sentinel value ({})", SENTINEL)
            }
            Self::SentinelOverwrite => {
                write!(f, "transpose overwrote a sentinel, indicating an indexing error")
            }
        }
    }
}

impl std::error::Error for MatrixError {}

/// Checks the structural validity of a compressed value sequence:
/// it must contain at least one non-sentinel index and end with a sentinel.
fn check_values(values: &[u32]) -> Result<(), MatrixError> {
    if !values.iter().any(|&v| v != SENTINEL) {
        return Err(MatrixError::MissingIndices);
    }

    // The sequence is non-empty here, otherwise the index check failed.
    if *values.last().expect("non-empty value sequence") != SENTINEL {
        return Err(MatrixError::MissingTerminalSentinel);
    }

    Ok(())
}

/// Counts the stripes (rows in row-major storage, columns in column-major
/// storage) of a compressed value sequence. Each stripe is closed by exactly
/// one sentinel.
#[inline]
fn count_stripes(values: &[u32]) -> usize {
    values.iter().filter(|&&v| v == SENTINEL).count()
}

/// Transposes a compressed value sequence.
///
/// The naming below reads as row-major to column-major, but the mechanics
/// work identically in the other direction. The first pass counts the
/// entries of every target stripe, a prefix sum places the stripe start
/// cursors (leaving one slot per stripe for its sentinel), and the second
/// pass drops each source entry at its target cursor. The pre-placed
/// sentinels double as overrun guards: writing onto one means the counting
/// and placement passes disagreed about the input.
fn transpose_values(values: &[u32]) -> Result<Vec<u32>, MatrixError> {
    let mut entries_per_column: Vec<u32> = Vec::new();
    let mut nnz = 0usize;
    for &value in values {
        if value == SENTINEL {
            continue;
        }

        let column = value as usize;
        if column >= entries_per_column.len() {
            entries_per_column.resize(column + 1, 0);
        }
        entries_per_column[column] += 1;
        nnz += 1;
    }

    let num_columns = entries_per_column.len();
    let mut transposed = vec![0u32; nnz + num_columns];

    let mut column_cursor = vec![0u32; num_columns];
    for column in 1..num_columns {
        // + 1 leaves a slot for the previous stripe's sentinel.
        column_cursor[column] =
            column_cursor[column - 1] + entries_per_column[column - 1] + 1;
    }

    for column in 0..num_columns {
        let sentinel_pos = column_cursor[column] as usize + entries_per_column[column] as usize;
        transposed[sentinel_pos] = SENTINEL;
    }

    let mut row = 0u32;
    for &value in values {
        if value == SENTINEL {
            row += 1;
            continue;
        }

        let column = value as usize;
        let cursor = column_cursor[column] as usize;
        if transposed[cursor] == SENTINEL {
            return Err(MatrixError::SentinelOverwrite);
        }
        transposed[cursor] = row;
        column_cursor[column] += 1;
    }

    check_values(&transposed)?;
    Ok(transposed)
}

/// The shared product kernel. Every non-sentinel value is a coordinate in
/// the minor dimension of `x`; the accumulator advances to the next output
/// slot on every sentinel. Runs in time linear in `values.len()`.
fn multiply<C: SolverCost>(values: &[u32], x: &[C], result: &mut [C]) {
    let mut major = 0usize;
    result[major] = C::zero();
    for &value in values {
        if value != SENTINEL {
            result[major] = result[major] + x[value as usize];
        } else {
            major += 1;
            if major < result.len() {
                result[major] = C::zero();
            }
        }
    }
}

/// A binary matrix in compressed row-major storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMajorMatrix {
    values: Vec<u32>,
}

/// A binary matrix in compressed column-major storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColMajorMatrix {
    values: Vec<u32>,
}

impl RowMajorMatrix {
    /// Constructs a row-major matrix from a compressed value sequence.
    pub fn new(values: Vec<u32>) -> Result<Self, MatrixError> {
        check_values(&values)?;
        Ok(Self { values })
    }

    /// Returns the raw compressed value sequence.
    #[inline]
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Returns the number of rows.
    #[inline]
    pub fn num_rows(&self) -> usize {
        count_stripes(&self.values)
    }

    /// Transposes into column-major storage.
    pub fn transpose(&self) -> Result<ColMajorMatrix, MatrixError> {
        Ok(ColMajorMatrix {
            values: transpose_values(&self.values)?,
        })
    }

    /// Calculates the matrix-vector product `result = A * x` where `A` is
    /// this m-by-n matrix and `x` is a column vector of length n.
    ///
    /// # Panics
    ///
    /// Panics if `result.len()` differs from the number of rows, or if some
    /// column index of the matrix is out of bounds for `x`.
    #[inline]
    pub fn matrix_vector_multiply<C: SolverCost>(&self, x: &[C], result: &mut [C]) {
        debug_assert_eq!(
            result.len(),
            self.num_rows(),
            "called `RowMajorMatrix::matrix_vector_multiply` with a result buffer of length {} for {} rows",
            result.len(),
            self.num_rows()
        );
        multiply(&self.values, x, result);
    }
}

impl ColMajorMatrix {
    /// Constructs a column-major matrix from a compressed value sequence.
    pub fn new(values: Vec<u32>) -> Result<Self, MatrixError> {
        check_values(&values)?;
        Ok(Self { values })
    }

    /// Returns the raw compressed value sequence.
    #[inline]
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Returns the number of columns.
    #[inline]
    pub fn num_columns(&self) -> usize {
        count_stripes(&self.values)
    }

    /// Transposes into row-major storage.
    pub fn transpose(&self) -> Result<RowMajorMatrix, MatrixError> {
        Ok(RowMajorMatrix {
            values: transpose_values(&self.values)?,
        })
    }

    /// Calculates the vector-matrix product `result = x * A` where `x` is a
    /// row vector of length m and `A` is this m-by-n matrix.
    ///
    /// # Panics
    ///
    /// Panics if `result.len()` differs from the number of columns, or if
    /// some row index of the matrix is out of bounds for `x`.
    #[inline]
    pub fn vector_matrix_multiply<C: SolverCost>(&self, x: &[C], result: &mut [C]) {
        debug_assert_eq!(
            result.len(),
            self.num_columns(),
            "called `ColMajorMatrix::vector_matrix_multiply` with a result buffer of length {} for {} columns",
            result.len(),
            self.num_columns()
        );
        multiply(&self.values, x, result);
    }
}
