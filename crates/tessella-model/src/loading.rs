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

//! # MPS Instance Loader
//!
//! Reads exact set partitioning instances from the subset of the MPS format
//! those problems use: sections NAME, ROWS, COLUMNS, RHS, BOUNDS and ENDATA,
//! exactly one N-sense objective row named COST, E-sense constraint rows,
//! all constraint coefficients, right-hand sides and upper bounds exactly
//! 1.0. Anything outside that subset is rejected with an error naming the
//! offending line.
//!
//! The loader accepts any `BufRead`, file path, raw reader or string slice.
//! Lines starting with `*` are comments; a line starting in the first column
//! opens a new section. The loaded instance passes the usual validation
//! before it is returned, so a malformed file can never produce an invalid
//! instance.
//!
//! Successfully exercised against set partitioning files from the
//! miplib2003 and miplib2010 collections.

use crate::instance::{Instance, InstanceError};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tessella_core::num::SolverCost;

/// The MPS sections the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    NotSet,
    Name,
    Rows,
    Columns,
    Rhs,
    Bounds,
}

/// The error type for MPS loading.
#[derive(Debug)]
pub enum MpsLoaderError {
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// A section header outside the supported subset.
    UnsupportedSection {
        /// The offending header line.
        line: String,
    },
    /// An entry line appeared before any (supported) section header.
    StrayEntry {
        /// The offending line.
        line: String,
    },
    /// A ROWS entry that is not `<sense> <name>`.
    MalformedRowEntry {
        /// The offending line.
        line: String,
    },
    /// A constraint row with a sense other than E.
    UnsupportedRowSense {
        /// The sense that was found.
        sense: String,
        /// The offending line.
        line: String,
    },
    /// The same row name declared twice.
    DuplicateRow {
        /// The duplicated row name.
        name: String,
    },
    /// The COLUMNS section started before the N-sense COST row was declared.
    MissingCostRow,
    /// A COLUMNS entry with an unexpected field count.
    MalformedColumnEntry {
        /// The offending line.
        line: String,
    },
    /// An entry references a row name that was never declared.
    UnknownRow {
        /// The unknown row name.
        name: String,
        /// The offending line.
        line: String,
    },
    /// An entry references a column name that was never declared.
    UnknownColumn {
        /// The unknown column name.
        name: String,
        /// The offending line.
        line: String,
    },
    /// A numeric token could not be parsed.
    UnparsableValue {
        /// The token that failed to parse.
        token: String,
        /// The offending line.
        line: String,
    },
    /// A constraint coefficient other than exactly 1.0.
    NonUnitConstraintValue {
        /// The offending line.
        line: String,
    },
    /// An RHS entry with an unexpected field count.
    MalformedRhsEntry {
        /// The offending line.
        line: String,
    },
    /// A right-hand side other than exactly 1.0.
    NonUnitRhs {
        /// The offending line.
        line: String,
    },
    /// A BOUNDS entry that is not `UP BND <column> 1.0`.
    MalformedBoundsEntry {
        /// The offending line.
        line: String,
    },
    /// An upper bound other than exactly 1.0.
    NonUnitBound {
        /// The offending line.
        line: String,
    },
    /// The number of RHS entries differs from the number of rows.
    RhsCountMismatch {
        /// RHS entries seen.
        rhs_entries: usize,
        /// Constraint rows declared.
        element_count: usize,
    },
    /// The number of BOUNDS entries differs from the number of columns.
    BoundCountMismatch {
        /// BOUNDS entries seen.
        bound_entries: usize,
        /// Columns declared.
        num_subsets: usize,
    },
    /// The loaded data does not form a valid instance.
    Instance(InstanceError),
}

impl std::fmt::Display for MpsLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnsupportedSection { line } => {
                write!(f, "unsupported MPS section '{line}'")
            }
            Self::StrayEntry { line } => {
                write!(f, "entry '{line}' appeared outside any supported section")
            }
            Self::MalformedRowEntry { line } => {
                write!(f, "ROWS entry should contain a sense and a name but found '{line}'")
            }
            Self::UnsupportedRowSense { sense, line } => {
                write!(f, "only row sense E is supported but found sense '{sense}' in '{line}'")
            }
            Self::DuplicateRow { name } => write!(f, "row name '{name}' duplicated"),
            Self::MissingCostRow => {
                write!(f, "expected the N-sense COST row before the COLUMNS section")
            }
            Self::MalformedColumnEntry { line } => write!(
                f,
                "expected a COLUMNS entry with a column name and one or two (row, value) pairs but found '{line}'"
            ),
            Self::UnknownRow { name, line } => {
                write!(f, "unknown row '{name}' in entry '{line}'")
            }
            Self::UnknownColumn { name, line } => {
                write!(f, "unknown column '{name}' in entry '{line}'")
            }
            Self::UnparsableValue { token, line } => {
                write!(f, "unable to parse value '{token}' in entry '{line}'")
            }
            Self::NonUnitConstraintValue { line } => {
                write!(f, "expected all constraint values to be exactly 1.0 in '{line}'")
            }
            Self::MalformedRhsEntry { line } => write!(
                f,
                "expected an RHS entry with one or two (row, value) pairs but found '{line}'"
            ),
            Self::NonUnitRhs { line } => {
                write!(f, "expected all RHS values to be exactly 1.0 in '{line}'")
            }
            Self::MalformedBoundsEntry { line } => {
                write!(f, "expected 'UP BND <column> 1.0' for all BOUNDS entries but found '{line}'")
            }
            Self::NonUnitBound { line } => {
                write!(f, "expected all upper bounds to be exactly 1.0 in '{line}'")
            }
            Self::RhsCountMismatch {
                rhs_entries,
                element_count,
            } => write!(
                f,
                "found {rhs_entries} RHS entries for {element_count} constraint rows"
            ),
            Self::BoundCountMismatch {
                bound_entries,
                num_subsets,
            } => write!(
                f,
                "found {bound_entries} BOUNDS entries for {num_subsets} columns"
            ),
            Self::Instance(e) => write!(f, "loaded data is not a valid instance: {e}"),
        }
    }
}

impl std::error::Error for MpsLoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Instance(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MpsLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<InstanceError> for MpsLoaderError {
    fn from(e: InstanceError) -> Self {
        Self::Instance(e)
    }
}

fn parse_section(line: &str) -> Option<Section> {
    if line.starts_with("NAME") {
        Some(Section::Name)
    } else if line.starts_with("ROWS") {
        Some(Section::Rows)
    } else if line.starts_with("COLUMNS") {
        Some(Section::Columns)
    } else if line.starts_with("RHS") {
        Some(Section::Rhs)
    } else if line.starts_with("BOUNDS") {
        Some(Section::Bounds)
    } else {
        None
    }
}

fn parse_value(token: &str, line: &str) -> Result<f64, MpsLoaderError> {
    token.parse::<f64>().map_err(|_| MpsLoaderError::UnparsableValue {
        token: token.to_string(),
        line: line.to_string(),
    })
}

/// A loader for the exact set partitioning subset of the MPS format.
///
/// # Examples
///
/// ```rust
/// use tessella_model::loading::MpsLoader;
///
/// let source = "\
/// NAME          TINY
/// ROWS
///  N  COST
///  E  R0
/// COLUMNS
///     X0        COST      2.0   R0   1.0
/// RHS
///     RHS       R0        1.0
/// BOUNDS
///  UP BND       X0        1.0
/// ENDATA
/// ";
///
/// let instance = MpsLoader::new().from_str::<f64>(source).unwrap();
/// assert_eq!(instance.element_count(), 1);
/// assert_eq!(instance.num_subsets(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MpsLoader;

impl MpsLoader {
    /// Creates a new loader.
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Loads an instance from a buffered reader.
    pub fn from_bufread<C, R>(&self, reader: R) -> Result<Instance<C>, MpsLoaderError>
    where
        C: SolverCost,
        R: BufRead,
    {
        let mut section = Section::NotSet;
        let mut found_cost_row = false;

        let mut element_count = 0usize;
        let mut rows: HashMap<String, usize> = HashMap::new();
        let mut columns: HashMap<String, usize> = HashMap::new();
        let mut subsets: Vec<Vec<usize>> = Vec::new();
        let mut costs: Vec<f64> = Vec::new();
        let mut rhs_entries = 0usize;
        let mut bound_entries = 0usize;

        for line in reader.lines() {
            let line = line?;
            if line.is_empty() || line.starts_with('*') {
                continue;
            }

            let starts_new_section = !line.starts_with(' ') && !line.starts_with('\t');
            if starts_new_section {
                if line.starts_with("ENDATA") {
                    break;
                }
                section = parse_section(&line).ok_or_else(|| {
                    MpsLoaderError::UnsupportedSection { line: line.clone() }
                })?;
                continue;
            }

            match section {
                Section::Rows => {
                    let fields: Vec<&str> = line.split_whitespace().collect();
                    if fields.len() != 2 {
                        return Err(MpsLoaderError::MalformedRowEntry { line });
                    }
                    if fields[0] == "N" {
                        if fields[1] == "COST" {
                            found_cost_row = true;
                            continue;
                        }
                        return Err(MpsLoaderError::UnsupportedRowSense {
                            sense: "N".to_string(),
                            line,
                        });
                    }
                    if fields[0] != "E" {
                        return Err(MpsLoaderError::UnsupportedRowSense {
                            sense: fields[0].to_string(),
                            line,
                        });
                    }
                    let name = fields[1].to_string();
                    if rows.contains_key(&name) {
                        return Err(MpsLoaderError::DuplicateRow { name });
                    }
                    rows.insert(name, element_count);
                    element_count += 1;
                }
                Section::Columns => {
                    if !found_cost_row {
                        return Err(MpsLoaderError::MissingCostRow);
                    }
                    if line.contains("MARKER") {
                        continue;
                    }
                    let fields: Vec<&str> = line.split_whitespace().collect();
                    if fields.len() != 3 && fields.len() != 5 {
                        return Err(MpsLoaderError::MalformedColumnEntry { line });
                    }

                    let num_columns = columns.len();
                    let column_index =
                        *columns.entry(fields[0].to_string()).or_insert(num_columns);
                    while subsets.len() <= column_index {
                        subsets.push(Vec::new());
                        costs.push(0.0);
                    }

                    for pair in fields[1..].chunks(2) {
                        if pair[0] == "COST" {
                            costs[column_index] = parse_value(pair[1], &line)?;
                        } else {
                            let row_index = *rows.get(pair[0]).ok_or_else(|| {
                                MpsLoaderError::UnknownRow {
                                    name: pair[0].to_string(),
                                    line: line.clone(),
                                }
                            })?;
                            let value = parse_value(pair[1], &line)?;
                            if value != 1.0 {
                                return Err(MpsLoaderError::NonUnitConstraintValue { line });
                            }
                            subsets[column_index].push(row_index);
                        }
                    }
                }
                Section::Rhs => {
                    let fields: Vec<&str> = line.split_whitespace().collect();
                    if fields.len() != 3 && fields.len() != 5 {
                        return Err(MpsLoaderError::MalformedRhsEntry { line });
                    }
                    for pair in fields[1..].chunks(2) {
                        if !rows.contains_key(pair[0]) {
                            return Err(MpsLoaderError::UnknownRow {
                                name: pair[0].to_string(),
                                line: line.clone(),
                            });
                        }
                        let value = parse_value(pair[1], &line)?;
                        if value != 1.0 {
                            return Err(MpsLoaderError::NonUnitRhs { line });
                        }
                        rhs_entries += 1;
                    }
                }
                Section::Bounds => {
                    let fields: Vec<&str> = line.split_whitespace().collect();
                    if fields.len() != 4 || fields[0] != "UP" || fields[1].to_uppercase() != "BND"
                    {
                        return Err(MpsLoaderError::MalformedBoundsEntry { line });
                    }
                    if !columns.contains_key(fields[2]) {
                        return Err(MpsLoaderError::UnknownColumn {
                            name: fields[2].to_string(),
                            line,
                        });
                    }
                    let value = parse_value(fields[3], &line)?;
                    if value != 1.0 {
                        return Err(MpsLoaderError::NonUnitBound { line });
                    }
                    bound_entries += 1;
                }
                Section::Name => {
                    // NAME carries no entries we use.
                }
                Section::NotSet => {
                    return Err(MpsLoaderError::StrayEntry { line });
                }
            }
        }

        if rhs_entries != element_count {
            return Err(MpsLoaderError::RhsCountMismatch {
                rhs_entries,
                element_count,
            });
        }
        if bound_entries != subsets.len() {
            return Err(MpsLoaderError::BoundCountMismatch {
                bound_entries,
                num_subsets: subsets.len(),
            });
        }

        let costs: Vec<C> = costs
            .into_iter()
            .map(|cost| {
                C::from_f64(cost).unwrap_or_else(|| {
                    panic!("cost {} is not representable in the solver cost type", cost)
                })
            })
            .collect();

        Ok(Instance::new(element_count, subsets, costs)?)
    }

    /// Loads an instance from a file path.
    pub fn from_path<C, P>(&self, path: P) -> Result<Instance<C>, MpsLoaderError>
    where
        C: SolverCost,
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads an instance from an arbitrary reader.
    pub fn from_reader<C, R>(&self, reader: R) -> Result<Instance<C>, MpsLoaderError>
    where
        C: SolverCost,
        R: Read,
    {
        self.from_bufread(BufReader::new(reader))
    }

    /// Loads an instance from a string slice.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str<C>(&self, source: &str) -> Result<Instance<C>, MpsLoaderError>
    where
        C: SolverCost,
    {
        self.from_bufread(source.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY: &str = "\
NAME          TINY
ROWS
 N  COST
 E  R0
 E  R1
COLUMNS
    X0        COST      2.0   R0   1.0
    X0        R1        1.0
    X1        COST      1.5   R0   1.0
    X2        COST      1.0   R1   1.0
RHS
    RHS       R0        1.0   R1   1.0
BOUNDS
 UP BND       X0        1.0
 UP BND       X1        1.0
 UP BND       X2        1.0
ENDATA
";

    #[test]
    fn test_loads_a_small_set_partitioning_file() {
        let instance = MpsLoader::new().from_str::<f64>(TINY).unwrap();
        assert_eq!(instance.element_count(), 2);
        assert_eq!(instance.num_subsets(), 3);
        assert_eq!(instance.subset(0), &[0, 1]);
        assert_eq!(instance.subset(1), &[0]);
        assert_eq!(instance.subset(2), &[1]);
        assert_eq!(instance.costs(), &[2.0, 1.5, 1.0]);
    }

    #[test]
    fn test_comments_and_blank_lines_are_ignored() {
        let source = TINY.replace("ROWS\n", "ROWS\n* a comment\n\n");
        let instance = MpsLoader::new().from_str::<f64>(&source).unwrap();
        assert_eq!(instance.element_count(), 2);
    }

    #[test]
    fn test_rejects_unsupported_section() {
        let source = TINY.replace("BOUNDS", "RANGES");
        let err = MpsLoader::new().from_str::<f64>(&source).unwrap_err();
        assert!(matches!(err, MpsLoaderError::UnsupportedSection { .. }));
    }

    #[test]
    fn test_rejects_non_e_row_sense() {
        let source = TINY.replace(" E  R1", " L  R1");
        let err = MpsLoader::new().from_str::<f64>(&source).unwrap_err();
        assert!(matches!(
            err,
            MpsLoaderError::UnsupportedRowSense { .. }
        ));
    }

    #[test]
    fn test_rejects_missing_cost_row() {
        let source = TINY.replace(" N  COST\n", "");
        let err = MpsLoader::new().from_str::<f64>(&source).unwrap_err();
        assert!(matches!(err, MpsLoaderError::MissingCostRow));
    }

    #[test]
    fn test_rejects_non_unit_constraint_value() {
        let source = TINY.replace("R1        1.0", "R1        2.0");
        let err = MpsLoader::new().from_str::<f64>(&source).unwrap_err();
        assert!(matches!(
            err,
            MpsLoaderError::NonUnitConstraintValue { .. }
        ));
    }

    #[test]
    fn test_rejects_non_unit_rhs() {
        let source = TINY.replace("RHS       R0        1.0   R1   1.0", "RHS       R0        1.0   R1   0.5");
        let err = MpsLoader::new().from_str::<f64>(&source).unwrap_err();
        assert!(matches!(err, MpsLoaderError::NonUnitRhs { .. }));
    }

    #[test]
    fn test_rejects_malformed_bounds() {
        let source = TINY.replace(" UP BND       X1        1.0", " LO BND       X1        1.0");
        let err = MpsLoader::new().from_str::<f64>(&source).unwrap_err();
        assert!(matches!(err, MpsLoaderError::MalformedBoundsEntry { .. }));
    }

    #[test]
    fn test_rejects_missing_bounds_entry() {
        let source = TINY.replace(" UP BND       X2        1.0\n", "");
        let err = MpsLoader::new().from_str::<f64>(&source).unwrap_err();
        assert!(matches!(err, MpsLoaderError::BoundCountMismatch { .. }));
    }

    #[test]
    fn test_rejects_duplicate_row() {
        let source = TINY.replace(" E  R1", " E  R0");
        let err = MpsLoader::new().from_str::<f64>(&source).unwrap_err();
        assert!(matches!(err, MpsLoaderError::DuplicateRow { .. }));
    }

    #[test]
    fn test_rejects_unknown_row_in_columns() {
        let source = TINY.replace("X2        COST      1.0   R1   1.0", "X2        COST      1.0   R9   1.0");
        let err = MpsLoader::new().from_str::<f64>(&source).unwrap_err();
        assert!(matches!(err, MpsLoaderError::UnknownRow { .. }));
    }
}
