//! Sparse symbolic MNA matrix.

use std::collections::BTreeMap;
use std::fmt;

use crate::components::StampEntry;
use crate::error::{Result, SymnaError};
use crate::symbolic::Expr;

/// Square symbolic matrix over the unknown space.
///
/// Rows and columns are addressed by unknown index: `1..=size`, where
/// nodes come first and auxiliary unknowns follow. Index 0 is the ground
/// reference; writes to row or column 0 are discarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolicMatrix {
    size: usize,
    entries: BTreeMap<(usize, usize), Expr>,
}

impl SymbolicMatrix {
    /// Create an all-zero matrix of dimension `size`.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            entries: BTreeMap::new(),
        }
    }

    /// Matrix dimension.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Add `term` to entry `(row, col)`.
    pub fn add(&mut self, row: usize, col: usize, term: Expr) {
        if row == 0 || col == 0 || term.is_zero() {
            return;
        }
        debug_assert!(row <= self.size && col <= self.size, "({}, {}) outside {}", row, col, self.size);
        let cell = self.entries.entry((row, col)).or_default();
        *cell += term;
        if cell.is_zero() {
            self.entries.remove(&(row, col));
        }
    }

    /// Add every entry of a component's stamp.
    pub fn apply(&mut self, component: &str, stamp: Vec<StampEntry>) -> Result<()> {
        for entry in stamp {
            if entry.row > self.size || entry.col > self.size {
                return Err(SymnaError::not_stampable(
                    component,
                    format!("entry ({}, {}) outside {}x{} matrix", entry.row, entry.col, self.size, self.size),
                ));
            }
            self.add(entry.row, entry.col, entry.term);
        }
        Ok(())
    }

    /// Entry at `(row, col)`, or `None` if it is zero.
    pub fn get(&self, row: usize, col: usize) -> Option<&Expr> {
        self.entries.get(&(row, col))
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Non-zero entries in row-major order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, &Expr)> {
        self.entries.iter().map(|(&(r, c), e)| (r, c, e))
    }
}

impl fmt::Display for SymbolicMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, col, term) in self.entries() {
            writeln!(f, "M[{},{}] = {}", row, col, term)?;
        }
        Ok(())
    }
}
