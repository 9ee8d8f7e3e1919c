//! Voltage and current sources.

use super::StampEntry;
use crate::symbolic::Expr;

/// Stamp of an independent voltage source with branch row `k`.
///
/// The source enforces `V(n+) - V(n-) = E`; the value `E` itself belongs to
/// the right-hand side and is not part of the matrix.
pub fn voltage_source_stamp(n: [usize; 2], k: usize) -> Vec<StampEntry> {
    vec![
        StampEntry::new(k, n[0], Expr::one()),
        StampEntry::new(n[0], k, Expr::one()),
        StampEntry::new(k, n[1], -Expr::one()),
        StampEntry::new(n[1], k, -Expr::one()),
    ]
}

/// An independent current source leaves the matrix unchanged.
pub fn current_source_stamp(_n: [usize; 2]) -> Vec<StampEntry> {
    Vec::new()
}
