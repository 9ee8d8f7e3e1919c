//! Linear passive components: Resistor, Capacitor, Inductor.
//!
//! All three are stamped as a symbolic impedance `Z` with its branch
//! current as an auxiliary unknown `i`:
//!
//! ```text
//! row n+ :  ... + i         (current leaves n+)
//! row n- :  ... - i
//! row k  :  Z*V(n+) - Z*V(n-) - i = 0
//! ```
//!
//! The impedance value stays symbolic, so the same stamp serves `R`, `1/sC`
//! and `sL` once a caller substitutes the Laplace form.

use super::StampEntry;
use crate::symbolic::Expr;

/// Stamp of a two-terminal impedance with value `z` and branch row `k`.
pub fn impedance_stamp(n: [usize; 2], z: &Expr, k: usize) -> Vec<StampEntry> {
    vec![
        StampEntry::new(k, n[0], z.clone()),
        StampEntry::new(n[0], k, Expr::one()),
        StampEntry::new(k, n[1], -z.clone()),
        StampEntry::new(n[1], k, -Expr::one()),
        StampEntry::new(k, k, -Expr::one()),
    ]
}
