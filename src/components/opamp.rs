//! Operational Amplifier model.
//!
//! The op-amp is ideal (nullor): its auxiliary row forces `V+ = V-` and its
//! auxiliary unknown is the current delivered into the output node.

use super::StampEntry;
use crate::symbolic::Expr;

/// Stamp of an ideal op-amp with nodes `[in+, in-, out]` and output-current row `k`.
pub fn opamp_stamp(n: [usize; 3], k: usize) -> Vec<StampEntry> {
    vec![
        StampEntry::new(k, n[0], Expr::one()),
        StampEntry::new(k, n[1], -Expr::one()),
        StampEntry::new(n[2], k, Expr::one()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opamp_pattern() {
        let entries = opamp_stamp([1, 2, 3], 5);
        assert_eq!(
            entries,
            vec![
                StampEntry::new(5, 1, Expr::Num(1.0)),
                StampEntry::new(5, 2, Expr::Num(-1.0)),
                StampEntry::new(3, 5, Expr::Num(1.0)),
            ]
        );
    }
}
