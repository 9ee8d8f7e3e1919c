//! Controlled source models: VCVS (E), CCVS (F), VCCS (G), CCCS (H).
//!
//! Node order for all four is `[out+, out-, ctrl+, ctrl-]`. The value is
//! the gain, transresistance, transconductance or current gain.

use super::StampEntry;
use crate::symbolic::Expr;

// ────────────────────── VCVS (E element) ──────────────────────

/// Voltage-controlled voltage source with branch row `k`.
///
/// V(out+, out-) = A * V(ctrl+, ctrl-)
pub fn vcvs_stamp(n: [usize; 4], a: &Expr, k: usize) -> Vec<StampEntry> {
    vec![
        StampEntry::new(k, n[0], Expr::one()),
        StampEntry::new(n[0], k, Expr::one()),
        StampEntry::new(k, n[1], -Expr::one()),
        StampEntry::new(n[1], k, -Expr::one()),
        StampEntry::new(k, n[2], -a.clone()),
        StampEntry::new(k, n[3], a.clone()),
    ]
}

// ────────────────────── CCVS (F element) ──────────────────────

/// Current-controlled voltage source with rows `k` (output branch) and
/// `k + 1` (controlling branch).
///
/// The controlling port is a zero-volt branch between `ctrl+` and `ctrl-`
/// whose current enters the output equation through the transresistance.
pub fn ccvs_stamp(n: [usize; 4], r: &Expr, k: usize) -> Vec<StampEntry> {
    let kc = k + 1;
    vec![
        StampEntry::new(k, n[0], Expr::one()),
        StampEntry::new(n[0], kc, Expr::one()),
        StampEntry::new(k, n[1], -Expr::one()),
        StampEntry::new(n[1], kc, -Expr::one()),
        StampEntry::new(kc, n[2], Expr::one()),
        StampEntry::new(n[2], k, Expr::one()),
        StampEntry::new(kc, n[3], -Expr::one()),
        StampEntry::new(n[3], k, -Expr::one()),
        StampEntry::new(k, k, -r.clone()),
    ]
}

// ────────────────────── VCCS (G element) ──────────────────────

/// Voltage-controlled current source; needs no auxiliary unknown.
///
/// I(out+ -> out-) = gm * V(ctrl+, ctrl-), written with the sign convention
/// of current injected into `out+`.
pub fn vccs_stamp(n: [usize; 4], gm: &Expr) -> Vec<StampEntry> {
    vec![
        StampEntry::new(n[0], n[2], -gm.clone()),
        StampEntry::new(n[0], n[3], gm.clone()),
        StampEntry::new(n[1], n[2], gm.clone()),
        StampEntry::new(n[1], n[3], -gm.clone()),
    ]
}

// ────────────────────── CCCS (H element) ──────────────────────

/// Current-controlled current source with controlling-branch row `k`.
///
/// I(out) = beta * I(ctrl), where I(ctrl) flows through a zero-volt branch
/// between `ctrl+` and `ctrl-`.
pub fn cccs_stamp(n: [usize; 4], beta: &Expr, k: usize) -> Vec<StampEntry> {
    vec![
        StampEntry::new(n[0], k, beta.clone()),
        StampEntry::new(n[1], k, -beta.clone()),
        StampEntry::new(k, n[2], Expr::one()),
        StampEntry::new(n[2], k, Expr::one()),
        StampEntry::new(k, n[3], -Expr::one()),
        StampEntry::new(n[3], k, -Expr::one()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(entries: &[StampEntry]) -> Vec<(usize, usize, String)> {
        entries.iter().map(|e| (e.row, e.col, e.term.to_string())).collect()
    }

    #[test]
    fn test_vcvs_pattern() {
        let got = cells(&vcvs_stamp([1, 2, 3, 4], &Expr::symbol("A"), 7));
        let want: Vec<(usize, usize, &str)> = vec![
            (7, 1, "1"),
            (1, 7, "1"),
            (7, 2, "-1"),
            (2, 7, "-1"),
            (7, 3, "-A"),
            (7, 4, "A"),
        ];
        assert_eq!(got, want.into_iter().map(|(r, c, t)| (r, c, t.to_string())).collect::<Vec<_>>());
    }

    #[test]
    fn test_ccvs_uses_two_rows() {
        let got = cells(&ccvs_stamp([1, 2, 3, 4], &Expr::symbol("r"), 7));
        let want: Vec<(usize, usize, &str)> = vec![
            (7, 1, "1"),
            (1, 8, "1"),
            (7, 2, "-1"),
            (2, 8, "-1"),
            (8, 3, "1"),
            (3, 7, "1"),
            (8, 4, "-1"),
            (4, 7, "-1"),
            (7, 7, "-r"),
        ];
        assert_eq!(got, want.into_iter().map(|(r, c, t)| (r, c, t.to_string())).collect::<Vec<_>>());
    }

    #[test]
    fn test_vccs_pattern() {
        let got = cells(&vccs_stamp([1, 2, 3, 4], &Expr::symbol("gm")));
        assert_eq!(
            got,
            vec![
                (1, 3, "-gm".to_string()),
                (1, 4, "gm".to_string()),
                (2, 3, "gm".to_string()),
                (2, 4, "-gm".to_string()),
            ]
        );
    }

    #[test]
    fn test_cccs_pattern() {
        let entries = cccs_stamp([1, 2, 3, 4], &Expr::Num(2.0), 6);
        assert_eq!(
            entries,
            vec![
                StampEntry::new(1, 6, Expr::Num(2.0)),
                StampEntry::new(2, 6, Expr::Num(-2.0)),
                StampEntry::new(6, 3, Expr::one()),
                StampEntry::new(3, 6, Expr::one()),
                StampEntry::new(6, 4, Expr::Num(-1.0)),
                StampEntry::new(4, 6, Expr::Num(-1.0)),
            ]
        );
    }
}
