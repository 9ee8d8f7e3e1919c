//! Symbolic values used for component values and matrix entries.
//!
//! Component values may be plain numbers (`100`, `4.7k`) or named unknowns
//! (`R`, `gm`). Both are represented by [`Expr`], which supports the
//! addition, negation and multiplication needed to accumulate stamps.

mod expr;

pub use expr::Expr;
