//! Symbolic scalar expressions.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use crate::dsl::parse_value;

/// A numeric-or-symbolic scalar.
///
/// Expressions are built from numbers and named symbols with addition,
/// negation and multiplication. Construction folds constants, drops
/// neutral elements and cancels a term against its exact negation, so
/// `0 + R` is `R`, `1 * R` is `R` and `R + -R` is `0`. No further
/// simplification is attempted.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric constant
    Num(f64),
    /// Named symbolic unknown
    Sym(String),
    /// Negation of a subexpression
    Neg(Box<Expr>),
    /// Sum of two or more terms
    Sum(Vec<Expr>),
    /// Product of two or more factors
    Product(Vec<Expr>),
}

impl Expr {
    /// The constant zero.
    pub fn zero() -> Self {
        Expr::Num(0.0)
    }

    /// The constant one.
    pub fn one() -> Self {
        Expr::Num(1.0)
    }

    /// A named symbol.
    pub fn symbol(name: impl Into<String>) -> Self {
        Expr::Sym(name.into())
    }

    /// Interpret a netlist value token.
    ///
    /// Tokens matching the numeric literal pattern (with an optional SI
    /// suffix such as `10k`) become numbers, anything else a named symbol.
    pub fn parse(token: &str) -> Self {
        match parse_value(token) {
            Some(v) => Expr::Num(v),
            None => Expr::Sym(token.to_string()),
        }
    }

    /// Numeric value, if this expression is a constant.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Expr::Num(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Num(v) if *v == 0.0)
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Num(v) if *v == 1.0)
    }

    /// Names of all symbols referenced by this expression.
    pub fn symbols(&self) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        match self {
            Expr::Num(_) => {}
            Expr::Sym(name) => {
                out.insert(name.as_str());
            }
            Expr::Neg(inner) => inner.collect_symbols(out),
            Expr::Sum(terms) | Expr::Product(terms) => {
                for t in terms {
                    t.collect_symbols(out);
                }
            }
        }
    }

    fn into_terms(self) -> Vec<Expr> {
        match self {
            Expr::Sum(terms) => terms,
            other => vec![other],
        }
    }

    fn into_factors(self) -> Vec<Expr> {
        match self {
            Expr::Product(factors) => factors,
            other => vec![other],
        }
    }
}

impl Default for Expr {
    fn default() -> Self {
        Expr::zero()
    }
}

impl From<f64> for Expr {
    fn from(v: f64) -> Self {
        Expr::Num(v)
    }
}

impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        match (self, rhs) {
            (Expr::Num(a), Expr::Num(b)) => Expr::Num(a + b),
            (a, b) if a.is_zero() => b,
            (a, b) if b.is_zero() => a,
            (a, b) => {
                let mut terms = a.into_terms();
                for term in b.into_terms() {
                    let negated = -term.clone();
                    match terms.iter().position(|t| *t == negated) {
                        Some(i) => {
                            terms.remove(i);
                        }
                        None => terms.push(term),
                    }
                }
                match terms.len() {
                    0 => Expr::zero(),
                    1 => terms.remove(0),
                    _ => Expr::Sum(terms),
                }
            }
        }
    }
}

impl AddAssign for Expr {
    fn add_assign(&mut self, rhs: Expr) {
        let lhs = std::mem::take(self);
        *self = lhs + rhs;
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        match self {
            Expr::Num(v) => Expr::Num(-v),
            Expr::Neg(inner) => *inner,
            other => Expr::Neg(Box::new(other)),
        }
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        self + (-rhs)
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        match (self, rhs) {
            (Expr::Num(a), Expr::Num(b)) => Expr::Num(a * b),
            (a, b) if a.is_zero() || b.is_zero() => Expr::zero(),
            (a, b) if a.is_one() => b,
            (a, b) if b.is_one() => a,
            (Expr::Num(v), b) if v == -1.0 => -b,
            (a, Expr::Num(v)) if v == -1.0 => -a,
            (Expr::Neg(a), b) => -(*a * b),
            (a, Expr::Neg(b)) => -(a * *b),
            (a, b) => {
                let mut factors = a.into_factors();
                factors.extend(b.into_factors());
                Expr::Product(factors)
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(v) => write!(f, "{}", v),
            Expr::Sym(name) => write!(f, "{}", name),
            Expr::Neg(inner) => match inner.as_ref() {
                Expr::Sum(_) => write!(f, "-({})", inner),
                _ => write!(f, "-{}", inner),
            },
            Expr::Sum(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    match (i, term) {
                        (0, _) => write!(f, "{}", term)?,
                        (_, Expr::Neg(inner)) => write!(f, " - {}", Parenthesized(inner))?,
                        (_, Expr::Num(v)) if *v < 0.0 => write!(f, " - {}", -v)?,
                        _ => write!(f, " + {}", term)?,
                    }
                }
                Ok(())
            }
            Expr::Product(factors) => {
                for (i, factor) in factors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "*")?;
                    }
                    write!(f, "{}", Parenthesized(factor))?;
                }
                Ok(())
            }
        }
    }
}

/// Wraps sums and negations in parentheses when printed as an operand.
struct Parenthesized<'a>(&'a Expr);

impl fmt::Display for Parenthesized<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Expr::Sum(_) | Expr::Neg(_) => write!(f, "({})", self.0),
            other => write!(f, "{}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_and_symbolic() {
        assert_eq!(Expr::parse("100"), Expr::Num(100.0));
        assert_eq!(Expr::parse("-2.5"), Expr::Num(-2.5));
        assert_eq!(Expr::parse("R"), Expr::symbol("R"));
        assert_eq!(Expr::parse("R_load"), Expr::symbol("R_load"));
        let k = Expr::parse("1k").as_number().unwrap();
        approx::assert_relative_eq!(k, 1000.0);
    }

    #[test]
    fn test_constant_folding() {
        assert_eq!(Expr::from(2.0) + Expr::from(3.0), Expr::Num(5.0));
        assert_eq!(Expr::zero() + Expr::symbol("R"), Expr::symbol("R"));
        assert_eq!(Expr::one() * Expr::symbol("R"), Expr::symbol("R"));
        assert!((Expr::zero() * Expr::symbol("R")).is_zero());
        assert_eq!(-(-Expr::symbol("R")), Expr::symbol("R"));
        assert_eq!(Expr::from(-1.0) * Expr::symbol("g"), -Expr::symbol("g"));
    }

    #[test]
    fn test_add_assign_accumulates() {
        let mut e = Expr::zero();
        e += Expr::symbol("a");
        e += -Expr::symbol("b");
        e += Expr::one();
        assert_eq!(e.to_string(), "a - b + 1");
    }

    #[test]
    fn test_opposite_terms_cancel() {
        let r = Expr::symbol("R");
        assert!((r.clone() + -r.clone()).is_zero());
        assert!((r.clone() - r.clone()).is_zero());

        let mut e = Expr::symbol("a") + r.clone();
        e += -r;
        assert_eq!(e, Expr::symbol("a"));

        let g = Expr::symbol("g") * Expr::symbol("h");
        let sum = Expr::symbol("x") + g.clone() - Expr::symbol("x");
        assert_eq!(sum, g);
    }

    #[test]
    fn test_display_products() {
        let e = Expr::symbol("A") * (Expr::symbol("x") + Expr::symbol("y"));
        assert_eq!(e.to_string(), "A*(x + y)");
        let n = -(Expr::symbol("g") * Expr::symbol("h"));
        assert_eq!(n.to_string(), "-g*h");
    }

    #[test]
    fn test_symbols() {
        let e = Expr::symbol("R1") * Expr::symbol("C1") - Expr::symbol("R1");
        let names: Vec<_> = e.symbols().into_iter().collect();
        assert_eq!(names, vec!["C1", "R1"]);
    }
}
