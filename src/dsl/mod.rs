//! Netlist grammar.
//!
//! This module reads SPICE-like netlist text into a sequence of
//! [`Record`]s. The language is line-oriented and blank-separated.
//!
//! # Grammar Overview
//!
//! ```text
//! netlist     = { line }
//! line        = switch | component | command | comment | subckt | instance | empty
//! switch      = "simulator" "lang" "=" ("spice" | "spectre")
//! component   = kind name terminal{n} value
//! subckt      = title { component | command | comment } close
//!
//! kind        = letter            (n fixed per kind, see below)
//! terminal    = (alnum | '-' | ':' | '_' | '!')+
//! value       = number [unit_suffix] | symbol
//! number      = ['-'|'+'] digit* ['.' digit*] [('e'|'E') ['-'|'+'] digit+]
//! unit_suffix = 'p' | 'n' | 'u' | 'm' | 'k' | 'M' | 'G'
//! ```
//!
//! # Component Kinds
//!
//! | Letter | Kind | Terminals |
//! |--------|------|-----------|
//! | R, C, L | Resistor, Capacitor, Inductor | `n+ n-` |
//! | V, I | Voltage / current source | `n+ n-` |
//! | O | Ideal op-amp | `in+ in- out` |
//! | E | VCVS | `out+ out- ctrl+ ctrl-` |
//! | F | CCVS | `out+ out- ctrl+ ctrl-` |
//! | G | VCCS | `out+ out- ctrl+ ctrl-` |
//! | H | CCCS | `out+ out- ctrl+ ctrl-` |
//! | P | Port | `n+ n-` |
//!
//! # Dialects
//!
//! | Record | Spice | Spectre |
//! |--------|-------|---------|
//! | comment | `* ...` | `// ...` or `* ...` |
//! | command | `.options ...` | `global ...`, `tran1 tran ...` |
//! | subcircuit | `.subckt NAME a b` ... `.ends` | `subckt NAME (a b)` ... `ends NAME` |
//! | instance | `X1 n1 n2 NAME` | `I1 (n1 n2) NAME` |
//!
//! # Example
//!
//! ```text
//! * RC divider
//! .subckt DIV in out
//! R1 in out R
//! C1 out gnd! C
//! .ends
//! V1 a 0 1
//! X1 a b DIV
//! ```

mod ast;
mod dialect;
mod lexer;
mod parser;

pub use ast::*;
pub use dialect::{Dialect, InstanceParts, SubcircuitTitle};
pub use lexer::{is_numeric_literal, is_terminal, parse_value, Lexer, Line, Token};
pub use parser::Parser;

use crate::error::Result;

/// Parse netlist text starting in the given dialect.
pub fn parse(input: &str, dialect: Dialect) -> Result<Vec<Record>> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer, dialect);
    parser.parse()
}
