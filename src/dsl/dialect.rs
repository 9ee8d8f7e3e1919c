//! Surface-syntax dialects.
//!
//! Both dialects produce the same records; they differ only in how
//! directives, comments, subcircuit blocks and instances are spelled.

use std::fmt;
use std::str::FromStr;

use super::lexer::{is_identifier, is_terminal, Line};

/// Words that start a directive line in the Spectre dialect.
const SPECTRE_KEYWORDS: &[&str] = &[
    "global",
    "include",
    "ahdl_include",
    "parameters",
    "options",
    "save",
    "model",
    "real",
    "statistics",
    "library",
    "endlibrary",
    "section",
    "endsection",
];

/// Analysis words that make `<label> <analysis> ...` a Spectre directive.
const SPECTRE_ANALYSES: &[&str] = &["dc", "ac", "tran", "noise", "info", "options"];

/// A selectable surface syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// SPICE: dot directives, `*` comments, `X` instances
    #[default]
    Spice,
    /// Spectre: keyword directives, `//` comments, parenthesized instances
    Spectre,
}

/// Parsed subcircuit title line.
#[derive(Debug, Clone, PartialEq)]
pub struct SubcircuitTitle<'a> {
    pub name: &'a str,
    pub terminals: Vec<&'a str>,
}

/// Parsed instance line.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceParts<'a> {
    pub label: &'a str,
    pub nodes: Vec<&'a str>,
    pub subcircuit: &'a str,
}

impl Dialect {
    /// Parse a dialect from its `simulator lang` name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "spice" => Some(Self::Spice),
            "spectre" => Some(Self::Spectre),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Spice => "spice",
            Self::Spectre => "spectre",
        }
    }

    /// Recognize a `simulator lang = <dialect>` switch.
    ///
    /// The switch is spelled the same way in every dialect and may be
    /// written with or without blanks around `=`.
    pub fn parse_switch(line: &Line<'_>) -> Option<Dialect> {
        if line.word(0) != Some("simulator") {
            return None;
        }
        let rest: String = line.tokens[1..].iter().map(|t| t.text).collect();
        let name = rest.strip_prefix("lang=")?;
        Dialect::from_name(name)
    }

    /// Whether the line is a comment in this dialect.
    pub fn is_comment(&self, line: &Line<'_>) -> bool {
        let text = line.trimmed();
        match self {
            Self::Spice => text.starts_with('*'),
            Self::Spectre => text.starts_with("//") || text.starts_with('*'),
        }
    }

    /// Whether the line is a directive that does not alter topology.
    pub fn is_command(&self, line: &Line<'_>) -> bool {
        let Some(first) = line.word(0) else {
            return false;
        };
        match self {
            Self::Spice => {
                first.len() > 1
                    && first.starts_with('.')
                    && is_identifier(&first[1..])
                    && !self.opens_subcircuit(first)
                    && !self.closes_subcircuit(first)
            }
            Self::Spectre => {
                SPECTRE_KEYWORDS.contains(&first)
                    || (is_identifier(first)
                        && line
                            .word(1)
                            .map(|w| SPECTRE_ANALYSES.contains(&w))
                            .unwrap_or(false))
            }
        }
    }

    /// Whether the line's shape is claimed by a directive of this dialect,
    /// so that it must not be read as a component of unknown kind.
    pub fn reserves(&self, line: &Line<'_>) -> bool {
        let Some(first) = line.word(0) else {
            return false;
        };
        self.reserves_name(first) || (*self == Self::Spectre && self.is_command(line))
    }

    /// Whether `word` can never be a component designator in this dialect.
    pub fn reserves_name(&self, word: &str) -> bool {
        match self {
            Self::Spice => word.starts_with(['X', 'x']),
            Self::Spectre => {
                self.opens_subcircuit(word) || self.closes_subcircuit(word) || SPECTRE_KEYWORDS.contains(&word)
            }
        }
    }

    fn opens_subcircuit(&self, word: &str) -> bool {
        match self {
            Self::Spice => word.eq_ignore_ascii_case(".subckt"),
            Self::Spectre => word == "subckt",
        }
    }

    fn closes_subcircuit(&self, word: &str) -> bool {
        match self {
            Self::Spice => word.eq_ignore_ascii_case(".ends"),
            Self::Spectre => word == "ends",
        }
    }

    /// Recognize a subcircuit title line.
    pub fn subcircuit_title<'a>(&self, line: &Line<'a>) -> Option<SubcircuitTitle<'a>> {
        let first = line.word(0)?;
        if !self.opens_subcircuit(first) {
            return None;
        }
        let name = line.word(1).filter(|n| is_terminal(n))?;
        let rest: Vec<&str> = line.tokens[2..].iter().map(|t| t.text).collect();

        let mut terminals = match self {
            Self::Spice => rest,
            Self::Spectre => split_node_list(&rest, false)?,
        };

        // Trailing declared arity: `.subckt DIV in out 2`
        let declared_arity = *self == Self::Spice
            && matches!(
                terminals.split_last(),
                Some((last, head)) if !head.is_empty() && last.parse::<usize>().ok() == Some(head.len())
            );
        if declared_arity {
            terminals.pop();
        }

        if !terminals.iter().all(|t| is_terminal(t)) {
            return None;
        }

        Some(SubcircuitTitle { name, terminals })
    }

    /// Whether the line closes the subcircuit named `name`.
    ///
    /// A closing marker may repeat the subcircuit name; if it does, the
    /// name must match.
    pub fn closes(&self, line: &Line<'_>, name: &str) -> bool {
        match (line.word(0), line.tokens.len()) {
            (Some(first), 1) => self.closes_subcircuit(first),
            (Some(first), 2) => self.closes_subcircuit(first) && line.word(1) == Some(name),
            _ => false,
        }
    }

    /// Recognize a subcircuit instance line.
    pub fn instance<'a>(&self, line: &Line<'a>) -> Option<InstanceParts<'a>> {
        let words: Vec<&'a str> = line.tokens.iter().map(|t| t.text).collect();
        let (label, rest) = words.split_first()?;
        let (subcircuit, nodes) = rest.split_last()?;

        if !is_terminal(label) || !is_terminal(subcircuit) {
            return None;
        }

        let nodes = match self {
            Self::Spice => {
                if !label.starts_with(['X', 'x']) || label.len() < 2 {
                    return None;
                }
                nodes.to_vec()
            }
            Self::Spectre => split_node_list(nodes, true)?,
        };

        if !nodes.iter().all(|n| is_terminal(n)) {
            return None;
        }

        Some(InstanceParts {
            label,
            nodes,
            subcircuit,
        })
    }
}

/// Strip the parentheses of a Spectre node list such as `(a b)` or `( a b )`.
fn split_node_list<'a>(words: &[&'a str], required: bool) -> Option<Vec<&'a str>> {
    let opened = words.first().map(|w| w.starts_with('(')).unwrap_or(false);
    if !opened {
        return if required { None } else { Some(words.to_vec()) };
    }

    let last = words.last()?;
    if !last.ends_with(')') {
        return None;
    }

    let mut nodes = Vec::with_capacity(words.len());
    for (i, word) in words.iter().enumerate() {
        let mut w = *word;
        if i == 0 {
            w = &w[1..];
        }
        if i == words.len() - 1 {
            w = w.strip_suffix(')')?;
        }
        if !w.is_empty() {
            nodes.push(w);
        }
    }
    Some(nodes)
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::from_name(s).ok_or_else(|| format!("unknown dialect '{}' (expected spice or spectre)", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::Lexer;

    fn line(text: &str) -> Line<'_> {
        Lexer::new(text).next_line().unwrap()
    }

    #[test]
    fn test_switch() {
        assert_eq!(Dialect::parse_switch(&line("simulator lang = spectre")), Some(Dialect::Spectre));
        assert_eq!(Dialect::parse_switch(&line("simulator lang=spice")), Some(Dialect::Spice));
        assert_eq!(Dialect::parse_switch(&line("simulator lang = verilog")), None);
        assert_eq!(Dialect::parse_switch(&line("simulator mode = spice")), None);
    }

    #[test]
    fn test_spice_directives() {
        let d = Dialect::Spice;
        assert!(d.is_command(&line(".options reltol=1e-3")));
        assert!(d.is_command(&line(".end")));
        assert!(!d.is_command(&line(".subckt DIV in out")));
        assert!(!d.is_command(&line(".ENDS")));
        assert!(d.is_comment(&line("  * a comment")));
        assert!(!d.is_comment(&line("// not here")));
    }

    #[test]
    fn test_spectre_directives() {
        let d = Dialect::Spectre;
        assert!(d.is_command(&line("global gnd! vdd!")));
        assert!(d.is_command(&line("tran1 tran stop=1u")));
        assert!(d.reserves(&line("tran1 tran stop=1u")));
        assert!(d.reserves(&line("subckt amp (a b)")));
        assert!(!d.reserves(&line("R1 a b 1k")));
        assert!(d.reserves(&line("C1 dc 0 C")));
        assert!(!d.reserves_name("C1"));
        assert!(d.reserves_name("global"));
        assert!(d.is_comment(&line("// comment")));
    }

    #[test]
    fn test_subcircuit_titles() {
        let t = Dialect::Spice.subcircuit_title(&line(".subckt DIV in out")).unwrap();
        assert_eq!(t.name, "DIV");
        assert_eq!(t.terminals, vec!["in", "out"]);

        let t = Dialect::Spice.subcircuit_title(&line(".SUBCKT DIV in out 2")).unwrap();
        assert_eq!(t.terminals, vec!["in", "out"]);

        let t = Dialect::Spectre.subcircuit_title(&line("subckt amp (inp inn out)")).unwrap();
        assert_eq!(t.name, "amp");
        assert_eq!(t.terminals, vec!["inp", "inn", "out"]);

        let t = Dialect::Spectre.subcircuit_title(&line("subckt amp ( a b )")).unwrap();
        assert_eq!(t.terminals, vec!["a", "b"]);

        assert!(Dialect::Spectre.subcircuit_title(&line(".subckt DIV in out")).is_none());
    }

    #[test]
    fn test_closing_marker() {
        assert!(Dialect::Spice.closes(&line(".ends"), "DIV"));
        assert!(Dialect::Spice.closes(&line(".ends DIV"), "DIV"));
        assert!(!Dialect::Spice.closes(&line(".ends OTHER"), "DIV"));
        assert!(Dialect::Spectre.closes(&line("ends amp"), "amp"));
    }

    #[test]
    fn test_instances() {
        let i = Dialect::Spice.instance(&line("X1 n1 n2 DIV")).unwrap();
        assert_eq!(i.label, "X1");
        assert_eq!(i.nodes, vec!["n1", "n2"]);
        assert_eq!(i.subcircuit, "DIV");
        assert!(Dialect::Spice.instance(&line("Q1 n1 n2 DIV")).is_none());

        let i = Dialect::Spectre.instance(&line("I3 (a b c) amp")).unwrap();
        assert_eq!(i.label, "I3");
        assert_eq!(i.nodes, vec!["a", "b", "c"]);
        assert_eq!(i.subcircuit, "amp");
        assert!(Dialect::Spectre.instance(&line("I3 a b amp")).is_none());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("SPECTRE".parse::<Dialect>(), Ok(Dialect::Spectre));
        assert!("hspice".parse::<Dialect>().is_err());
    }
}
