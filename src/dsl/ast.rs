//! Records produced by the netlist grammar.

use super::Dialect;

/// Component kinds recognized by the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    /// Resistor
    Resistor,
    /// Capacitor
    Capacitor,
    /// Inductor
    Inductor,
    /// Independent voltage source
    VoltageSource,
    /// Independent current source
    CurrentSource,
    /// Ideal operational amplifier
    Opamp,
    /// Voltage-controlled voltage source
    Vcvs,
    /// Current-controlled voltage source
    Ccvs,
    /// Voltage-controlled current source
    Vccs,
    /// Current-controlled current source
    Cccs,
    /// External port (reserved, contributes nothing)
    Port,
}

impl ComponentKind {
    /// All kinds in declaration order.
    pub const ALL: [ComponentKind; 11] = [
        Self::Resistor,
        Self::Capacitor,
        Self::Inductor,
        Self::VoltageSource,
        Self::CurrentSource,
        Self::Opamp,
        Self::Vcvs,
        Self::Ccvs,
        Self::Vccs,
        Self::Cccs,
        Self::Port,
    ];

    /// Parse a component kind from its designator letter.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'R' => Some(Self::Resistor),
            'C' => Some(Self::Capacitor),
            'L' => Some(Self::Inductor),
            'V' => Some(Self::VoltageSource),
            'I' => Some(Self::CurrentSource),
            'O' => Some(Self::Opamp),
            'E' => Some(Self::Vcvs),
            'F' => Some(Self::Ccvs),
            'G' => Some(Self::Vccs),
            'H' => Some(Self::Cccs),
            'P' => Some(Self::Port),
            _ => None,
        }
    }

    /// Designator letter for this kind.
    pub fn letter(&self) -> char {
        match self {
            Self::Resistor => 'R',
            Self::Capacitor => 'C',
            Self::Inductor => 'L',
            Self::VoltageSource => 'V',
            Self::CurrentSource => 'I',
            Self::Opamp => 'O',
            Self::Vcvs => 'E',
            Self::Ccvs => 'F',
            Self::Vccs => 'G',
            Self::Cccs => 'H',
            Self::Port => 'P',
        }
    }

    /// Get the expected number of terminals for this component kind.
    pub fn terminal_count(&self) -> usize {
        match self {
            Self::Resistor | Self::Capacitor | Self::Inductor => 2,
            Self::VoltageSource | Self::CurrentSource => 2,
            Self::Opamp => 3, // in+, in-, out
            Self::Vcvs | Self::Ccvs | Self::Vccs | Self::Cccs => 4, // out+, out-, ctrl+, ctrl-
            Self::Port => 2,
        }
    }
}

/// One recognized unit of netlist input.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// A component line
    Component(ComponentLine),
    /// A directive that does not alter topology
    Command(CommandLine),
    /// A comment line
    Comment(CommentLine),
    /// A complete subcircuit definition block
    Subcircuit(SubcircuitDef),
    /// A subcircuit instantiation
    Instance(InstanceLine),
}

impl Record {
    /// Source line number where this record starts.
    pub fn line(&self) -> usize {
        match self {
            Record::Component(c) => c.line,
            Record::Command(c) => c.line,
            Record::Comment(c) => c.line,
            Record::Subcircuit(s) => s.line,
            Record::Instance(i) => i.line,
        }
    }
}

/// A component line: `<kind-letter><name> <terminal>... <value>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentLine {
    /// Kind letter (upper-cased)
    pub kind: char,
    /// Designator as written, including the kind letter (e.g. `R1`)
    pub name: String,
    /// Terminal net names in order
    pub nodes: Vec<String>,
    /// Raw value token
    pub value: String,
    /// Source line number for error reporting
    pub line: usize,
}

/// A directive line, kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandLine {
    /// Directive keyword (e.g. `.options`, `global`)
    pub keyword: String,
    /// Remaining words of the line
    pub args: Vec<String>,
    /// Full trimmed line text
    pub text: String,
    /// Dialect the line was read under
    pub dialect: Dialect,
    /// Source line number
    pub line: usize,
}

/// A comment line.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentLine {
    /// Full trimmed line text including the comment marker
    pub text: String,
    /// Source line number
    pub line: usize,
}

/// A subcircuit definition block.
#[derive(Debug, Clone, PartialEq)]
pub struct SubcircuitDef {
    /// Subcircuit name
    pub name: String,
    /// Ordered terminal names
    pub terminals: Vec<String>,
    /// Body records (components, commands and comments only)
    pub body: Vec<Record>,
    /// Line of the title
    pub line: usize,
}

impl SubcircuitDef {
    /// Component lines of the body, in order.
    pub fn components(&self) -> impl Iterator<Item = &ComponentLine> {
        self.body.iter().filter_map(|r| match r {
            Record::Component(c) => Some(c),
            _ => None,
        })
    }
}

/// A subcircuit instantiation.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceLine {
    /// Instance label (e.g. `X1`)
    pub label: String,
    /// Caller-supplied nodes, matched positionally to the definition's terminals
    pub nodes: Vec<String>,
    /// Name of the referenced definition
    pub subcircuit: String,
    /// Source line number
    pub line: usize,
}
