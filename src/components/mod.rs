//! Component models and their MNA stamps.
//!
//! This module provides the typed circuit elements of a flattened netlist:
//! - Linear: Resistor, Capacitor, Inductor (symbolic impedances)
//! - Sources: Voltage Source, Current Source
//! - Op-Amp (ideal, nullor model)
//! - Controlled sources: VCVS, CCVS, VCCS, CCCS
//! - Port (reserved, no stamp)
//!
//! Stamps are pure functions of a component's kind, resolved node indices,
//! value and auxiliary offset. They return the list of entries to add to
//! the global matrix rather than writing it directly.

mod controlled;
mod linear;
mod opamp;
mod sources;

pub use controlled::{cccs_stamp, ccvs_stamp, vccs_stamp, vcvs_stamp};
pub use linear::impedance_stamp;
pub use opamp::opamp_stamp;
pub use sources::{current_source_stamp, voltage_source_stamp};

use std::fmt;

use crate::circuit::{NodeId, NodeMap};
pub use crate::dsl::ComponentKind;
use crate::dsl::ComponentLine;
use crate::error::{Result, SymnaError};
use crate::symbolic::Expr;

/// One additive matrix contribution: `M[row, col] += term`.
#[derive(Debug, Clone, PartialEq)]
pub struct StampEntry {
    pub row: usize,
    pub col: usize,
    pub term: Expr,
}

impl StampEntry {
    pub fn new(row: usize, col: usize, term: Expr) -> Self {
        Self { row, col, term }
    }
}

/// Groups of kinds that own auxiliary unknowns.
///
/// Each category has its own block of contiguous auxiliary rows, laid out
/// after the node block in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Resistors, capacitors and inductors
    Impedance,
    /// Independent voltage sources
    VoltageSource,
    /// Ideal op-amps
    Opamp,
    /// Voltage-controlled voltage sources
    Vcvs,
    /// Current-controlled voltage sources
    Ccvs,
    /// Current-controlled current sources
    Cccs,
}

impl Category {
    /// Number of categories.
    pub const COUNT: usize = 6;

    /// All categories in block order.
    pub const ALL: [Category; Self::COUNT] = [
        Self::Impedance,
        Self::VoltageSource,
        Self::Opamp,
        Self::Vcvs,
        Self::Ccvs,
        Self::Cccs,
    ];

    /// Auxiliary unknowns owned by each member of this category.
    pub fn mna_size(&self) -> usize {
        match self {
            Self::Ccvs => 2,
            _ => 1,
        }
    }
}

impl ComponentKind {
    /// Auxiliary-unknown category, or `None` for kinds without auxiliary unknowns.
    pub fn category(&self) -> Option<Category> {
        match self {
            Self::Resistor | Self::Capacitor | Self::Inductor => Some(Category::Impedance),
            Self::VoltageSource => Some(Category::VoltageSource),
            Self::Opamp => Some(Category::Opamp),
            Self::Vcvs => Some(Category::Vcvs),
            Self::Ccvs => Some(Category::Ccvs),
            Self::Cccs => Some(Category::Cccs),
            Self::CurrentSource | Self::Vccs | Self::Port => None,
        }
    }

    /// Number of auxiliary unknowns an instance of this kind contributes.
    pub fn mna_size(&self) -> usize {
        self.category().map(|c| c.mna_size()).unwrap_or(0)
    }

    /// Label suffixes of the auxiliary unknowns, in offset order.
    pub fn aux_suffixes(&self) -> &'static [&'static str] {
        match self {
            Self::Opamp => &[".out"],
            Self::Ccvs => &[".p", ".cp"],
            Self::CurrentSource | Self::Vccs | Self::Port => &[],
            _ => &[".p"],
        }
    }
}

/// A circuit component.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    kind: ComponentKind,
    name: String,
    nodes: Vec<String>,
    value: Expr,
    /// Node indices, filled in by [`Component::resolve_nodes`]
    node_ids: Vec<NodeId>,
}

impl Component {
    /// Create a component with unresolved nodes.
    pub fn new(kind: ComponentKind, name: impl Into<String>, nodes: Vec<String>, value: Expr) -> Self {
        debug_assert_eq!(nodes.len(), kind.terminal_count());
        Self {
            kind,
            name: name.into(),
            nodes,
            value,
            node_ids: Vec::new(),
        }
    }

    /// Create a component from a grammar record.
    ///
    /// Fails with [`SymnaError::UnknownComponentKind`] if the kind letter is
    /// not recognized.
    pub fn from_line(line: &ComponentLine) -> Result<Self> {
        let kind = ComponentKind::from_letter(line.kind).ok_or_else(|| SymnaError::UnknownComponentKind {
            kind: line.kind,
            name: line.name.clone(),
            line: line.line,
        })?;
        Ok(Self::new(kind, line.name.clone(), line.nodes.clone(), Expr::parse(&line.value)))
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Net names in terminal order.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Resolved node indices; empty until [`Component::resolve_nodes`] runs.
    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_ids
    }

    pub fn value(&self) -> &Expr {
        &self.value
    }

    /// Number of auxiliary unknowns this component contributes.
    pub fn mna_size(&self) -> usize {
        self.kind.mna_size()
    }

    /// Replace the net names (used during subcircuit expansion).
    pub fn set_nodes(&mut self, nodes: Vec<String>) {
        self.nodes = nodes;
        self.node_ids.clear();
    }

    /// Prefix the component name, e.g. with `X1/`.
    pub fn prepend_name(&mut self, prefix: &str) {
        self.name.insert_str(0, prefix);
    }

    /// Register this component's nets with the node map and record their indices.
    pub fn resolve_nodes(&mut self, map: &mut NodeMap) {
        self.node_ids = self.nodes.iter().map(|n| map.resolve(n)).collect();
    }

    /// Labels of the auxiliary unknowns owned by this component.
    pub fn aux_names(&self) -> Vec<String> {
        self.kind
            .aux_suffixes()
            .iter()
            .map(|s| format!("{}{}", self.name, s))
            .collect()
    }

    /// Compute this component's stamp.
    ///
    /// `offset` is the first auxiliary unknown assigned to the component;
    /// it is required when [`Component::mna_size`] is non-zero.
    pub fn stamp(&self, offset: Option<usize>) -> Result<Vec<StampEntry>> {
        if self.node_ids.len() != self.kind.terminal_count() {
            return Err(SymnaError::not_stampable(&self.name, "nodes are not resolved"));
        }
        let n: Vec<usize> = self.node_ids.iter().map(NodeId::index).collect();
        let v = &self.value;

        let aux = || {
            offset.ok_or_else(|| SymnaError::not_stampable(&self.name, "no auxiliary offset assigned"))
        };

        let entries = match self.kind {
            ComponentKind::Resistor | ComponentKind::Capacitor | ComponentKind::Inductor => {
                impedance_stamp([n[0], n[1]], v, aux()?)
            }
            ComponentKind::VoltageSource => voltage_source_stamp([n[0], n[1]], aux()?),
            ComponentKind::CurrentSource => current_source_stamp([n[0], n[1]]),
            ComponentKind::Opamp => opamp_stamp([n[0], n[1], n[2]], aux()?),
            ComponentKind::Vcvs => vcvs_stamp([n[0], n[1], n[2], n[3]], v, aux()?),
            ComponentKind::Ccvs => ccvs_stamp([n[0], n[1], n[2], n[3]], v, aux()?),
            ComponentKind::Vccs => vccs_stamp([n[0], n[1], n[2], n[3]], v),
            ComponentKind::Cccs => cccs_stamp([n[0], n[1], n[2], n[3]], v, aux()?),
            ComponentKind::Port => Vec::new(),
        };
        Ok(entries)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for node in &self.nodes {
            write!(f, " {}", node)?;
        }
        write!(f, " {}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(kind: char, name: &str, nodes: &[&str], value: &str) -> ComponentLine {
        ComponentLine {
            kind,
            name: name.to_string(),
            nodes: nodes.iter().map(|n| n.to_string()).collect(),
            value: value.to_string(),
            line: 1,
        }
    }

    #[test]
    fn test_mna_sizes() {
        use ComponentKind::*;
        let sizes: Vec<usize> = ComponentKind::ALL.iter().map(|k| k.mna_size()).collect();
        // R C L V I O E F G H P
        assert_eq!(sizes, vec![1, 1, 1, 1, 0, 1, 1, 2, 0, 1, 0]);
        assert_eq!(Ccvs.aux_suffixes(), &[".p", ".cp"]);
        assert_eq!(Opamp.aux_suffixes(), &[".out"]);
    }

    #[test]
    fn test_from_line() {
        let c = Component::from_line(&line('R', "R1", &["a", "b"], "R")).unwrap();
        assert_eq!(c.kind(), ComponentKind::Resistor);
        assert_eq!(c.name(), "R1");
        assert_eq!(c.value(), &Expr::symbol("R"));
        assert_eq!(c.to_string(), "R1 a b R");

        let v = Component::from_line(&line('V', "V1", &["a", "0"], "5")).unwrap();
        assert_eq!(v.value(), &Expr::Num(5.0));
    }

    #[test]
    fn test_unknown_kind() {
        let err = Component::from_line(&line('Q', "Q", &["a", "b"], "1")).unwrap_err();
        assert!(matches!(err, SymnaError::UnknownComponentKind { kind: 'Q', .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_stamp_requires_resolution_and_offset() {
        let mut c = Component::from_line(&line('V', "V1", &["a", "0"], "5")).unwrap();
        assert!(matches!(c.stamp(Some(3)), Err(SymnaError::NotStampable { .. })));

        let mut map = NodeMap::new();
        c.resolve_nodes(&mut map);
        assert_eq!(c.node_ids(), &[NodeId(1), NodeId::GROUND]);
        assert!(matches!(c.stamp(None), Err(SymnaError::NotStampable { .. })));
        assert_eq!(c.stamp(Some(2)).unwrap().len(), 4);
    }

    #[test]
    fn test_renaming() {
        let mut c = Component::from_line(&line('F', "F1", &["a", "b", "c", "d"], "r")).unwrap();
        c.prepend_name("X1/");
        c.set_nodes(vec!["p".into(), "X1:q".into(), "c".into(), "d".into()]);
        assert_eq!(c.name(), "X1/F1");
        assert_eq!(c.aux_names(), vec!["X1/F1.p", "X1/F1.cp"]);
        assert_eq!(c.to_string(), "X1/F1 p X1:q c d r");
    }
}
