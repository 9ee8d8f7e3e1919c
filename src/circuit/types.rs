//! Index types for the flattened netlist and the unknown space.

use std::fmt;

/// Dense index of a net. Index 0 is ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The ground node (always index 0).
    pub const GROUND: NodeId = NodeId(0);

    pub fn is_ground(&self) -> bool {
        self.0 == 0
    }

    /// Row/column of this node in the symbolic matrix.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ground() {
            write!(f, "GND")
        } else {
            write!(f, "N{}", self.0)
        }
    }
}

/// Position of a component in the flattened component list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(pub usize);

/// What a matrix row or column stands for.
///
/// Node voltages occupy `1..=node_count`; everything after is an auxiliary
/// unknown, numbered from 0 in matrix order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unknown {
    /// Voltage of a non-ground node
    Node(NodeId),
    /// Auxiliary unknown (branch current or controlling variable)
    Aux(usize),
}

impl Unknown {
    /// Classify matrix index `index`. Ground (0) is not an unknown.
    pub fn classify(index: usize, node_count: usize) -> Option<Self> {
        match index {
            0 => None,
            i if i <= node_count => Some(Unknown::Node(NodeId(i))),
            i => Some(Unknown::Aux(i - node_count - 1)),
        }
    }

    /// Matrix index of this unknown.
    pub fn index(&self, node_count: usize) -> usize {
        match self {
            Unknown::Node(id) => id.index(),
            Unknown::Aux(k) => node_count + 1 + k,
        }
    }
}

impl fmt::Display for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unknown::Node(id) => write!(f, "V({})", id),
            Unknown::Aux(k) => write!(f, "X{}", k),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Unknown::classify(0, 2), None);
        assert_eq!(Unknown::classify(2, 2), Some(Unknown::Node(NodeId(2))));
        assert_eq!(Unknown::classify(3, 2), Some(Unknown::Aux(0)));
        assert_eq!(Unknown::Aux(1).index(2), 4);
        assert_eq!(Unknown::Node(NodeId(1)).to_string(), "V(N1)");
    }
}
