//! Bijection between net names and dense node indices.

use std::collections::HashMap;

use super::types::NodeId;
use crate::error::{Result, SymnaError};
use crate::GROUND_ALIASES;

/// Name-to-index map with insertion-order index assignment.
///
/// Ground aliases always resolve to [`NodeId::GROUND`] and are never
/// stored. Every other name gets the next free index the first time it is
/// resolved, so indices are dense and follow discovery order.
#[derive(Debug, Clone)]
pub struct NodeMap {
    /// Name to index
    indices: HashMap<String, NodeId>,
    /// Index to name; slot 0 is ground
    names: Vec<String>,
}

impl NodeMap {
    /// Create a map holding only ground.
    pub fn new() -> Self {
        Self {
            indices: HashMap::new(),
            names: vec![GROUND_ALIASES[0].to_string()],
        }
    }

    /// Whether `name` is one of the ground aliases.
    pub fn is_ground(name: &str) -> bool {
        GROUND_ALIASES.contains(&name)
    }

    /// Resolve a name to its index, registering it on first sight.
    pub fn resolve(&mut self, name: &str) -> NodeId {
        if Self::is_ground(name) {
            return NodeId::GROUND;
        }
        if let Some(&id) = self.indices.get(name) {
            return id;
        }
        let id = NodeId(self.names.len());
        self.indices.insert(name.to_string(), id);
        self.names.push(name.to_string());
        id
    }

    /// Look up a name without registering it.
    pub fn find(&self, name: &str) -> Result<NodeId> {
        if Self::is_ground(name) {
            return Ok(NodeId::GROUND);
        }
        self.indices
            .get(name)
            .copied()
            .ok_or_else(|| SymnaError::node_not_found(name))
    }

    /// Name registered for `id`.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.names.get(id.0).map(String::as_str)
    }

    /// Number of non-ground nodes.
    pub fn node_count(&self) -> usize {
        self.names.len() - 1
    }

    /// Non-ground node names in index order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names[1..].iter().map(String::as_str)
    }
}

impl Default for NodeMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_aliases() {
        let mut map = NodeMap::new();
        for alias in ["0", "GND", "Gnd", "gnd"] {
            assert_eq!(map.resolve(alias), NodeId::GROUND);
        }
        assert_eq!(map.node_count(), 0);
        assert_eq!(map.resolve("a"), NodeId(1));
        assert_ne!(map.resolve("gNd"), NodeId::GROUND);
    }

    #[test]
    fn test_discovery_order_and_idempotence() {
        let mut map = NodeMap::new();
        let a = map.resolve("a");
        let b = map.resolve("b");
        assert_eq!(a, NodeId(1));
        assert_eq!(b, NodeId(2));
        assert_eq!(map.resolve("a"), a);
        assert_eq!(map.resolve("c"), NodeId(3));
        assert_eq!(map.node_count(), 3);
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_injective() {
        let mut map = NodeMap::new();
        let names = ["n1", "N1", "X1:mid", "X2:mid", "vdd!", "10"];
        let ids: Vec<NodeId> = names.iter().map(|n| map.resolve(n)).collect();
        for (i, a) in ids.iter().enumerate() {
            assert!(!a.is_ground());
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_find_does_not_fabricate() {
        let mut map = NodeMap::new();
        map.resolve("a");
        assert_eq!(map.find("a").unwrap(), NodeId(1));
        assert_eq!(map.find("GND").unwrap(), NodeId::GROUND);
        assert!(matches!(map.find("b"), Err(SymnaError::NodeNotFound { node }) if node == "b"));
        assert_eq!(map.node_count(), 1);
    }

    #[test]
    fn test_reverse_lookup() {
        let mut map = NodeMap::new();
        let id = map.resolve("out");
        assert_eq!(map.name(id), Some("out"));
        assert_eq!(map.name(NodeId::GROUND), Some("0"));
        assert_eq!(map.name(NodeId(7)), None);
    }
}
