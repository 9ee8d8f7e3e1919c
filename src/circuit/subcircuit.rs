//! Subcircuit definitions and instance expansion.

use std::collections::HashMap;

use log::{debug, warn};

use super::NodeMap;
use crate::components::Component;
use crate::dsl::{InstanceLine, SubcircuitDef};
use crate::error::{Result, SymnaError};
use crate::{GLOBAL_MARKER, INSTANCE_SEPARATOR, LOCAL_NET_SEPARATOR};

/// Definitions seen so far in one processing pass, keyed by name.
#[derive(Debug, Default)]
pub struct SubcircuitTable {
    definitions: HashMap<String, SubcircuitDef>,
}

impl SubcircuitTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, replacing any earlier one with the same name.
    ///
    /// A replacement is reported as a recoverable diagnostic.
    pub fn register(&mut self, def: SubcircuitDef) -> Option<SymnaError> {
        debug!(
            "registered subcircuit {} with {} terminals",
            def.name,
            def.terminals.len()
        );
        let name = def.name.clone();
        self.definitions.insert(name.clone(), def).map(|earlier| {
            let e = SymnaError::DuplicateSubcircuit {
                name,
                first_line: earlier.line,
            };
            warn!("{}", e);
            e
        })
    }

    /// Look up a definition by name.
    pub fn get(&self, name: &str) -> Option<&SubcircuitDef> {
        self.definitions.get(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Expand an instance against the registered definitions.
    ///
    /// Unknown-kind components in the body are dropped and returned as
    /// diagnostics alongside the expanded components.
    pub fn instantiate(&self, instance: &InstanceLine) -> Result<Expansion> {
        let def = self.get(&instance.subcircuit).ok_or_else(|| SymnaError::UnknownSubcircuit {
            name: instance.subcircuit.clone(),
            instance: instance.label.clone(),
            line: instance.line,
        })?;
        expand(def, instance)
    }
}

/// Result of expanding one instance.
#[derive(Debug, Default)]
pub struct Expansion {
    /// Renamed, renoded components in body order
    pub components: Vec<Component>,
    /// Recoverable problems found in the body
    pub diagnostics: Vec<SymnaError>,
}

/// Whether a net is exempt from local renaming.
pub fn is_global(node: &str) -> bool {
    node.contains(GLOBAL_MARKER)
}

/// Expand `instance` using definition `def`.
///
/// Terminal nets map by position to the instance's nodes, global and ground
/// nets keep their name, and every other net becomes `<label>:<net>`.
/// Component names are prefixed with `<label>/`.
pub fn expand(def: &SubcircuitDef, instance: &InstanceLine) -> Result<Expansion> {
    if def.terminals.len() != instance.nodes.len() {
        return Err(SymnaError::TerminalMismatch {
            subcircuit: def.name.clone(),
            instance: instance.label.clone(),
            expected: def.terminals.len(),
            found: instance.nodes.len(),
        });
    }

    let ports: HashMap<&str, &str> = def
        .terminals
        .iter()
        .map(String::as_str)
        .zip(instance.nodes.iter().map(String::as_str))
        .collect();

    let rename = |node: &String| -> String {
        if let Some(actual) = ports.get(node.as_str()) {
            actual.to_string()
        } else if is_global(node) || NodeMap::is_ground(node) {
            node.clone()
        } else {
            format!("{}{}{}", instance.label, LOCAL_NET_SEPARATOR, node)
        }
    };
    let prefix = format!("{}{}", instance.label, INSTANCE_SEPARATOR);

    let mut expansion = Expansion::default();
    for line in def.components() {
        match Component::from_line(line) {
            Ok(mut component) => {
                let nodes = component.nodes().iter().map(&rename).collect();
                component.set_nodes(nodes);
                component.prepend_name(&prefix);
                expansion.components.push(component);
            }
            Err(e) if e.is_recoverable() => {
                warn!("{} in subcircuit {}: {}", instance.label, def.name, e);
                expansion.diagnostics.push(e);
            }
            Err(e) => return Err(e),
        }
    }

    debug!(
        "expanded {} ({}) into {} components",
        instance.label,
        def.name,
        expansion.components.len()
    );
    Ok(expansion)
}
