//! Flattened netlist representation.
//!
//! This module turns parsed records into a flat list of [`Component`]s:
//! subcircuit instances are expanded, every net is registered with the
//! [`NodeMap`], and the result can be assembled into a symbolic MNA system.
//!
//! [`Component`]: crate::components::Component

mod netlist;
mod node_map;
mod subcircuit;
mod types;

pub use netlist::{Netlist, ReadOptions};
pub use node_map::NodeMap;
pub use subcircuit::{expand, is_global, Expansion, SubcircuitTable};
pub use types::*;
