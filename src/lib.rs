//! # Symna Core
//!
//! A netlist reader that builds symbolic Modified Nodal Analysis systems.
//!
//! This library provides:
//! - A line grammar for SPICE-like netlists in two dialects (spice and spectre)
//! - Subcircuit definitions with per-instance renaming of local nets
//! - A dense node index space with ground aliases
//! - Symbolic MNA stamps for linear and controlled-source elements
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`dsl`] - Parser for the netlist language
//! - [`circuit`] - Node map, subcircuit expansion and the flattened netlist
//! - [`components`] - Component kinds and their stamp patterns
//! - [`mna`] - Auxiliary-unknown bookkeeping and the symbolic matrix
//! - [`symbolic`] - Numeric-or-symbolic values
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! symna divider.sp --list --matrix
//! ```
//!
//! ### Library
//!
//! ```
//! use symna_core::Netlist;
//!
//! let netlist = Netlist::parse("R1 a b R\nV1 a 0 Vin\n").unwrap();
//! assert_eq!(netlist.full_size(), 4);
//!
//! let system = netlist.assemble().unwrap();
//! assert_eq!(system.matrix().get(3, 1).unwrap().to_string(), "R");
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmNetlist } from 'symna_core';
//!
//! const netlist = new WasmNetlist(text, "spice");
//! console.log(netlist.full_size, netlist.component_names());
//! ```
//!
//! ## Unknown Layout
//!
//! Index 0 is ground and is never stored. Nodes follow in first-seen order,
//! then the auxiliary unknowns, grouped by category: impedances, voltage
//! sources, op-amps, VCVS, CCVS and CCCS.

pub mod circuit;
pub mod components;
pub mod dsl;
pub mod error;
pub mod mna;
pub mod symbolic;

// Re-export main types for convenience
pub use circuit::{Netlist, NodeId, ReadOptions};
pub use components::{Component, ComponentKind};
pub use dsl::Dialect;
pub use error::{Result, SymnaError};
pub use mna::{MnaSystem, SymbolicMatrix};
pub use symbolic::Expr;

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmNetlist;

/// Net names that always resolve to ground.
pub const GROUND_ALIASES: [&str; 4] = ["0", "GND", "Gnd", "gnd"];

/// Character marking a net as global (never renamed inside subcircuits).
pub const GLOBAL_MARKER: char = '!';

/// Separator between an instance label and a component name, as in `X1/R1`.
pub const INSTANCE_SEPARATOR: char = '/';

/// Separator between an instance label and a local net, as in `X1:mid`.
pub const LOCAL_NET_SEPARATOR: char = ':';
