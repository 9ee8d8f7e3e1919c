//! Symbolic MNA (Modified Nodal Analysis) assembly.
//!
//! ## Modified Nodal Analysis
//!
//! MNA writes a circuit as a square linear system over the node voltages
//! plus a set of auxiliary unknowns (branch currents and controlling
//! variables) for elements that cannot be written in node voltages alone.
//!
//! The unknown space is laid out as:
//! ```text
//! 0                      ground (never stored)
//! 1 ..= node_count       node voltages, in first-seen order
//! node_count + 1 ..      one block per category:
//!                        impedances, voltage sources, op-amps,
//!                        VCVS, CCVS (two per instance), CCCS
//! ```
//!
//! Assembly is a single pass: offsets are assigned in component order from
//! each category's counter, then every component adds its stamp to the
//! global matrix, one component at a time.

mod matrix;
mod state;

pub use matrix::SymbolicMatrix;
pub use state::NetworkState;

use log::debug;

use crate::circuit::{NodeMap, Unknown};
use crate::components::Component;
use crate::error::{Result, SymnaError};

/// An assembled symbolic system.
#[derive(Debug, Clone)]
pub struct MnaSystem {
    matrix: SymbolicMatrix,
    offsets: Vec<Option<usize>>,
    unknowns: Vec<String>,
    state: NetworkState,
}

impl MnaSystem {
    /// The global symbolic matrix.
    pub fn matrix(&self) -> &SymbolicMatrix {
        &self.matrix
    }

    /// Auxiliary offset of each component, in component order.
    pub fn offsets(&self) -> &[Option<usize>] {
        &self.offsets
    }

    /// Label of every unknown, in matrix order (index `i + 1` is `unknowns()[i]`).
    pub fn unknowns(&self) -> &[String] {
        &self.unknowns
    }

    /// Label of the unknown at matrix index `index`.
    pub fn unknown(&self, index: usize) -> Option<&str> {
        index.checked_sub(1).and_then(|i| self.unknowns.get(i)).map(String::as_str)
    }

    /// Whether matrix index `index` is a node voltage or an auxiliary unknown.
    pub fn classify(&self, index: usize) -> Option<Unknown> {
        if index > self.full_size() {
            return None;
        }
        Unknown::classify(index, self.state.node_count())
    }

    pub fn state(&self) -> &NetworkState {
        &self.state
    }

    /// Dimension of the system.
    pub fn full_size(&self) -> usize {
        self.state.full_size()
    }
}

/// Assign auxiliary offsets to `components` and stamp them into a new matrix.
///
/// Every component must have had its nodes resolved against `node_map`.
pub fn assemble(components: &[Component], node_map: &NodeMap) -> Result<MnaSystem> {
    let mut state = NetworkState::from_components(node_map.node_count(), components);
    let offsets = assign_offsets(&mut state, components);
    let unknowns = label_unknowns(components, &offsets, node_map, state.full_size())?;

    let size = state.full_size();
    let mut matrix = SymbolicMatrix::new(size);
    for (component, offset) in components.iter().zip(&offsets) {
        matrix.apply(component.name(), component.stamp(*offset)?)?;
    }

    debug!(
        "assembled {} components into a {}x{} system with {} non-zero entries",
        components.len(),
        size,
        size,
        matrix.nnz()
    );
    state.reset();

    Ok(MnaSystem {
        matrix,
        offsets,
        unknowns,
        state,
    })
}

/// Labels of all unknowns in matrix order, without stamping.
pub fn unknown_names(components: &[Component], node_map: &NodeMap) -> Result<Vec<String>> {
    let mut state = NetworkState::from_components(node_map.node_count(), components);
    let offsets = assign_offsets(&mut state, components);
    label_unknowns(components, &offsets, node_map, state.full_size())
}

/// Take one offset per component from its category's counter, in component order.
fn assign_offsets(state: &mut NetworkState, components: &[Component]) -> Vec<Option<usize>> {
    let offsets = components
        .iter()
        .map(|c| c.kind().category().map(|cat| state.next_offset(cat)))
        .collect();
    debug!(
        "assigned offsets for {} nodes and {} components, full size {}",
        state.node_count(),
        components.len(),
        state.full_size()
    );
    offsets
}

fn label_unknowns(
    components: &[Component],
    offsets: &[Option<usize>],
    node_map: &NodeMap,
    size: usize,
) -> Result<Vec<String>> {
    let mut unknowns: Vec<String> = node_map.names().map(str::to_string).collect();
    unknowns.resize(size, String::new());
    for (component, offset) in components.iter().zip(offsets) {
        let Some(k) = offset else { continue };
        for (i, name) in component.aux_names().into_iter().enumerate() {
            let slot = k + i - 1;
            if slot >= size {
                return Err(SymnaError::not_stampable(component.name(), "auxiliary offset outside the system"));
            }
            unknowns[slot] = name;
        }
    }
    Ok(unknowns)
}
