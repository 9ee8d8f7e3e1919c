//! Error types for the netlist reader and stamp assembler.
//!
//! This module provides a unified error type [`SymnaError`] that covers
//! all error conditions that can occur while parsing a netlist, expanding
//! subcircuits, resolving nodes and assembling the symbolic MNA matrix.

use thiserror::Error;

/// Result type alias using [`SymnaError`].
pub type Result<T> = std::result::Result<T, SymnaError>;

/// Unified error type for all netlist operations.
#[derive(Error, Debug)]
pub enum SymnaError {
    // ============ Grammar Errors ============
    /// The input does not fully match the netlist grammar
    #[error("Parse failed at line {line}, column {column}. Remaining unparsed: {remainder:?}")]
    Grammar {
        line: usize,
        column: usize,
        remainder: String,
    },

    /// Component line whose kind letter is not recognized
    #[error("Unknown component kind '{kind}' for '{name}' at line {line}")]
    UnknownComponentKind { kind: char, name: String, line: usize },

    // ============ Topology Errors ============
    /// Node not registered in the node map
    #[error("Node '{node}' not found in netlist")]
    NodeNotFound { node: String },

    /// Instance of a subcircuit that was never defined
    #[error("Unknown subcircuit '{name}' referenced by instance '{instance}' at line {line}")]
    UnknownSubcircuit {
        name: String,
        instance: String,
        line: usize,
    },

    /// Instance node count differs from the definition's terminal count
    #[error("Instance '{instance}' of subcircuit '{subcircuit}' connects {found} nodes, expected {expected}")]
    TerminalMismatch {
        subcircuit: String,
        instance: String,
        expected: usize,
        found: usize,
    },

    /// Subcircuit defined again; the later definition replaces the earlier one
    #[error("Subcircuit '{name}' redefined, replacing the definition at line {first_line}")]
    DuplicateSubcircuit { name: String, first_line: usize },

    // ============ Assembly Errors ============
    /// Component cannot be stamped in its current state
    #[error("Component '{name}' cannot be stamped: {message}")]
    NotStampable { name: String, message: String },

    /// Assembly requested on a netlist that was not read successfully
    #[error("Netlist is not valid for stamping")]
    InvalidNetlist,

    // ============ I/O Errors ============
    /// Error reading netlist file
    #[error("Failed to read netlist file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl SymnaError {
    /// Create a grammar error
    pub fn grammar(line: usize, column: usize, remainder: impl Into<String>) -> Self {
        Self::Grammar {
            line,
            column,
            remainder: remainder.into(),
        }
    }

    /// Create a node-not-found error
    pub fn node_not_found(node: impl Into<String>) -> Self {
        Self::NodeNotFound { node: node.into() }
    }

    /// Create a not-stampable error
    pub fn not_stampable(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotStampable {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Whether this error leaves the rest of the read usable.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnknownComponentKind { .. } | Self::DuplicateSubcircuit { .. })
    }
}
