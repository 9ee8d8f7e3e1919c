//! WASM bindings for Symna Core.
//!
//! This module provides JavaScript-friendly bindings for reading netlists
//! and inspecting the resulting symbolic system in the browser.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmNetlist } from 'symna_core';
//!
//! await init();
//!
//! const text = `
//!   * divider
//!   V1 in 0 Vin
//!   R1 in out R1
//!   R2 out 0 R2
//! `;
//!
//! const netlist = new WasmNetlist(text, "spice");
//! console.log(netlist.full_size);          // 5
//! console.log(netlist.node_index("out"));  // 2
//! console.log(netlist.matrix_entries());
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::{Netlist, ReadOptions};
use crate::dsl::Dialect;
use crate::error::SymnaError;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: SymnaError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-compatible netlist handle.
///
/// Wraps a valid [`Netlist`]; construction fails for any input that does
/// not read successfully.
#[wasm_bindgen]
pub struct WasmNetlist {
    netlist: Netlist,
}

#[wasm_bindgen]
impl WasmNetlist {
    /// Read a netlist from text.
    ///
    /// # Arguments
    /// * `text` - The netlist source
    /// * `dialect` - Starting dialect, `"spice"` or `"spectre"`
    ///
    /// # Example
    /// ```javascript
    /// const netlist = new WasmNetlist(text, "spectre");
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(text: &str, dialect: &str) -> Result<WasmNetlist, JsValue> {
        let dialect: Dialect = dialect
            .parse()
            .map_err(|message| to_js(SymnaError::WasmError { message }))?;
        let options = ReadOptions::new().with_dialect(dialect);
        let netlist = Netlist::parse_with(text, &options).map_err(to_js)?;
        Ok(WasmNetlist { netlist })
    }

    /// Dimension of the symbolic system.
    #[wasm_bindgen(getter)]
    pub fn full_size(&self) -> usize {
        self.netlist.full_size()
    }

    /// Number of non-ground nodes.
    #[wasm_bindgen(getter)]
    pub fn node_count(&self) -> usize {
        self.netlist.node_count()
    }

    /// Number of flattened components.
    #[wasm_bindgen(getter)]
    pub fn component_count(&self) -> usize {
        self.netlist.components().len()
    }

    /// Names of the flattened components, in netlist order.
    #[wasm_bindgen]
    pub fn component_names(&self) -> Vec<String> {
        self.netlist.components().iter().map(|c| c.name().to_string()).collect()
    }

    /// Index of a node, or `undefined` if the node doesn't exist.
    #[wasm_bindgen]
    pub fn node_index(&self, name: &str) -> Option<usize> {
        self.netlist.find_node(name).ok().map(|id| id.index())
    }

    /// Labels of all unknowns in matrix order.
    #[wasm_bindgen]
    pub fn unknown_names(&self) -> Result<Vec<String>, JsValue> {
        self.netlist.unknown_names().map_err(to_js)
    }

    /// Non-zero matrix entries, one `M[row,col] = term` line each.
    #[wasm_bindgen]
    pub fn matrix_entries(&self) -> Result<String, JsValue> {
        let system = self.netlist.assemble().map_err(to_js)?;
        Ok(system.matrix().to_string())
    }

    /// Warnings for dropped components and replaced subcircuit definitions.
    #[wasm_bindgen]
    pub fn diagnostics(&self) -> Vec<String> {
        self.netlist.diagnostics().iter().map(|d| d.to_string()).collect()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
