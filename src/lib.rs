pub mod document;
pub mod id;
pub mod key;
mod merge;
pub mod model;
pub mod reconcile;
pub mod report;

use wasm_bindgen::prelude::*;

use document::{parse_schema, render_schema};
use id::UuidIds;

pub use id::{IdGenerator, SequentialIds};
pub use model::{Cardinality, Column, ColumnId, ColumnReference, Relationship, Schema, Table};
pub use reconcile::{Reconciler, Reconciliation, compute_final_schema_state};
pub use report::{Outcome, ReconcileReport};

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Merge a proposed schema document into the current one (JSON in, JSON out)
#[wasm_bindgen(js_name = "reconcileSchemas")]
pub fn reconcile_schemas(
    current: Option<String>,
    proposed: Option<String>,
) -> Result<String, String> {
    let current = match current.as_deref() {
        Some(text) => parse_schema(text, "current").map_err(|e| e.to_string())?,
        None => None,
    };
    let proposed = match proposed.as_deref() {
        Some(text) => parse_schema(text, "proposed").map_err(|e| e.to_string())?,
        None => None,
    };

    let merged = compute_final_schema_state(current.as_ref(), proposed.as_ref(), &mut UuidIds);
    render_schema(merged.as_ref(), false).map_err(|e| e.to_string())
}
