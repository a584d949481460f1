//! WebAssembly bindings for the browser editor.
//!
//! The editor owns the canvas and forwards object additions here so names
//! are settled by the same allocator the CLI uses.

use wasm_bindgen::prelude::*;

use crate::{Designer, ObjectId, SnapshotDocument};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Designer instance for WASM.
#[wasm_bindgen]
#[derive(Default)]
pub struct WasmDesigner {
    designer: Designer,
}

#[wasm_bindgen]
impl WasmDesigner {
    /// Create an empty designer.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the design with a snapshot document.
    ///
    /// # Errors
    ///
    /// Returns the error message if the snapshot cannot be parsed or loaded.
    #[wasm_bindgen(js_name = loadSnapshot)]
    pub fn load_snapshot(&mut self, json: &str) -> Result<(), String> {
        let document = SnapshotDocument::from_json(json).map_err(|e| e.to_string())?;
        self.designer = Designer::from_snapshot(&document).map_err(|e| e.to_string())?;
        Ok(())
    }

    /// Settle names for objects the editor just created.
    ///
    /// `objects_json` is a JSON array of objects. Returns the name
    /// assignments as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns the error message if the objects cannot be parsed or a handle
    /// is already in use.
    #[wasm_bindgen(js_name = objectsAdded)]
    pub fn objects_added(&mut self, objects_json: &str) -> Result<String, String> {
        let objects: Vec<crate::VisualObject> =
            serde_json::from_str(objects_json).map_err(|e| e.to_string())?;
        let assignments = self
            .designer
            .add_objects(objects)
            .map_err(|e| e.to_string())?;
        let pairs: Vec<(String, String)> = assignments
            .into_iter()
            .map(|a| (a.id.to_string(), a.name))
            .collect();
        serde_json::to_string(&pairs).map_err(|e| e.to_string())
    }

    /// Remove an object by handle.
    ///
    /// # Errors
    ///
    /// Returns the error message if the object does not exist.
    #[wasm_bindgen(js_name = removeObject)]
    pub fn remove_object(&mut self, id: &str) -> Result<(), String> {
        self.designer
            .remove(&ObjectId::new(id))
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    /// Duplicate an object and its descendants; returns the copy's handle.
    ///
    /// # Errors
    ///
    /// Returns the error message if the object does not exist.
    #[wasm_bindgen(js_name = duplicateObject)]
    pub fn duplicate_object(&mut self, id: &str) -> Result<String, String> {
        self.designer
            .duplicate(&ObjectId::new(id))
            .map(|copy| copy.to_string())
            .map_err(|e| e.to_string())
    }

    /// Export the schema as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the error message if the design has no root frame or a
    /// malformed hierarchy.
    #[wasm_bindgen(js_name = exportSchemaJson)]
    pub fn export_schema_json(&self) -> Result<String, String> {
        let schema = self.designer.schema().map_err(|e| e.to_string())?;
        schema.to_json_pretty().map_err(|e| e.to_string())
    }

    /// Export the markup.
    ///
    /// # Errors
    ///
    /// Same conditions as [`WasmDesigner::export_schema_json`].
    #[wasm_bindgen(js_name = exportHtml)]
    pub fn export_html(&self) -> Result<String, String> {
        self.designer
            .export()
            .map(|bundle| bundle.html)
            .map_err(|e| e.to_string())
    }

    /// The current design as a snapshot document.
    #[wasm_bindgen(js_name = snapshotJson)]
    #[must_use]
    pub fn snapshot_json(&self) -> String {
        self.designer
            .snapshot()
            .to_json_pretty()
            .unwrap_or_default()
    }
}
