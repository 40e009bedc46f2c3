//! WASM bindings for tablegrid
//!
//! This module provides JavaScript-accessible functions that edit tables
//! passed around as JSON documents.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
use crate::core::GridOptions;
#[cfg(feature = "wasm")]
use crate::features::Operation;
#[cfg(feature = "wasm")]
use crate::utils::diagnostics::DiagnosticLevel;

/// Edit options (exposed to WASM)
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct EditOptions {
    /// Fraction digits in width percentages
    #[serde(default = "default_precision")]
    pub precision: usize,
    /// Separator placed between merged contents
    #[serde(default = "default_separator")]
    pub line_separator: String,
}

#[cfg(feature = "wasm")]
impl Default for EditOptions {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            line_separator: default_separator(),
        }
    }
}

#[cfg(feature = "wasm")]
fn default_precision() -> usize {
    GridOptions::default().precision
}

#[cfg(feature = "wasm")]
fn default_separator() -> String {
    GridOptions::default().line_separator
}

#[cfg(feature = "wasm")]
impl From<EditOptions> for GridOptions {
    fn from(opts: EditOptions) -> Self {
        GridOptions::with_precision(opts.precision).line_separator(opts.line_separator)
    }
}

/// Edit result with additional metadata
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct EditResult {
    /// The edited table as JSON
    pub output: String,
    /// Whether the edit was successful
    pub success: bool,
    /// Error message if the edit failed
    pub error: Option<String>,
    /// Structural warnings about the edited table
    pub warnings: Vec<String>,
}

#[cfg(feature = "wasm")]
impl EditResult {
    fn failed(error: impl ToString) -> Self {
        EditResult {
            output: String::new(),
            success: false,
            error: Some(error.to_string()),
            warnings: vec![],
        }
    }
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Apply one operation to a table
///
/// # Arguments
/// * `table_json` - Table document
/// * `operation` - Operation object, e.g. `{ op: "append_row", row: 0 }`
/// * `table_width` - Rendered table width in pixels
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "applyOperation")]
pub fn apply_operation_wasm(table_json: &str, operation: JsValue, table_width: f64) -> JsValue {
    apply_operation_with_options_wasm(table_json, operation, table_width, JsValue::UNDEFINED)
}

/// Apply one operation to a table with edit options
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "applyOperationWithOptions")]
pub fn apply_operation_with_options_wasm(
    table_json: &str,
    operation: JsValue,
    table_width: f64,
    options: JsValue,
) -> JsValue {
    let opts: EditOptions = serde_wasm_bindgen::from_value(options).unwrap_or_default();
    let options = GridOptions::from(opts);

    let result = match serde_wasm_bindgen::from_value::<Operation>(operation) {
        Ok(op) => match crate::apply_to_json(table_json, &op, table_width, &options) {
            Ok(output) => {
                let warnings = crate::table_from_json(&output)
                    .map(|table| {
                        crate::diagnostics::check_table(&table)
                            .diagnostics
                            .into_iter()
                            .filter(|d| d.level >= DiagnosticLevel::Warning)
                            .map(|d| d.message)
                            .collect()
                    })
                    .unwrap_or_default();
                EditResult {
                    output,
                    success: true,
                    error: None,
                    warnings,
                }
            }
            Err(e) => EditResult::failed(e),
        },
        Err(e) => EditResult::failed(format!("Invalid operation: {}", e)),
    };

    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Render a table document as HTML
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "tableToHtml")]
pub fn table_to_html_wasm(table_json: &str) -> JsValue {
    let result = match crate::table_from_json(table_json) {
        Ok(table) => EditResult {
            output: crate::table_to_html(&table),
            success: true,
            error: None,
            warnings: vec![],
        },
        Err(e) => EditResult::failed(e),
    };
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Check a table document for structural issues
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "checkTable")]
pub fn check_table_wasm(table_json: &str) -> JsValue {
    let summary = match crate::table_from_json(table_json) {
        Ok(table) => {
            let report = crate::diagnostics::check_table(&table);

            // Group diagnostics by level
            let mut errors = Vec::new();
            let mut warnings = Vec::new();
            let mut infos = Vec::new();

            for d in &report.diagnostics {
                match d.level {
                    DiagnosticLevel::Error => errors.push(d.to_string()),
                    DiagnosticLevel::Warning => warnings.push(d.to_string()),
                    DiagnosticLevel::Info => infos.push(d.to_string()),
                }
            }

            CheckSummary {
                errors,
                warnings,
                infos,
                has_errors: report.has_errors(),
            }
        }
        Err(e) => CheckSummary {
            errors: vec![e.to_string()],
            warnings: vec![],
            infos: vec![],
            has_errors: true,
        },
    };
    serde_wasm_bindgen::to_value(&summary).unwrap_or(JsValue::NULL)
}

/// Summary of table check results
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct CheckSummary {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub has_errors: bool,
}
