//! # tablegrid
//!
//! Span-aware table grid engine written in Rust.
//!
//! ## Features
//!
//! - **Occupancy matrix**: maps every logical `(row, col)` to the cell covering it
//! - **Span-closed selections**: a selection never slices a spanning cell
//! - **Structural edits**: insert/remove rows and columns, merge, split
//! - **Normalization**: removes redundant spans after every edit
//! - **Column widths**: percentage widths derived from rendered widths
//! - **Diagnostics**: reports holes, overlaps and overrunning spans
//! - **WASM Support**: compiles to WebAssembly for browser usage
//!
//! ## Usage Examples
//!
//! ### Merging a selection
//!
//! ```rust
//! use tablegrid::{merge_cells, Cell, ColumnLayout, Table};
//!
//! let mut table = Table::from_rows(vec![
//!     vec![Cell::new("a"), Cell::new("b")],
//!     vec![Cell::new("c"), Cell::new("d")],
//! ]);
//! let all: Vec<_> = table.cell_ids().collect();
//! let merged = merge_cells(&mut table, &all, &ColumnLayout::new(800.0))
//!     .unwrap()
//!     .unwrap();
//!
//! let cell = table.cell(merged).unwrap();
//! assert_eq!(cell.content, "a<br/>b<br/>c<br/>d");
//! assert_eq!((cell.col_span(), cell.row_span()), (2, 2));
//! ```
//!
//! ### Inserting and removing columns
//!
//! ```rust
//! use tablegrid::{append_column, columns_count, remove_column, Table};
//!
//! let mut table = Table::grid(2, 2);
//! append_column(&mut table, 1, true).unwrap();
//! assert_eq!(columns_count(&table), 3);
//!
//! remove_column(&mut table, 0).unwrap();
//! assert_eq!(columns_count(&table), 2);
//! ```

/// Core grid modules
pub mod core;

/// Feature modules - structural operations
pub mod features;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export the grid core
pub use core::table::{
    build_matrix, build_matrix_with, columns_count, coordinate_of, rows_count, selected_bound,
    Bound, Cell, CellId, Coordinate, Mutation, OccupancyMatrix, PendingBuffer, Placement, Row,
    Table, Visit,
};
pub use core::GridOptions;

// Re-export operations
pub use features::{
    add_selected, append_column, append_row, apply_operation, clear_selection, matrix_to_text,
    merge_cells, merge_cells_with_options, normalize, remove_column, remove_row,
    restore_selection, select_range, selected_cells, set_column_width_by_delta,
    set_column_width_by_delta_with_options, split_horizontal, split_vertical,
    split_vertical_with_options, table_to_html, ColumnLayout, Operation, WidthMetrics,
};

#[cfg(feature = "serde")]
pub use features::{table_from_json, table_to_json};

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{TableError, TableResult};

/// Apply one operation to a table given as JSON and return the edited table
///
/// Widths are measured with a [`ColumnLayout`] of `table_width` pixels.
#[cfg(feature = "serde")]
pub fn apply_to_json(
    input: &str,
    op: &Operation,
    table_width: f64,
    options: &GridOptions,
) -> TableResult<String> {
    let mut table = table_from_json(input)?;
    apply_operation(&mut table, op, &ColumnLayout::new(table_width), options)?;
    table_to_json(&table, false)
}
