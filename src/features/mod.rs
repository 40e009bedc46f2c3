//! Feature modules - structural table operations
//!
//! This module contains the edits built on top of the grid core:
//! - Row and column insertion and removal
//! - Merging a selection, splitting cells
//! - Span normalization
//! - Column widths and the default width layout
//! - Selection markers
//! - HTML / text rendering and JSON interchange
//! - Operations as values, for front ends

pub mod merge;
pub mod normalize;
pub mod ops;
pub mod render;
pub mod selection;
pub mod split;
pub mod structure;
pub mod widths;

#[cfg(feature = "serde")]
pub mod json;

// Re-export commonly used items
pub use merge::{merge_cells, merge_cells_with_options};
pub use normalize::normalize;
pub use ops::{apply_operation, Operation};
pub use render::{matrix_to_text, table_to_html};
pub use selection::{add_selected, clear_selection, restore_selection, select_range, selected_cells};
pub use split::{split_horizontal, split_vertical, split_vertical_with_options};
pub use structure::{append_column, append_row, drop_empty_rows, remove_column, remove_row};
pub use widths::{
    queue_column_width_by_delta, set_column_width_by_delta, set_column_width_by_delta_with_options,
    ColumnLayout, WidthMetrics,
};

#[cfg(feature = "serde")]
pub use json::{table_from_json, table_to_json, CellDoc, RowDoc, TableDoc};
