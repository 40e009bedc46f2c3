//! Operations as values
//!
//! Front ends (the CLI, the WASM bindings) describe an edit as an
//! [`Operation`] and run it through [`apply_operation`]. Merge and split act
//! on the cells currently marked as selected.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::table::Table;
use crate::core::GridOptions;
use crate::features::merge::merge_cells_with_options;
use crate::features::normalize::normalize;
use crate::features::selection::selected_cells;
use crate::features::split::{split_horizontal, split_vertical_with_options};
use crate::features::structure::{append_column, append_row, remove_column, remove_row};
use crate::features::widths::{set_column_width_by_delta_with_options, WidthMetrics};
use crate::utils::error::{TableError, TableResult};

/// A structural edit
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "op", rename_all = "snake_case"))]
pub enum Operation {
    /// Insert a row next to `row`, or at the bottom
    AppendRow {
        #[cfg_attr(feature = "serde", serde(default))]
        row: Option<usize>,
        #[cfg_attr(feature = "serde", serde(default = "default_true"))]
        after: bool,
    },
    RemoveRow {
        row: usize,
    },
    /// Insert a column next to matrix column `col`
    AppendColumn {
        col: usize,
        #[cfg_attr(feature = "serde", serde(default = "default_true"))]
        after: bool,
    },
    RemoveColumn {
        col: usize,
    },
    /// Merge the selected cells
    Merge,
    /// Split the selected cells into left and right parts
    SplitVertical,
    /// Split the selected cells into top and bottom parts
    SplitHorizontal,
    Normalize,
    /// Change the rendered width of a column by `delta` pixels
    SetColumnWidth {
        col: usize,
        #[cfg_attr(feature = "serde", serde(default))]
        delta: f64,
    },
}

#[cfg(feature = "serde")]
fn default_true() -> bool {
    true
}

impl Operation {
    /// Whether the operation reads the selection
    pub fn uses_selection(&self) -> bool {
        matches!(
            self,
            Operation::Merge | Operation::SplitVertical | Operation::SplitHorizontal
        )
    }
}

/// Run `op` on `table`
pub fn apply_operation(
    table: &mut Table,
    op: &Operation,
    metrics: &dyn WidthMetrics,
    options: &GridOptions,
) -> TableResult<()> {
    if table.is_empty() {
        return Err(TableError::EmptyTable);
    }
    debug!(?op, "apply operation");

    let selected = if op.uses_selection() {
        selected_cells(table)
    } else {
        Vec::new()
    };

    match *op {
        Operation::AppendRow { row, after } => {
            append_row(table, row, after)?;
        }
        Operation::RemoveRow { row } => remove_row(table, row)?,
        Operation::AppendColumn { col, after } => append_column(table, col, after)?,
        Operation::RemoveColumn { col } => remove_column(table, col)?,
        Operation::Merge => {
            merge_cells_with_options(table, &selected, metrics, options)?;
        }
        Operation::SplitVertical => {
            split_vertical_with_options(table, &selected, metrics, options)?;
        }
        Operation::SplitHorizontal => {
            split_horizontal(table, &selected)?;
        }
        Operation::Normalize => normalize(table),
        Operation::SetColumnWidth { col, delta } => {
            set_column_width_by_delta_with_options(table, col, delta, metrics, options)?
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::columns_count;
    use crate::features::selection::add_selected;
    use crate::features::widths::ColumnLayout;

    fn run(table: &mut Table, op: Operation) -> TableResult<()> {
        apply_operation(table, &op, &ColumnLayout::new(1000.0), &GridOptions::default())
    }

    #[test]
    fn test_structural_operations() {
        let mut table = Table::grid(2, 2);
        run(&mut table, Operation::AppendRow { row: None, after: true }).unwrap();
        run(&mut table, Operation::AppendColumn { col: 1, after: true }).unwrap();
        assert_eq!((table.row_count(), columns_count(&table)), (3, 3));

        run(&mut table, Operation::RemoveRow { row: 0 }).unwrap();
        run(&mut table, Operation::RemoveColumn { col: 0 }).unwrap();
        assert_eq!((table.row_count(), columns_count(&table)), (2, 2));
    }

    #[test]
    fn test_merge_uses_selection() {
        let mut table = Table::grid(2, 2);
        let a = table.cell_at(0, 0).unwrap();
        let b = table.cell_at(0, 1).unwrap();
        add_selected(&mut table, a).unwrap();
        add_selected(&mut table, b).unwrap();

        run(&mut table, Operation::Merge).unwrap();
        assert_eq!(table.cell_count(), 3);
        assert_eq!(table.cell(a).unwrap().colspan, Some(2));
    }

    #[test]
    fn test_merge_without_selection_is_noop() {
        let mut table = Table::grid(2, 2);
        run(&mut table, Operation::Merge).unwrap();
        assert_eq!(table.cell_count(), 4);
    }

    #[test]
    fn test_empty_table() {
        let mut table = Table::new();
        assert_eq!(run(&mut table, Operation::Normalize), Err(TableError::EmptyTable));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_operation_json() {
        let op: Operation = serde_json::from_str(r#"{"op":"append_column","col":2}"#).unwrap();
        assert_eq!(op, Operation::AppendColumn { col: 2, after: true });

        let op: Operation = serde_json::from_str(r#"{"op":"split_vertical"}"#).unwrap();
        assert_eq!(op, Operation::SplitVertical);
    }
}
