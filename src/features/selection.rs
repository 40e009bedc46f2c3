//! Selection markers
//!
//! The selection lives on the cells themselves (`Cell::selected`), so it
//! survives structural edits of the cells that stay in the table.

use tracing::debug;

use crate::core::table::{build_matrix, selected_bound_in, Bound, CellId, Table};
use crate::utils::error::{TableError, TableResult};

/// Selected cells in document order
pub fn selected_cells(table: &Table) -> Vec<CellId> {
    table
        .cell_ids()
        .filter(|&id| table.cell(id).is_some_and(|c| c.selected))
        .collect()
}

/// Mark `cell` as selected
pub fn add_selected(table: &mut Table, cell: CellId) -> TableResult<()> {
    table.ensure_contains(&[cell])?;
    table.try_cell_mut(cell)?.selected = true;
    Ok(())
}

/// Drop the selection marker of `cell`; returns false when the cell is no
/// longer part of the table
pub fn restore_selection(table: &mut Table, cell: CellId) -> bool {
    if !table.contains(cell) {
        return false;
    }
    match table.cell_mut(cell) {
        Some(c) => {
            c.selected = false;
            true
        }
        None => false,
    }
}

/// Clear every selection marker
pub fn clear_selection(table: &mut Table) {
    let ids: Vec<CellId> = table.cell_ids().collect();
    for id in ids {
        if let Some(cell) = table.cell_mut(id) {
            cell.selected = false;
        }
    }
}

/// Select every cell inside the span-closed bound of `from` and `to`
///
/// Any previous selection is replaced. Returns the selected bound.
pub fn select_range(table: &mut Table, from: CellId, to: CellId) -> TableResult<Bound> {
    table.ensure_contains(&[from, to])?;

    let matrix = build_matrix(table);
    let bound = selected_bound_in(&matrix, &[from, to])
        .ok_or(TableError::cell_not_found(from))?;
    debug!(?bound, %from, %to, "select range");

    clear_selection(table);
    for (row, col, cell) in matrix.positions() {
        if bound.contains(row, col) {
            if let Some(c) = table.cell_mut(cell) {
                c.selected = true;
            }
        }
    }
    Ok(bound)
}
