//! Splitting cells in two
//!
//! - `split_vertical`: the cell and a new neighbour share its columns
//! - `split_horizontal`: the cell and a new cell below share its rows
//!
//! A cell spanning a single column (or row) cannot give one away, so the
//! other cells on that line grow by one instead.

use tracing::{debug, trace, warn};

use crate::core::table::{build_matrix, coordinate_of, Cell, CellId, Mutation, PendingBuffer, Table};
use crate::core::GridOptions;
use crate::features::normalize::normalize;
use crate::features::selection::restore_selection;
use crate::features::widths::WidthMetrics;
use crate::utils::error::{TableError, TableResult};

fn ensure_cells(table: &Table, selected: &[CellId]) -> TableResult<()> {
    if table.is_empty() {
        return Err(TableError::EmptyTable);
    }
    table.ensure_contains(selected)
}

/// Split every selected cell into a left and a right part
///
/// Both parts get half of the original rendered width. Returns the new cells.
pub fn split_vertical(
    table: &mut Table,
    selected: &[CellId],
    metrics: &dyn WidthMetrics,
) -> TableResult<Vec<CellId>> {
    split_vertical_with_options(table, selected, metrics, &GridOptions::default())
}

pub fn split_vertical_with_options(
    table: &mut Table,
    selected: &[CellId],
    metrics: &dyn WidthMetrics,
    options: &GridOptions,
) -> TableResult<Vec<CellId>> {
    ensure_cells(table, selected)?;
    debug!(selected = selected.len(), "split vertical");

    let mut created = Vec::with_capacity(selected.len());
    for &cell in selected {
        let coord = coordinate_of(table, cell, false)?;
        let matrix = build_matrix(table);
        let mut pending = PendingBuffer::new();

        if coord.col_span < 2 {
            for row in (0..matrix.row_count()).filter(|&r| r != coord.row) {
                let Some(other) = matrix.get(row, coord.col) else {
                    continue;
                };
                if other != cell {
                    let span = table.try_cell(other)?.col_span();
                    pending.mark(other, Mutation::ColSpan(span + 1));
                }
            }
        } else {
            pending.mark(cell, Mutation::ColSpan(coord.col_span - 1));
        }
        trace!(%cell, col_span = coord.col_span, widened = pending.len(), "split cell vertically");

        let added = table.create_cell(Cell::with_span("", 1, coord.row_span));
        let old_width = metrics.cell_width(table, cell);
        let table_width = metrics.table_width(table);
        table.insert_cell_after(cell, added)?;

        if table_width > 0.0 {
            let half = options.format_percent(old_width / table_width / 2.0 * 100.0);
            pending.mark(cell, Mutation::Width(half.clone()));
            pending.mark(added, Mutation::Width(half));
        } else {
            warn!(table_width, "table has no width, split cells keep their widths");
        }

        pending.commit(table);
        restore_selection(table, cell);
        created.push(added);
    }

    normalize(table);
    Ok(created)
}

/// Split every selected cell into a top and a bottom part
///
/// Returns the new cells.
pub fn split_horizontal(table: &mut Table, selected: &[CellId]) -> TableResult<Vec<CellId>> {
    ensure_cells(table, selected)?;
    debug!(selected = selected.len(), "split horizontal");

    let mut created = Vec::with_capacity(selected.len());
    for &cell in selected {
        let coord = coordinate_of(table, cell, false)?;
        let matrix = build_matrix(table);
        let mut pending = PendingBuffer::new();
        let added = table.create_cell(Cell::empty());

        if coord.row_span < 2 {
            for col in (0..matrix.row_len(coord.row)).filter(|&c| c != coord.col) {
                let Some(other) = matrix.get(coord.row, col) else {
                    continue;
                };
                if other != cell {
                    let span = table.try_cell(other)?.row_span();
                    pending.mark(other, Mutation::RowSpan(span + 1));
                }
            }
            let row = table.row_of(cell).ok_or(TableError::cell_not_found(cell))?;
            table.insert_row(row + 1, vec![added])?;
        } else {
            pending.mark(cell, Mutation::RowSpan(coord.row_span - 1));

            let target = coord.row + coord.row_span - 1;
            while table.row_count() <= target {
                warn!(target, rows = table.row_count(), "row span overruns the table, adding a row");
                table.push_row(Vec::new());
            }

            let anchor = (0..coord.col)
                .rev()
                .filter_map(|c| matrix.get(target, c))
                .find(|&c| table.row_of(c) == Some(target));
            match anchor {
                Some(anchor) => table.insert_cell_after(anchor, added)?,
                None => table.insert_cell(target, 0, added)?,
            }
        }

        if coord.col_span > 1 {
            pending.mark(added, Mutation::ColSpan(coord.col_span));
        }
        trace!(%cell, row_span = coord.row_span, "split cell horizontally");

        pending.commit(table);
        restore_selection(table, cell);
        created.push(added);
    }

    normalize(table);
    Ok(created)
}
