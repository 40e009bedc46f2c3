//! Row and column insertion and removal

use fxhash::FxHashSet;
use tracing::{debug, trace};

use crate::core::table::{
    build_matrix, Cell, CellId, Mutation, OccupancyMatrix, PendingBuffer, Table,
};
use crate::utils::error::{TableError, TableResult};

fn ensure_row(table: &Table, row: usize) -> TableResult<()> {
    if table.is_empty() {
        return Err(TableError::EmptyTable);
    }
    if row >= table.row_count() {
        return Err(TableError::row_out_of_range(row, table.row_count()));
    }
    Ok(())
}

fn ensure_column(table: &Table, col: usize, columns: usize) -> TableResult<()> {
    if table.is_empty() {
        return Err(TableError::EmptyTable);
    }
    if col >= columns {
        return Err(TableError::column_out_of_range(col, columns));
    }
    Ok(())
}

/// Insert a row of empty cells after (or before) `anchor`, or at the bottom
/// when there is no anchor. Returns the index of the new row.
///
/// Cells whose row span crosses the insertion line grow by one row instead of
/// getting a new cell underneath.
pub fn append_row(table: &mut Table, anchor: Option<usize>, after: bool) -> TableResult<usize> {
    if table.is_empty() {
        return Err(TableError::EmptyTable);
    }
    if let Some(row) = anchor {
        ensure_row(table, row)?;
    }

    let index = match anchor {
        Some(row) if after => row + 1,
        Some(row) => row,
        None => table.row_count(),
    };
    debug!(?anchor, after, index, "append row");

    let matrix = build_matrix(table);
    let mut pending = PendingBuffer::new();
    let mut grown = FxHashSet::default();
    let mut cells = 0;

    for col in 0..matrix.width() {
        let above = index.checked_sub(1).and_then(|r| matrix.get(r, col));
        let below = matrix.get(index, col);
        match above {
            Some(cell) if below == Some(cell) => {
                if grown.insert(cell) {
                    let span = table.try_cell(cell)?.row_span();
                    pending.mark(cell, Mutation::RowSpan(span + 1));
                }
            }
            _ => cells += 1,
        }
    }

    let ids: Vec<CellId> = (0..cells).map(|_| table.create_cell(Cell::empty())).collect();
    table.insert_row(index, ids)?;
    pending.commit(table);
    Ok(index)
}

/// Remove physical row `row`
///
/// Cells that start above the row lose one row of span. Cells that start in
/// the row and continue below move down into the next row. Every other cell
/// of the row is removed with it.
pub fn remove_row(table: &mut Table, row: usize) -> TableResult<()> {
    ensure_row(table, row)?;
    debug!(row, "remove row");

    let matrix = build_matrix(table);
    let slots = matrix.row(row).to_vec();
    let mut shrunk = FxHashSet::default();

    for (col, slot) in slots.iter().enumerate() {
        let Some(cell) = *slot else {
            continue;
        };

        let from_above = row > 0 && matrix.get(row - 1, col) == Some(cell);
        let to_below = matrix.get(row + 1, col) == Some(cell);

        let shrink = if from_above {
            true
        } else if to_below {
            if table.row_of(cell) == Some(row) && row + 1 < table.row_count() {
                move_down(table, &matrix, cell, row, col)?;
            }
            true
        } else {
            trace!(%cell, col, "drop cell with its row");
            table.remove_cell(cell);
            false
        };

        if shrink && shrunk.insert(cell) {
            let cell = table.try_cell_mut(cell)?;
            let span = cell.row_span();
            cell.set_row_span(span.saturating_sub(1));
        }
    }

    table.remove_row_node(row)
}

/// Re-attach `cell` to the row below `row`, before the first cell of that row
/// that lies to its right
fn move_down(
    table: &mut Table,
    matrix: &OccupancyMatrix,
    cell: CellId,
    row: usize,
    col: usize,
) -> TableResult<()> {
    let next = row + 1;
    let sibling = (col..matrix.row_len(next))
        .filter_map(|c| matrix.get(next, c))
        .find(|&c| c != cell && table.row_of(c) == Some(next));

    trace!(%cell, ?sibling, "move cell to next row");
    match sibling {
        Some(sibling) => table.insert_cell_before(sibling, cell),
        None => table.append_cell(next, cell),
    }
}

/// Insert a column after (or before) matrix column `col`
///
/// Cells that do not end (or start) at `col` are widened instead of getting a
/// neighbour. A new cell copies the row span of the cell it is placed next to.
pub fn append_column(table: &mut Table, col: usize, after: bool) -> TableResult<()> {
    let matrix = build_matrix(table);
    ensure_column(table, col, matrix.width())?;
    debug!(col, after, "append column");

    let mut pending = PendingBuffer::new();
    let mut inserts = Vec::new();
    let mut seen = FxHashSet::default();

    for row in 0..matrix.row_count() {
        let Some(cell) = matrix.get(row, col) else {
            continue;
        };
        if !seen.insert(cell) {
            continue;
        }

        let at_edge = if after {
            matrix.get(row, col + 1) != Some(cell)
        } else {
            col == 0 || matrix.get(row, col - 1) != Some(cell)
        };

        let current = table.try_cell(cell)?;
        if at_edge {
            inserts.push((cell, current.row_span()));
        } else {
            pending.mark(cell, Mutation::ColSpan(current.col_span() + 1));
        }
    }

    for (anchor, row_span) in inserts {
        let id = table.create_cell(Cell::with_span("", 1, row_span));
        if after {
            table.insert_cell_after(anchor, id)?;
        } else {
            table.insert_cell_before(anchor, id)?;
        }
    }
    pending.commit(table);
    Ok(())
}

/// Remove matrix column `col`
///
/// Cells spanning more columns lose one column of span; the others are
/// removed. Rows left without cells and not covered by any span are dropped.
pub fn remove_column(table: &mut Table, col: usize) -> TableResult<()> {
    let matrix = build_matrix(table);
    ensure_column(table, col, matrix.width())?;
    debug!(col, "remove column");

    let mut pending = PendingBuffer::new();
    let mut seen = FxHashSet::default();

    for row in 0..matrix.row_count() {
        let Some(cell) = matrix.get(row, col) else {
            continue;
        };
        if !seen.insert(cell) {
            continue;
        }

        let spans_left = col > 0 && matrix.get(row, col - 1) == Some(cell);
        let spans_right = matrix.get(row, col + 1) == Some(cell);
        if spans_left || spans_right {
            let span = table.try_cell(cell)?.col_span();
            pending.mark(cell, Mutation::ColSpan(span - 1));
        } else {
            pending.mark(cell, Mutation::Remove);
        }
    }

    pending.commit(table);
    drop_empty_rows(table);
    Ok(())
}

/// Drop physical rows that have no cells and that no span reaches into
///
/// Returns the number of rows dropped.
pub fn drop_empty_rows(table: &mut Table) -> usize {
    let matrix = build_matrix(table);
    let empty: Vec<usize> = (0..table.row_count())
        .filter(|&r| {
            table.row(r).is_some_and(|row| row.is_empty())
                && matrix.row(r).iter().all(Option::is_none)
        })
        .collect();

    let mut dropped = 0;
    for &row in empty.iter().rev() {
        if table.remove_row_node(row).is_ok() {
            trace!(row, "dropped empty row");
            dropped += 1;
        }
    }
    dropped
}
