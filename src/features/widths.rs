//! Rendered widths and column width redistribution
//!
//! Structural edits that touch widths need the rendered pixel width of a cell
//! and of the whole table. The host supplies them through [`WidthMetrics`];
//! [`ColumnLayout`] derives them from the width attributes when no renderer
//! is at hand.

use tracing::debug;

use crate::core::table::{
    build_matrix, coordinate_of, CellId, Mutation, OccupancyMatrix, PendingBuffer, Table,
};
use crate::core::GridOptions;
use crate::utils::error::{TableError, TableResult};

/// Rendered widths of a table and its cells, in pixels
pub trait WidthMetrics {
    fn table_width(&self, table: &Table) -> f64;

    fn cell_width(&self, table: &Table, cell: CellId) -> f64;
}

/// Width metrics computed from the cells' percentage widths
///
/// A column takes the explicit percentage of the first single-column cell
/// that sets one; the remaining width is shared equally by the other columns.
/// A cell is as wide as the columns it covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnLayout {
    pub table_width: f64,
}

impl ColumnLayout {
    pub fn new(table_width: f64) -> Self {
        Self { table_width }
    }

    /// Pixel width of every matrix column
    pub fn column_widths(&self, table: &Table) -> Vec<f64> {
        self.column_widths_in(table, &build_matrix(table))
    }

    fn column_widths_in(&self, table: &Table, matrix: &OccupancyMatrix) -> Vec<f64> {
        let mut explicit: Vec<Option<f64>> = vec![None; matrix.width()];

        for (_, col, id) in matrix.positions() {
            if explicit[col].is_some() {
                continue;
            }
            let Some(cell) = table.cell(id) else {
                continue;
            };
            if cell.col_span() == 1 {
                if let Some(percent) = cell.width_percent() {
                    explicit[col] = Some(percent / 100.0 * self.table_width);
                }
            }
        }

        let fixed: f64 = explicit.iter().flatten().sum();
        let free = explicit.iter().filter(|w| w.is_none()).count();
        let share = if free > 0 {
            (self.table_width - fixed).max(0.0) / free as f64
        } else {
            0.0
        };

        explicit.into_iter().map(|w| w.unwrap_or(share)).collect()
    }
}

impl WidthMetrics for ColumnLayout {
    fn table_width(&self, _table: &Table) -> f64 {
        self.table_width
    }

    fn cell_width(&self, table: &Table, cell: CellId) -> f64 {
        let Ok(coord) = coordinate_of(table, cell, false) else {
            return 0.0;
        };
        self.column_widths(table)
            .iter()
            .skip(coord.col)
            .take(coord.col_span)
            .sum()
    }
}

/// Set the width of every cell in column `col` to its rendered width plus
/// `delta`, as a percentage of the table width
pub fn set_column_width_by_delta(
    table: &mut Table,
    col: usize,
    delta: f64,
    metrics: &dyn WidthMetrics,
) -> TableResult<()> {
    set_column_width_by_delta_with_options(table, col, delta, metrics, &GridOptions::default())
}

pub fn set_column_width_by_delta_with_options(
    table: &mut Table,
    col: usize,
    delta: f64,
    metrics: &dyn WidthMetrics,
    options: &GridOptions,
) -> TableResult<()> {
    let mut pending = PendingBuffer::new();
    queue_column_width_by_delta(table, col, delta, metrics, options, &mut pending)?;
    pending.commit(table);
    Ok(())
}

/// Like [`set_column_width_by_delta`], but only queues the new widths
pub fn queue_column_width_by_delta(
    table: &Table,
    col: usize,
    delta: f64,
    metrics: &dyn WidthMetrics,
    options: &GridOptions,
    pending: &mut PendingBuffer,
) -> TableResult<()> {
    if table.is_empty() {
        return Err(TableError::EmptyTable);
    }
    let matrix = build_matrix(table);
    let columns = matrix.width();
    if col >= columns {
        return Err(TableError::column_out_of_range(col, columns));
    }
    let table_width = metrics.table_width(table);
    if !(table_width.is_finite() && table_width > 0.0) {
        return Err(TableError::invalid_width(format!(
            "table width must be positive, got {}",
            table_width
        )));
    }

    debug!(col, delta, table_width, "queue column width");
    for row in 0..matrix.row_count() {
        let Some(cell) = matrix.get(row, col) else {
            continue;
        };
        let width = metrics.cell_width(table, cell);
        let percent = (width + delta) / table_width * 100.0;
        pending.mark(cell, Mutation::Width(options.format_percent(percent)));
    }

    Ok(())
}
