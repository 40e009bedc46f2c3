//! Occupancy matrix builder
//!
//! The matrix maps every formal `(row, col)` position to the cell covering it.
//! It is rebuilt from the table on demand and never cached. Malformed tables
//! (spans overrunning the table, overlapping cells) leave holes, which read
//! back as `None`.

use super::cell::CellId;
use super::model::Table;

/// Visitor verdict for [`build_matrix_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Continue,
    Stop,
}

/// One filled matrix position, as reported to a visitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub cell: CellId,
    pub row: usize,
    pub col: usize,
    pub col_span: usize,
    pub row_span: usize,
}

/// Derived `matrix[row][col] -> cell` view of a table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupancyMatrix {
    rows: Vec<Vec<Option<CellId>>>,
}

impl OccupancyMatrix {
    /// Cell covering `(row, col)`; holes and out-of-range positions are `None`
    pub fn get(&self, row: usize, col: usize) -> Option<CellId> {
        self.rows.get(row)?.get(col).copied().flatten()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of one matrix row (including trailing holes that were filled past)
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    /// Widest matrix row: the table's column count
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn row(&self, row: usize) -> &[Option<CellId>] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<CellId>]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Every occupied position in reading order
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize, CellId)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(c, slot)| slot.map(|cell| (r, c, cell)))
        })
    }

    /// Whether every row has the same length and no holes
    pub fn is_rectangular(&self) -> bool {
        let width = self.width();
        self.rows
            .iter()
            .all(|row| row.len() == width && row.iter().all(Option::is_some))
    }

    fn first_free(&self, row: usize) -> usize {
        let mut col = 0;
        while self.get(row, col).is_some() {
            col += 1;
        }
        col
    }

    fn set(&mut self, row: usize, col: usize, cell: CellId) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let slots = &mut self.rows[row];
        if slots.len() <= col {
            slots.resize(col + 1, None);
        }
        slots[col] = Some(cell);
    }
}

/// Build the occupancy matrix of a table
pub fn build_matrix(table: &Table) -> OccupancyMatrix {
    build_matrix_with(table, |_| Visit::Continue)
}

/// Build the occupancy matrix, reporting every filled position to `visit`
///
/// Positions are reported in fill order: physical rows top to bottom, cells
/// left to right, and within a cell its rows then its columns. Returning
/// [`Visit::Stop`] ends the walk; the partially built matrix is returned.
pub fn build_matrix_with<F>(table: &Table, mut visit: F) -> OccupancyMatrix
where
    F: FnMut(&Placement) -> Visit,
{
    let mut matrix = OccupancyMatrix::default();

    for (i, row) in table.rows().iter().enumerate() {
        if matrix.rows.len() <= i {
            matrix.rows.resize_with(i + 1, Vec::new);
        }

        for &id in row.cells() {
            let Some(cell) = table.cell(id) else {
                continue;
            };
            let (col_span, row_span) = (cell.col_span(), cell.row_span());
            let start = matrix.first_free(i);

            for r in 0..row_span {
                for c in 0..col_span {
                    let placement = Placement {
                        cell: id,
                        row: i + r,
                        col: start + c,
                        col_span,
                        row_span,
                    };
                    if visit(&placement) == Visit::Stop {
                        return matrix;
                    }
                    matrix.set(i + r, start + c, id);
                }
            }
        }
    }

    matrix
}

/// Number of columns of the table (widest matrix row)
pub fn columns_count(table: &Table) -> usize {
    build_matrix(table).width()
}

/// Number of physical rows of the table
pub fn rows_count(table: &Table) -> usize {
    table.row_count()
}
