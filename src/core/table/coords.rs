//! Formal coordinates and selection bounds

use fxhash::FxHashSet;

use super::cell::CellId;
use super::matrix::{build_matrix, build_matrix_with, OccupancyMatrix, Visit};
use super::model::Table;
use crate::utils::error::{TableError, TableResult};

/// Position and extent of a cell in the occupancy matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
    pub col_span: usize,
    pub row_span: usize,
}

/// Inclusive rectangle of matrix positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bound {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
}

impl Bound {
    /// Bound covering a single position
    pub fn at(row: usize, col: usize) -> Self {
        Bound {
            top: row,
            left: col,
            bottom: row,
            right: col,
        }
    }

    /// Number of columns covered
    pub fn width(&self) -> usize {
        self.right - self.left + 1
    }

    /// Number of rows covered
    pub fn height(&self) -> usize {
        self.bottom - self.top + 1
    }

    pub fn is_single(&self) -> bool {
        self.top == self.bottom && self.left == self.right
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.top..=self.bottom).contains(&row) && (self.left..=self.right).contains(&col)
    }

    /// Widen the bound to include `(row, col)`; returns whether it grew
    pub fn include(&mut self, row: usize, col: usize) -> bool {
        let before = *self;
        self.top = self.top.min(row);
        self.left = self.left.min(col);
        self.bottom = self.bottom.max(row);
        self.right = self.right.max(col);
        *self != before
    }
}

/// Formal coordinate of `cell`
///
/// With `use_full_extent` the returned `row`/`col` point at the cell's
/// bottom-right corner instead of its top-left one.
pub fn coordinate_of(table: &Table, cell: CellId, use_full_extent: bool) -> TableResult<Coordinate> {
    let mut found = None;

    build_matrix_with(table, |placement| {
        if placement.cell != cell {
            return Visit::Continue;
        }
        let mut coordinate = Coordinate {
            row: placement.row,
            col: placement.col,
            col_span: placement.col_span,
            row_span: placement.row_span,
        };
        if use_full_extent {
            coordinate.row += placement.row_span - 1;
            coordinate.col += placement.col_span - 1;
        }
        found = Some(coordinate);
        Visit::Stop
    });

    found.ok_or(TableError::cell_not_found(cell))
}

/// Smallest span-closed rectangle covering every selected cell
///
/// Returns `None` when no selected cell occupies a matrix position.
pub fn selected_bound(table: &Table, selected: &[CellId]) -> Option<Bound> {
    selected_bound_in(&build_matrix(table), selected)
}

/// [`selected_bound`] over an already built matrix
pub fn selected_bound_in(matrix: &OccupancyMatrix, selected: &[CellId]) -> Option<Bound> {
    let selected: FxHashSet<CellId> = selected.iter().copied().collect();

    let mut bound: Option<Bound> = None;
    for (row, col, cell) in matrix.positions() {
        if selected.contains(&cell) {
            let mut b = bound.unwrap_or(Bound::at(row, col));
            b.include(row, col);
            bound = Some(b);
        }
    }

    let mut bound = bound?;
    while expand_over_spans(matrix, &mut bound) {}
    Some(bound)
}

/// One expansion sweep: pull in every outside position that shares a cell
/// with an inside position. Returns whether the bound grew.
fn expand_over_spans(matrix: &OccupancyMatrix, bound: &mut Bound) -> bool {
    let mut grew = false;
    let mut row = bound.top;

    while row <= bound.bottom {
        let mut col = bound.left;
        while col <= bound.right {
            if let Some(cell) = matrix.get(row, col) {
                let same = |r: usize, c: usize| matrix.get(r, c) == Some(cell);

                let mut k = 1;
                while col >= k && same(row, col - k) {
                    grew |= bound.include(row, col - k);
                    k += 1;
                }
                k = 1;
                while same(row, col + k) {
                    grew |= bound.include(row, col + k);
                    k += 1;
                }
                k = 1;
                while row >= k && same(row - k, col) {
                    grew |= bound.include(row - k, col);
                    k += 1;
                }
                k = 1;
                while same(row + k, col) {
                    grew |= bound.include(row + k, col);
                    k += 1;
                }
            }
            col += 1;
        }
        row += 1;
    }

    grew
}
