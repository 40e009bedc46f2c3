//! Table tree: ordered rows of physically attached cells
//!
//! Cells live in an arena owned by the [`Table`] and are addressed through
//! [`CellId`] handles. A row only lists the cells physically attached to it;
//! a cell spanning several rows is attached to its topmost row.

use super::cell::{Cell, CellId};
use crate::utils::error::{TableError, TableResult};

/// A table row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<CellId>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells attached to this row, left to right
    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn position(&self, cell: CellId) -> Option<usize> {
        self.cells.iter().position(|&c| c == cell)
    }
}

/// Complete table structure
#[derive(Debug, Clone, Default)]
pub struct Table {
    rows: Vec<Row>,
    arena: Vec<Option<Cell>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from rows of cells
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = Cell>,
    {
        let mut table = Self::new();
        for row in rows {
            table.push_row(row);
        }
        table
    }

    /// Build a `rows × cols` table of empty cells
    pub fn grid(rows: usize, cols: usize) -> Self {
        Self::from_rows((0..rows).map(|_| (0..cols).map(|_| Cell::empty())))
    }

    /// Append a row at the bottom and return its index
    pub fn push_row(&mut self, cells: impl IntoIterator<Item = Cell>) -> usize {
        let ids = cells.into_iter().map(|cell| self.create_cell(cell)).collect();
        self.rows.push(Row { cells: ids });
        self.rows.len() - 1
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Number of physical rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.arena.get(id.index()).and_then(Option::as_ref)
    }

    pub fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.arena.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Like [`Table::cell`], but a missing cell is an error
    pub fn try_cell(&self, id: CellId) -> TableResult<&Cell> {
        self.cell(id).ok_or(TableError::cell_not_found(id))
    }

    pub fn try_cell_mut(&mut self, id: CellId) -> TableResult<&mut Cell> {
        self.cell_mut(id).ok_or(TableError::cell_not_found(id))
    }

    /// Physical cell `index` of row `row`
    pub fn cell_at(&self, row: usize, index: usize) -> Option<CellId> {
        self.rows.get(row)?.cells.get(index).copied()
    }

    /// All attached cells in document order (rows top to bottom, cells left to right)
    pub fn cell_ids(&self) -> impl Iterator<Item = CellId> + '_ {
        self.rows.iter().flat_map(|row| row.cells.iter().copied())
    }

    /// Number of attached cells
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Row::len).sum()
    }

    /// Whether the cell is attached to one of this table's rows
    pub fn contains(&self, id: CellId) -> bool {
        self.row_of(id).is_some()
    }

    /// Physical row the cell is attached to
    pub fn row_of(&self, id: CellId) -> Option<usize> {
        self.position_of(id).map(|(row, _)| row)
    }

    /// Physical `(row, index)` position of the cell
    pub fn position_of(&self, id: CellId) -> Option<(usize, usize)> {
        self.rows
            .iter()
            .enumerate()
            .find_map(|(r, row)| row.position(id).map(|i| (r, i)))
    }

    /// Fail with `CellNotFound` unless every cell is attached
    pub fn ensure_contains(&self, ids: &[CellId]) -> TableResult<()> {
        match ids.iter().find(|&&id| !self.contains(id)) {
            Some(&missing) => Err(TableError::cell_not_found(missing)),
            None => Ok(()),
        }
    }

    /// Store a detached cell; attach it with one of the `insert_*` methods
    pub fn create_cell(&mut self, cell: Cell) -> CellId {
        self.arena.push(Some(cell));
        CellId::from_index(self.arena.len() - 1)
    }

    /// Attach `cell` at physical `index` of `row`, detaching it first if needed
    pub fn insert_cell(&mut self, row: usize, index: usize, cell: CellId) -> TableResult<()> {
        self.try_cell(cell)?;
        let rows = self.rows.len();
        if row >= rows {
            return Err(TableError::row_out_of_range(row, rows));
        }
        self.detach_cell(cell);
        let target = &mut self.rows[row].cells;
        let index = index.min(target.len());
        target.insert(index, cell);
        Ok(())
    }

    /// Attach `cell` at the end of `row`
    pub fn append_cell(&mut self, row: usize, cell: CellId) -> TableResult<()> {
        self.insert_cell(row, usize::MAX, cell)
    }

    /// Attach `cell` right after `anchor`, in the anchor's row
    pub fn insert_cell_after(&mut self, anchor: CellId, cell: CellId) -> TableResult<()> {
        self.insert_cell_next_to(anchor, cell, 1)
    }

    /// Attach `cell` right before `anchor`, in the anchor's row
    pub fn insert_cell_before(&mut self, anchor: CellId, cell: CellId) -> TableResult<()> {
        self.insert_cell_next_to(anchor, cell, 0)
    }

    fn insert_cell_next_to(&mut self, anchor: CellId, cell: CellId, offset: usize) -> TableResult<()> {
        self.try_cell(cell)?;
        self.detach_cell(cell);
        let (row, index) = self
            .position_of(anchor)
            .ok_or(TableError::cell_not_found(anchor))?;
        self.rows[row].cells.insert(index + offset, cell);
        Ok(())
    }

    /// Remove the cell from its row but keep it in the arena
    pub fn detach_cell(&mut self, id: CellId) -> bool {
        match self.position_of(id) {
            Some((row, index)) => {
                self.rows[row].cells.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove the cell from the table entirely
    pub fn remove_cell(&mut self, id: CellId) -> Option<Cell> {
        self.detach_cell(id);
        self.arena.get_mut(id.index()).and_then(Option::take)
    }

    /// Insert a row of detached or new cells at `index`
    pub fn insert_row(&mut self, index: usize, cells: Vec<CellId>) -> TableResult<()> {
        let rows = self.rows.len();
        if index > rows {
            return Err(TableError::row_out_of_range(index, rows));
        }
        for &cell in &cells {
            self.try_cell(cell)?;
        }
        for &cell in &cells {
            self.detach_cell(cell);
        }
        self.rows.insert(index, Row { cells });
        Ok(())
    }

    /// Detach a row node; cells still attached to it are removed with it
    pub fn remove_row_node(&mut self, index: usize) -> TableResult<()> {
        let rows = self.rows.len();
        if index >= rows {
            return Err(TableError::row_out_of_range(index, rows));
        }
        let row = self.rows.remove(index);
        for cell in row.cells {
            if let Some(slot) = self.arena.get_mut(cell.index()) {
                *slot = None;
            }
        }
        Ok(())
    }
}
