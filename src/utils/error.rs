//! Error handling for tablegrid operations
//!
//! This module provides a unified error type and result type for all
//! structural table operations. Every variant describes a violated caller
//! contract; malformed spans inside a table are tolerated and never produce
//! an error.

use thiserror::Error;

use crate::core::table::CellId;

/// Table operation error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// The cell handle does not belong to the table (or was removed)
    #[error("Cell {cell} is not part of this table")]
    CellNotFound { cell: CellId },
    /// Row index outside the current table
    #[error("Row index {index} is out of range (table has {rows} rows)")]
    RowOutOfRange { index: usize, rows: usize },
    /// Column index outside the current occupancy matrix
    #[error("Column index {index} is out of range (table has {columns} columns)")]
    ColumnOutOfRange { index: usize, columns: usize },
    /// Operation requires at least one row
    #[error("Operation requires a table with at least one row")]
    EmptyTable,
    /// Width metrics cannot be turned into percentages
    #[error("Invalid width: {message}")]
    InvalidWidth { message: String },
    /// Invalid input (malformed interchange document, bad operation)
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

// Convenience constructors for errors
impl TableError {
    pub fn cell_not_found(cell: CellId) -> Self {
        TableError::CellNotFound { cell }
    }

    pub fn row_out_of_range(index: usize, rows: usize) -> Self {
        TableError::RowOutOfRange { index, rows }
    }

    pub fn column_out_of_range(index: usize, columns: usize) -> Self {
        TableError::ColumnOutOfRange { index, columns }
    }

    pub fn invalid_width(message: impl Into<String>) -> Self {
        TableError::InvalidWidth {
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        TableError::InvalidInput {
            message: message.into(),
        }
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for TableError {
    fn from(err: serde_json::Error) -> Self {
        TableError::invalid(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_out_of_range_display() {
        let err = TableError::row_out_of_range(5, 3);
        let msg = err.to_string();
        assert!(msg.contains("Row index 5"));
        assert!(msg.contains("3 rows"));
    }

    #[test]
    fn test_column_out_of_range_display() {
        let err = TableError::column_out_of_range(4, 2);
        assert!(err.to_string().contains("2 columns"));
    }

    #[test]
    fn test_invalid_input() {
        let err = TableError::invalid("missing rows");
        assert!(err.to_string().contains("Invalid input"));
        assert!(err.to_string().contains("missing rows"));
    }

    #[test]
    fn test_cell_not_found_names_the_cell() {
        let err = TableError::cell_not_found(CellId::from_index(7));
        assert!(err.to_string().contains("#7"));
    }
}
