//! Table grid core
//!
//! A span-aware occupancy grid over a tree of rows and cells.
//!
//! This module provides:
//! - The table tree (`Table`, `Row`, `Cell`) with arena-backed cell handles
//! - The occupancy matrix builder and its visitor (`build_matrix_with`)
//! - Formal coordinates and span-closed selection bounds
//! - The deferred-apply buffer used by every structural edit
//!
//! # Architecture
//!
//! Operations never edit the tree while a matrix walk is running:
//!
//! ```text
//! Table -> build_matrix -> decide (PendingBuffer) -> commit -> Table
//! ```
//!
//! # Example
//!
//! ```
//! use tablegrid::core::table::{build_matrix, Cell, Table};
//!
//! let table = Table::from_rows(vec![
//!     vec![Cell::with_span("wide", 2, 1)],
//!     vec![Cell::new("a"), Cell::new("b")],
//! ]);
//! let matrix = build_matrix(&table);
//! assert_eq!(matrix.get(0, 0), matrix.get(0, 1));
//! assert_eq!(matrix.width(), 2);
//! ```

mod cell;
mod coords;
mod matrix;
mod model;
mod pending;


// Re-export public API
pub use cell::{Cell, CellId};
pub use coords::{coordinate_of, selected_bound, selected_bound_in, Bound, Coordinate};
pub use matrix::{
    build_matrix, build_matrix_with, columns_count, rows_count, OccupancyMatrix, Placement, Visit,
};
pub use model::{Row, Table};
pub use pending::{Mutation, PendingBuffer, PendingMutation};
