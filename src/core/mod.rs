//! Core grid modules
//!
//! This module contains the grid engine internals:
//! - `table`: table tree, occupancy matrix, coordinates, pending buffer
//! - `options`: options shared by the structural operations

pub mod options;
pub mod table;

pub use options::GridOptions;
pub use table::{
    build_matrix, build_matrix_with, columns_count, coordinate_of, rows_count, selected_bound,
    Bound, Cell, CellId, Coordinate, Mutation, OccupancyMatrix, PendingBuffer, Placement, Row,
    Table, Visit,
};
