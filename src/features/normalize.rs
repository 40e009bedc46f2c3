//! Span normalization
//!
//! Structural edits can leave a layer of span that every cell on a line
//! shares (e.g. two stacked cells that both span two columns). This module
//! removes such layers and drops unit span attributes and empty classes.
//! A cell that covers the whole matrix keeps its spans.

use fxhash::FxHashSet;
use tracing::debug;

use crate::core::table::{
    build_matrix, Cell, CellId, Mutation, OccupancyMatrix, PendingBuffer, Table,
};

/// Remove redundant spans and empty attributes
///
/// Three passes run over one matrix and are committed together:
/// columns whose cells all span at least two columns shed the common excess,
/// rows do the same for row spans, and every cell gets its unit spans and
/// empty class dropped.
pub fn normalize(table: &mut Table) {
    let matrix = build_matrix(table);
    let mut pending = PendingBuffer::new();

    if !covered_by_one_cell(&matrix) {
        for col in 0..matrix.width() {
            let line = (0..matrix.row_count()).filter_map(|row| matrix.get(row, col));
            queue_shared_excess(table, line, Cell::col_span, Mutation::ColSpan, &mut pending);
        }

        for row in 0..matrix.row_count() {
            let line = matrix.row(row).iter().flatten().copied();
            queue_shared_excess(table, line, Cell::row_span, Mutation::RowSpan, &mut pending);
        }
    }

    let mut seen = FxHashSet::default();
    for (_, _, cell) in matrix.positions() {
        if seen.insert(cell) {
            pending.mark(cell, Mutation::Tidy);
        }
    }

    let touched = pending.commit(table);
    debug!(touched, "normalized table");
}

/// Whether a single cell occupies every position of the matrix
fn covered_by_one_cell(matrix: &OccupancyMatrix) -> bool {
    let Some(first) = matrix.get(0, 0) else {
        return false;
    };
    (0..matrix.row_count())
        .all(|row| (0..matrix.width()).all(|col| matrix.get(row, col) == Some(first)))
}

fn queue_shared_excess(
    table: &Table,
    line: impl Iterator<Item = CellId>,
    span_of: fn(&Cell) -> usize,
    mutation: fn(usize) -> Mutation,
    pending: &mut PendingBuffer,
) {
    let mut spans = Vec::new();
    for id in line {
        let Some(cell) = table.cell(id) else {
            continue;
        };
        let span = span_of(cell);
        if span < 2 {
            return;
        }
        spans.push((id, span));
    }

    let Some(min) = spans.iter().map(|&(_, span)| span).min() else {
        return;
    };
    for (id, span) in spans {
        pending.mark(id, mutation(span - min + 1));
    }
}
