//! Merging a rectangular selection into one cell

use fxhash::FxHashSet;
use tracing::{debug, warn};

use crate::core::table::{
    build_matrix, build_matrix_with, selected_bound_in, CellId, Mutation, PendingBuffer, Table,
    Visit,
};
use crate::core::GridOptions;
use crate::features::normalize::normalize;
use crate::features::structure::drop_empty_rows;
use crate::features::widths::{queue_column_width_by_delta, WidthMetrics};
use crate::utils::error::{TableError, TableResult};

/// Merge the span-closed bound of `selected` into its top-left cell
///
/// Returns the surviving cell, or `None` when the selection covers a single
/// position and there is nothing to merge.
pub fn merge_cells(
    table: &mut Table,
    selected: &[CellId],
    metrics: &dyn WidthMetrics,
) -> TableResult<Option<CellId>> {
    merge_cells_with_options(table, selected, metrics, &GridOptions::default())
}

pub fn merge_cells_with_options(
    table: &mut Table,
    selected: &[CellId],
    metrics: &dyn WidthMetrics,
    options: &GridOptions,
) -> TableResult<Option<CellId>> {
    if table.is_empty() {
        return Err(TableError::EmptyTable);
    }
    table.ensure_contains(selected)?;

    let matrix = build_matrix(table);
    let Some(bound) = selected_bound_in(&matrix, selected) else {
        return Ok(None);
    };
    if bound.is_single() {
        return Ok(None);
    }
    debug!(?bound, selected = selected.len(), "merge cells");

    let mut seen = FxHashSet::default();
    let mut survivor: Option<(CellId, usize)> = None;
    let mut width = 0.0;
    let mut parts = Vec::new();
    let mut pending = PendingBuffer::new();

    let view: &Table = table;
    build_matrix_with(view, |p| {
        if !bound.contains(p.row, p.col) || !seen.insert(p.cell) {
            return Visit::Continue;
        }
        let Some(cell) = view.cell(p.cell) else {
            return Visit::Continue;
        };

        if p.row == bound.top && cell.width.is_some() {
            width += metrics.cell_width(view, p.cell);
        }
        if !cell.is_blank() {
            parts.push(cell.content.clone());
        }

        match survivor {
            None => survivor = Some((p.cell, p.col)),
            Some(_) => pending.mark(p.cell, Mutation::Remove),
        }
        Visit::Continue
    });

    let Some((first, first_col)) = survivor else {
        return Ok(None);
    };

    pending.mark(first, Mutation::ColSpan(bound.width()));
    pending.mark(first, Mutation::RowSpan(bound.height()));

    if width > 0.0 {
        let table_width = metrics.table_width(table);
        if table_width > 0.0 {
            if first_col > 0 {
                queue_column_width_by_delta(table, first_col, 0.0, metrics, options, &mut pending)?;
            }
            let percent = width / table_width * 100.0;
            pending.mark(first, Mutation::Width(options.format_percent(percent)));
        } else {
            warn!(table_width, "table has no width, merged cell keeps its width");
        }
    }

    table.try_cell_mut(first)?.content = parts.join(&options.line_separator);
    pending.commit(table);

    normalize(table);
    drop_empty_rows(table);
    Ok(Some(first))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::{build_matrix, Cell};
    use crate::features::widths::ColumnLayout;

    fn layout() -> ColumnLayout {
        ColumnLayout::new(1000.0)
    }

    #[test]
    fn test_merge_whole_table() {
        let mut table = Table::from_rows(vec![
            vec![Cell::new("a"), Cell::new("b")],
            vec![Cell::new("c"), Cell::new("d")],
        ]);
        let all: Vec<CellId> = table.cell_ids().collect();
        let merged = merge_cells(&mut table, &all, &layout()).unwrap().unwrap();

        assert_eq!(table.cell_count(), 1);
        let cell = table.cell(merged).unwrap();
        assert_eq!(cell.content, "a<br/>b<br/>c<br/>d");
        assert_eq!((cell.colspan, cell.rowspan), (Some(2), Some(2)));
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_merge_skips_blank_content() {
        let mut table = Table::from_rows(vec![vec![
            Cell::new("a"),
            Cell::new("<br>"),
            Cell::new(" b "),
        ]]);
        let all: Vec<CellId> = table.cell_ids().collect();
        let options = GridOptions::default().line_separator(" | ");
        let merged = merge_cells_with_options(&mut table, &all, &layout(), &options)
            .unwrap()
            .unwrap();

        let cell = table.cell(merged).unwrap();
        assert_eq!(cell.content, "a |  b ");
        assert_eq!(cell.colspan, Some(3));
    }

    #[test]
    fn test_merge_single_position_is_noop() {
        let mut table = Table::grid(2, 2);
        let a = table.cell_at(0, 0).unwrap();
        assert_eq!(merge_cells(&mut table, &[a], &layout()), Ok(None));
        assert_eq!(merge_cells(&mut table, &[], &layout()), Ok(None));
        assert_eq!(table.cell_count(), 4);
    }

    #[test]
    fn test_merge_grows_to_span_closed_bound() {
        let mut table = Table::from_rows(vec![
            vec![Cell::new("a"), Cell::new("b"), Cell::new("c")],
            vec![Cell::new("d"), Cell::with_span("X", 2, 2)],
            vec![Cell::new("e")],
        ]);
        let a = table.cell_at(0, 0).unwrap();
        let b = table.cell_at(0, 1).unwrap();
        let d = table.cell_at(1, 0).unwrap();
        let merged = merge_cells(&mut table, &[b, d], &layout()).unwrap().unwrap();

        assert_eq!(merged, a);
        assert_eq!(table.cell_count(), 1);
        assert_eq!(table.row_count(), 3);
        let cell = table.cell(a).unwrap();
        assert_eq!(cell.content, "a<br/>b<br/>c<br/>d<br/>X<br/>e");
        assert_eq!((cell.col_span(), cell.row_span()), (3, 3));
    }

    #[test]
    fn test_merge_keeps_spanning_cell_whole() {
        let mut table = Table::from_rows(vec![
            vec![Cell::new("a"), Cell::new("b"), Cell::new("c")],
            vec![Cell::new("d"), Cell::with_span("X", 2, 2)],
            vec![Cell::new("e")],
        ]);
        let b = table.cell_at(0, 1).unwrap();
        let c = table.cell_at(0, 2).unwrap();
        let x = table.cell_at(1, 1).unwrap();
        let merged = merge_cells(&mut table, &[c, x], &layout()).unwrap().unwrap();

        assert_eq!(merged, b);
        let matrix = build_matrix(&table);
        assert!(matrix.is_rectangular());
        // Both merged columns are covered by `b` alone, so they collapse
        assert_eq!(matrix.width(), 2);
        assert_eq!(matrix.get(2, 1), Some(b));
        let cell = table.cell(b).unwrap();
        assert_eq!((cell.col_span(), cell.row_span()), (1, 3));
        assert_eq!(cell.content, "b<br/>c<br/>X");
    }

    #[test]
    fn test_merge_sums_explicit_widths() {
        let mut table = Table::from_rows(vec![
            vec![
                Cell::new("a").with_width("20%"),
                Cell::new("b").with_width("30%"),
                Cell::new("c").with_width("50%"),
            ],
            vec![Cell::new("d"), Cell::new("e"), Cell::new("f")],
        ]);
        let b = table.cell_at(0, 1).unwrap();
        let c = table.cell_at(0, 2).unwrap();
        let options = GridOptions::with_precision(1);
        merge_cells_with_options(&mut table, &[b, c], &layout(), &options).unwrap();

        assert_eq!(table.cell(b).unwrap().width.as_deref(), Some("80.0%"));
        let e = table.cell_at(1, 1).unwrap();
        assert_eq!(table.cell(e).unwrap().width.as_deref(), Some("30.0%"));
    }

    #[test]
    fn test_merge_partial_height_drops_emptied_row() {
        let mut table = Table::from_rows(vec![
            vec![Cell::new("a"), Cell::new("b")],
            vec![Cell::new("c"), Cell::new("d")],
            vec![Cell::new("e"), Cell::new("f")],
        ]);
        let a = table.cell_at(0, 0).unwrap();
        let d = table.cell_at(1, 1).unwrap();
        let merged = merge_cells(&mut table, &[a, d], &layout()).unwrap().unwrap();

        assert_eq!(merged, a);
        assert_eq!(table.row_count(), 2);
        assert!(table.rows().iter().all(|row| !row.is_empty()));
        let cell = table.cell(a).unwrap();
        assert_eq!(cell.content, "a<br/>b<br/>c<br/>d");
        assert_eq!((cell.colspan, cell.rowspan), (Some(2), None));
        assert!(build_matrix(&table).is_rectangular());
    }

    #[test]
    fn test_merge_freezes_tall_cell_in_survivor_column() {
        let mut table = Table::from_rows(vec![
            vec![
                Cell::new("a").with_width("20%"),
                Cell::new("b").with_width("30%"),
                Cell::new("c").with_width("50%"),
            ],
            vec![Cell::new("d"), Cell::with_span("tall", 1, 2), Cell::new("f")],
            vec![Cell::new("g"), Cell::new("i")],
        ]);
        let b = table.cell_at(0, 1).unwrap();
        let c = table.cell_at(0, 2).unwrap();
        let tall = table.cell_at(1, 1).unwrap();
        let options = GridOptions::with_precision(1);
        let rendered = layout().cell_width(&table, tall);
        merge_cells_with_options(&mut table, &[b, c], &layout(), &options).unwrap();

        let cell = table.cell(tall).unwrap();
        assert_eq!(cell.row_span(), 2);
        assert_eq!(cell.width.as_deref(), Some("30.0%"));
        assert_eq!(
            cell.width,
            Some(options.format_percent(rendered / 1000.0 * 100.0))
        );
        assert_eq!(table.cell(b).unwrap().width.as_deref(), Some("80.0%"));
        assert_eq!(table.cell(b).unwrap().col_span(), 2);
    }

    #[test]
    fn test_merge_rejects_foreign_cells() {
        let mut table = Table::grid(2, 2);
        let stray = table.create_cell(Cell::empty());
        let a = table.cell_at(0, 0).unwrap();
        assert_eq!(
            merge_cells(&mut table, &[a, stray], &layout()),
            Err(TableError::cell_not_found(stray))
        );
        assert_eq!(table.cell_count(), 4);
    }
}
