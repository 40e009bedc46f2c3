//! Integration tests for tablegrid structural edits

use pretty_assertions::assert_eq;
use tablegrid::{
    append_column, append_row, build_matrix, columns_count, coordinate_of, merge_cells, normalize,
    remove_column, remove_row, selected_bound, split_horizontal, split_vertical, Cell, CellId,
    ColumnLayout, Table, TableError,
};

fn labelled(rows: &[&[&str]]) -> Table {
    Table::from_rows(
        rows.iter()
            .map(|row| row.iter().map(|&s| Cell::new(s)).collect::<Vec<_>>()),
    )
}

fn spans(table: &Table) -> Vec<(usize, usize)> {
    table
        .cell_ids()
        .filter_map(|id| table.cell(id))
        .map(|c| (c.col_span(), c.row_span()))
        .collect()
}

/// Matrix rows rendered with cell contents (`_` for empty cells and holes)
fn shape(table: &Table) -> Vec<String> {
    let matrix = build_matrix(table);
    matrix
        .rows()
        .map(|row| {
            row.iter()
                .map(|slot| {
                    slot.and_then(|id| table.cell(id))
                        .map(|c| c.content.clone())
                        .filter(|s| !s.is_empty())
                        .unwrap_or_else(|| "_".to_string())
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

// ============================================================================
// Scenarios
// ============================================================================

mod scenarios {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_merge_whole_two_by_two() {
        let mut table = labelled(&[&["a", "b"], &["c", "d"]]);
        let all: Vec<CellId> = table.cell_ids().collect();
        let merged = merge_cells(&mut table, &all, &ColumnLayout::new(800.0))
            .unwrap()
            .unwrap();

        assert_eq!(table.cell_count(), 1);
        let cell = table.cell(merged).unwrap();
        assert_eq!(cell.content, "a<br/>b<br/>c<br/>d");
        assert_eq!((cell.colspan, cell.rowspan), (Some(2), Some(2)));
    }

    #[test]
    fn test_remove_first_column_of_one_by_two() {
        let mut table = labelled(&[&["a", "b"]]);
        remove_column(&mut table, 0).unwrap();

        assert_eq!(columns_count(&table), 1);
        assert_eq!(shape(&table), vec!["b"]);
        assert_eq!(spans(&table), vec![(1, 1)]);
        let b = table.cell_at(0, 0).unwrap();
        assert_eq!(table.cell(b).unwrap().colspan, None);
    }

    #[test]
    fn test_leading_colspan_counts_columns() {
        let table = Table::from_rows(vec![
            vec![Cell::with_span("A", 2, 1), Cell::new("B")],
            vec![Cell::new("C"), Cell::new("D"), Cell::new("E")],
            vec![Cell::new("F"), Cell::new("G"), Cell::new("H")],
        ]);
        let matrix = build_matrix(&table);
        let a = table.cell_at(0, 0).unwrap();

        assert_eq!(columns_count(&table), 3);
        assert_eq!(matrix.get(0, 0), Some(a));
        assert_eq!(matrix.get(0, 1), Some(a));
    }

    #[test]
    fn test_split_vertical_in_single_column() {
        let mut table = labelled(&[&["a"], &["b"]]);
        let a = table.cell_at(0, 0).unwrap();
        let b = table.cell_at(1, 0).unwrap();
        let created = split_vertical(&mut table, &[a], &ColumnLayout::new(500.0)).unwrap();

        assert_eq!(columns_count(&table), 2);
        assert_eq!(table.cell(b).unwrap().col_span(), 2);

        let halves: f64 = [a, created[0]]
            .iter()
            .filter_map(|&id| table.cell(id).and_then(|c| c.width_percent()))
            .sum();
        assert!((halves - 100.0).abs() < 1e-6, "halves sum to {}", halves);
    }
}

// ============================================================================
// Properties
// ============================================================================

mod properties {
    use super::*;
    use pretty_assertions::assert_eq;

    fn block_table() -> Table {
        Table::from_rows(vec![
            vec![Cell::new("a"), Cell::new("b"), Cell::new("c")],
            vec![Cell::new("d"), Cell::with_span("X", 2, 2)],
            vec![Cell::new("e")],
        ])
    }

    #[test]
    fn test_well_formed_tables_are_rectangular() {
        let tables = [
            Table::grid(3, 4),
            block_table(),
            Table::from_rows(vec![
                vec![Cell::with_span("t", 1, 3), Cell::new("a")],
                vec![Cell::new("b")],
                vec![Cell::new("c")],
            ]),
        ];
        for table in &tables {
            let matrix = build_matrix(table);
            assert!(matrix.is_rectangular());
            for row in matrix.rows() {
                assert_eq!(row.len(), columns_count(table));
            }
        }
    }

    #[test]
    fn test_coordinates_round_trip() {
        let table = block_table();
        let matrix = build_matrix(&table);
        for id in table.cell_ids() {
            let coord = coordinate_of(&table, id, false).unwrap();
            assert_eq!(matrix.get(coord.row, coord.col), Some(id));
            let end = coordinate_of(&table, id, true).unwrap();
            assert_eq!(matrix.get(end.row, end.col), Some(id));
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut table = Table::from_rows(vec![
            vec![Cell::with_span("a", 2, 1), Cell::with_span("t", 1, 2)],
            vec![Cell::with_span("b", 2, 1)],
        ]);
        normalize(&mut table);
        let once = shape(&table);
        assert_eq!(once, vec!["a t", "b t"]);
        normalize(&mut table);
        assert_eq!(shape(&table), once);
    }

    #[test]
    fn test_merge_then_split_restores_shape() {
        let mut table = labelled(&[&["a", "b", "c"], &["d", "e", "f"], &["g", "h", "i"]]);
        let before = build_matrix(&table);
        let layout = ColumnLayout::new(900.0);

        let e = table.cell_at(1, 1).unwrap();
        let f = table.cell_at(1, 2).unwrap();
        let merged = merge_cells(&mut table, &[e, f], &layout).unwrap().unwrap();
        assert_eq!(shape(&table), vec!["a b c", "d e<br/>f e<br/>f", "g h i"]);

        split_vertical(&mut table, &[merged], &layout).unwrap();
        let after = build_matrix(&table);
        assert_eq!(after.row_count(), before.row_count());
        assert_eq!(after.width(), before.width());
        assert!(after.is_rectangular());
    }

    #[test]
    fn test_merge_never_slices_a_span() {
        let mut table = block_table();
        let c = table.cell_at(0, 2).unwrap();
        let d = table.cell_at(1, 0).unwrap();
        let bound = selected_bound(&table, &[c, d]).unwrap();
        assert_eq!((bound.width(), bound.height()), (3, 3));

        merge_cells(&mut table, &[c, d], &ColumnLayout::new(600.0)).unwrap();
        assert_eq!(table.cell_count(), 1);
        assert!(build_matrix(&table).is_rectangular());
    }

    #[test]
    fn test_split_horizontal_then_merge_back() {
        let mut table = labelled(&[&["a", "b"]]);
        let a = table.cell_at(0, 0).unwrap();
        let created = split_horizontal(&mut table, &[a]).unwrap();
        assert_eq!(shape(&table), vec!["a b", "_ b"]);

        merge_cells(&mut table, &[a, created[0]], &ColumnLayout::new(400.0)).unwrap();
        assert_eq!(shape(&table), vec!["a b"]);
        assert_eq!(spans(&table), vec![(1, 1), (1, 1)]);
    }

    #[test]
    fn test_row_edits_keep_table_rectangular() {
        let mut table = block_table();
        append_row(&mut table, Some(1), true).unwrap();
        assert_eq!(table.row_count(), 4);
        assert!(build_matrix(&table).is_rectangular());

        remove_row(&mut table, 1).unwrap();
        assert!(build_matrix(&table).is_rectangular());
        assert_eq!(shape(&table), vec!["a b c", "_ X X", "e X X"]);
    }

    #[test]
    fn test_column_edits_keep_table_rectangular() {
        let mut table = block_table();
        append_column(&mut table, 1, true).unwrap();
        assert_eq!(columns_count(&table), 4);
        assert!(build_matrix(&table).is_rectangular());

        remove_column(&mut table, 2).unwrap();
        assert_eq!(columns_count(&table), 3);
        assert!(build_matrix(&table).is_rectangular());
    }
}

// ============================================================================
// Errors
// ============================================================================

mod errors {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_out_of_range_edits_do_not_mutate() {
        let mut table = labelled(&[&["a", "b"], &["c", "d"]]);
        let before = shape(&table);

        assert_eq!(
            remove_row(&mut table, 9),
            Err(TableError::row_out_of_range(9, 2))
        );
        assert_eq!(
            append_column(&mut table, 2, true),
            Err(TableError::column_out_of_range(2, 2))
        );
        assert_eq!(
            remove_column(&mut table, 2),
            Err(TableError::column_out_of_range(2, 2))
        );
        assert_eq!(shape(&table), before);
    }

    #[test]
    fn test_foreign_cells_are_rejected() {
        let mut table = Table::grid(2, 2);
        let missing = CellId::from_index(100);

        assert_eq!(
            merge_cells(&mut table, &[missing], &ColumnLayout::new(100.0)),
            Err(TableError::cell_not_found(missing))
        );
        assert_eq!(
            split_horizontal(&mut table, &[missing]),
            Err(TableError::cell_not_found(missing))
        );
        assert_eq!(table.cell_count(), 4);
    }

    #[test]
    fn test_empty_table() {
        let mut table = Table::new();
        assert_eq!(append_row(&mut table, None, true), Err(TableError::EmptyTable));
        assert_eq!(
            split_vertical(&mut table, &[], &ColumnLayout::new(100.0)),
            Err(TableError::EmptyTable)
        );
    }
}

// ============================================================================
// Interchange
// ============================================================================

#[cfg(feature = "serde")]
mod interchange {
    use super::*;
    use pretty_assertions::assert_eq;
    use tablegrid::{apply_to_json, table_from_json, table_to_json, GridOptions, Operation};

    #[test]
    fn test_json_round_trip_keeps_attributes() {
        let input = r#"{"rows":[{"cells":[{"content":"a","colspan":2,"width":"50%","class":"x"}]},{"cells":[{"content":"b"},{"content":"c"}]}]}"#;
        let table = table_from_json(input).unwrap();
        assert_eq!(table_to_json(&table, false).unwrap(), input);
    }

    #[test]
    fn test_apply_operation_from_json() {
        let input = r#"{"rows":[{"cells":[{"content":"a"},{"content":"b"}]}]}"#;
        let op: Operation = serde_json::from_str(r#"{"op":"append_row"}"#).unwrap();
        let output = apply_to_json(input, &op, 400.0, &GridOptions::default()).unwrap();
        assert_eq!(
            output,
            r#"{"rows":[{"cells":[{"content":"a"},{"content":"b"}]},{"cells":[{"content":""},{"content":""}]}]}"#
        );
    }
}
