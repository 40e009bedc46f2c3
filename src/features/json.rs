//! JSON interchange format
//!
//! A table travels as nested rows of cells; a cell's identity is its
//! position, so handles are not part of the document.
//!
//! ```json
//! { "rows": [ { "cells": [ { "content": "a", "colspan": 2, "selected": true } ] } ] }
//! ```

use serde::{Deserialize, Serialize};

use crate::core::table::{Cell, Table};
use crate::utils::error::TableResult;

/// Serialized table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableDoc {
    #[serde(default)]
    pub rows: Vec<RowDoc>,
}

/// Serialized row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowDoc {
    #[serde(default)]
    pub cells: Vec<CellDoc>,
}

/// Serialized cell; absent attributes are omitted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellDoc {
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colspan: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rowspan: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl From<CellDoc> for Cell {
    fn from(doc: CellDoc) -> Self {
        Cell {
            content: doc.content,
            colspan: doc.colspan,
            rowspan: doc.rowspan,
            width: doc.width,
            class: doc.class,
            selected: doc.selected,
        }
    }
}

impl From<&Cell> for CellDoc {
    fn from(cell: &Cell) -> Self {
        CellDoc {
            content: cell.content.clone(),
            colspan: cell.colspan,
            rowspan: cell.rowspan,
            width: cell.width.clone(),
            class: cell.class.clone(),
            selected: cell.selected,
        }
    }
}

impl From<TableDoc> for Table {
    fn from(doc: TableDoc) -> Self {
        Table::from_rows(
            doc.rows
                .into_iter()
                .map(|row| row.cells.into_iter().map(Cell::from)),
        )
    }
}

impl From<&Table> for TableDoc {
    fn from(table: &Table) -> Self {
        let rows = table
            .rows()
            .iter()
            .map(|row| RowDoc {
                cells: row
                    .cells()
                    .iter()
                    .filter_map(|&id| table.cell(id))
                    .map(CellDoc::from)
                    .collect(),
            })
            .collect();
        TableDoc { rows }
    }
}

/// Parse a table from its JSON document
pub fn table_from_json(input: &str) -> TableResult<Table> {
    let doc: TableDoc = serde_json::from_str(input)?;
    Ok(doc.into())
}

/// Serialize a table to its JSON document
pub fn table_to_json(table: &Table, pretty: bool) -> TableResult<String> {
    let doc = TableDoc::from(table);
    let json = if pretty {
        serde_json::to_string_pretty(&doc)?
    } else {
        serde_json::to_string(&doc)?
    };
    Ok(json)
}
