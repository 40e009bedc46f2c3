//! Text renderings of a table
//!
//! - `table_to_html`: the table tree as `<table>` markup
//! - `matrix_to_text`: the occupancy matrix, one line per matrix row

use std::fmt::Write;

use fxhash::FxHashMap;

use crate::core::table::{build_matrix, Cell, CellId, Table};

/// Render the table as HTML
///
/// Cell content is emitted as is; attribute values are escaped.
pub fn table_to_html(table: &Table) -> String {
    let mut output = String::from("<table>\n<tbody>\n");

    for row in table.rows() {
        output.push_str("<tr>");
        for cell in row.cells().iter().filter_map(|&id| table.cell(id)) {
            output.push_str("<td");
            push_attributes(&mut output, cell);
            output.push('>');
            output.push_str(&cell.content);
            output.push_str("</td>");
        }
        output.push_str("</tr>\n");
    }

    output.push_str("</tbody>\n</table>");
    output
}

fn push_attributes(output: &mut String, cell: &Cell) {
    if let Some(span) = cell.colspan {
        let _ = write!(output, " colspan=\"{}\"", span);
    }
    if let Some(span) = cell.rowspan {
        let _ = write!(output, " rowspan=\"{}\"", span);
    }
    if let Some(class) = &cell.class {
        let _ = write!(output, " class=\"{}\"", escape_attribute(class));
    }
    if let Some(width) = &cell.width {
        let _ = write!(output, " style=\"width: {}\"", escape_attribute(width));
    }
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render the occupancy matrix as text
///
/// Every position shows the document-order number of the cell covering it;
/// holes and positions past the end of a short row show `.`.
pub fn matrix_to_text(table: &Table) -> String {
    let numbers: FxHashMap<CellId, usize> = table
        .cell_ids()
        .enumerate()
        .map(|(n, id)| (id, n))
        .collect();
    let matrix = build_matrix(table);
    let width = matrix.width();
    let pad = table.cell_count().saturating_sub(1).to_string().len();

    let lines: Vec<String> = (0..matrix.row_count())
        .map(|row| {
            (0..width)
                .map(|col| match matrix.get(row, col).and_then(|id| numbers.get(&id)) {
                    Some(n) => format!("{:>pad$}", n, pad = pad),
                    None => format!("{:>pad$}", ".", pad = pad),
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    lines.join("\n")
}
